use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    logins: AtomicU64,
    login_failures: AtomicU64,
    borrows: AtomicU64,
    returns: AtomicU64,
    reward_claims: AtomicU64,
    code_claims: AtomicU64,
    usage_records: AtomicU64,
    feedback_entries: AtomicU64,
}

impl Metrics {
    pub fn record_login(&self) {
        self.logins.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_login_failure(&self) {
        self.login_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_borrow(&self, count: usize) {
        self.borrows.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_return(&self) {
        self.returns.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reward_claim(&self) {
        self.reward_claims.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_code_claim(&self) {
        self.code_claims.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_usage(&self) {
        self.usage_records.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_feedback(&self) {
        self.feedback_entries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let logins = self.logins.load(Ordering::Relaxed);
        let login_failures = self.login_failures.load(Ordering::Relaxed);
        let borrows = self.borrows.load(Ordering::Relaxed);
        let returns = self.returns.load(Ordering::Relaxed);
        let reward_claims = self.reward_claims.load(Ordering::Relaxed);
        let code_claims = self.code_claims.load(Ordering::Relaxed);
        let usage_records = self.usage_records.load(Ordering::Relaxed);
        let feedback_entries = self.feedback_entries.load(Ordering::Relaxed);

        format!(
            "# TYPE mensa_logins_total counter\n\
mensa_logins_total {}\n\
# TYPE mensa_login_failures_total counter\n\
mensa_login_failures_total {}\n\
# TYPE mensa_borrows_total counter\n\
mensa_borrows_total {}\n\
# TYPE mensa_returns_total counter\n\
mensa_returns_total {}\n\
# TYPE mensa_reward_claims_total counter\n\
mensa_reward_claims_total {}\n\
# TYPE mensa_code_claims_total counter\n\
mensa_code_claims_total {}\n\
# TYPE mensa_usage_records_total counter\n\
mensa_usage_records_total {}\n\
# TYPE mensa_feedback_entries_total counter\n\
mensa_feedback_entries_total {}\n",
            logins,
            login_failures,
            borrows,
            returns,
            reward_claims,
            code_claims,
            usage_records,
            feedback_entries
        )
    }
}
