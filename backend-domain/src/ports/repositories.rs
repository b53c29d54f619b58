use async_trait::async_trait;

use crate::entities::{
    CateringDefaults,
    ClaimedReward,
    FeedbackEntry,
    LoanQuery,
    LoanRecord,
    LoanSummary,
    PointsUsage,
    RedemptionCode,
    Reward,
    UsageSummary,
    User,
};
use crate::value_objects::Role;

/// Result of an atomic conditional claim on a code.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeClaimOutcome {
    Claimed(RedemptionCode),
    AlreadyClaimed,
    NotFound,
}

/// Result of an in-place loan return transition.
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnOutcome {
    Returned(LoanRecord),
    AlreadyReturned,
    NotFound,
}

/// Result of a conditional ledger debit paired with its audit append.
#[derive(Debug, Clone, PartialEq)]
pub enum DebitOutcome {
    Applied { balance: u64 },
    Insufficient { required: u64, available: u64 },
    UserMissing,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedbackOutcome {
    Awarded { balance: u64 },
    AlreadySubmitted,
    UserMissing,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns false when the id number or email is already registered.
    async fn insert_user(&self, user: &User) -> anyhow::Result<bool>;
    async fn fetch_user(&self, id_number: &str) -> anyhow::Result<Option<User>>;
    async fn list_users(&self, role: Option<Role>) -> anyhow::Result<Vec<User>>;
    async fn count_users(&self) -> anyhow::Result<u64>;
    async fn ping(&self) -> anyhow::Result<()>;
}

/// Points ledger operations. Every debit or credit is atomic with its
/// audit append: balance and trail cannot diverge.
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    async fn debit_for_claim(
        &self,
        claim: ClaimedReward,
    ) -> anyhow::Result<DebitOutcome>;
    async fn debit_for_usage(
        &self,
        usage: PointsUsage,
        defaults: &CateringDefaults,
    ) -> anyhow::Result<DebitOutcome>;
    async fn credit_for_feedback(
        &self,
        entry: FeedbackEntry,
        window_start: i64,
    ) -> anyhow::Result<FeedbackOutcome>;
    /// Lazily applies the daily catering reset, persisting when it fires.
    async fn refresh_catering(
        &self,
        id_number: &str,
        defaults: &CateringDefaults,
        now: i64,
    ) -> anyhow::Result<Option<User>>;
    async fn list_claims(
        &self,
        id_number: Option<&str>,
        limit: usize,
    ) -> anyhow::Result<Vec<ClaimedReward>>;
    async fn list_usage(
        &self,
        id_number: Option<&str>,
        limit: usize,
    ) -> anyhow::Result<Vec<PointsUsage>>;
    async fn usage_summary(
        &self,
        from: Option<i64>,
        to: Option<i64>,
    ) -> anyhow::Result<UsageSummary>;
}

#[async_trait]
pub trait CodeRepository: Send + Sync {
    /// Returns false when the digits are already taken (caller retries).
    async fn insert_code(&self, code: &RedemptionCode) -> anyhow::Result<bool>;
    /// Atomic conditional update: inactive-where-active, never read-then-write.
    async fn claim_code(
        &self,
        digits: &str,
        redeemer: &str,
        now: i64,
    ) -> anyhow::Result<CodeClaimOutcome>;
    async fn list_codes(
        &self,
        issued_by: Option<&str>,
        limit: usize,
    ) -> anyhow::Result<Vec<RedemptionCode>>;
}

#[async_trait]
pub trait LoanRepository: Send + Sync {
    /// Returns false when a loan with the same owner and borrow time
    /// already exists (duplicate-scan guard).
    async fn insert_loan_if_new(&self, loan: &LoanRecord) -> anyhow::Result<bool>;
    async fn mark_returned(&self, loan_id: &str, now: i64) -> anyhow::Result<ReturnOutcome>;
    async fn mark_returned_by_borrow(
        &self,
        owner_id_number: &str,
        borrowed_at: i64,
        now: i64,
    ) -> anyhow::Result<ReturnOutcome>;
    async fn list_loans(&self, query: LoanQuery) -> anyhow::Result<Vec<LoanRecord>>;
    async fn loan_summary(&self) -> anyhow::Result<LoanSummary>;
}

#[async_trait]
pub trait RewardRepository: Send + Sync {
    async fn insert_reward(&self, reward: &Reward) -> anyhow::Result<()>;
    async fn fetch_reward(&self, id: &str) -> anyhow::Result<Option<Reward>>;
    async fn list_rewards(&self) -> anyhow::Result<Vec<Reward>>;
    /// Returns false when no reward with that id exists.
    async fn update_reward(&self, reward: &Reward) -> anyhow::Result<bool>;
    async fn delete_reward(&self, id: &str) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait StoreListRepository: Send + Sync {
    async fn load_stores(&self, path: &str) -> anyhow::Result<Vec<String>>;
    async fn save_stores(&self, path: &str, stores: &[String]) -> anyhow::Result<()>;
}
