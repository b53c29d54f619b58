// Embedded JSON document store
// All collections live behind one RwLock; every conditional update and
// debit+append pair runs inside a single write-lock scope, so balance
// and audit trail cannot diverge. Each collection persists to its own
// JSON file under the data directory; with no directory the store is
// memory-only (tests, ephemeral runs).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::sync::RwLock;

use backend_domain::ports::{
    CodeClaimOutcome, CodeRepository, DebitOutcome, FeedbackOutcome, LedgerRepository,
    LoanRepository, ReturnOutcome, RewardRepository, UserRepository,
};
use backend_domain::services::catering::refresh_allowance;
use backend_domain::value_objects::{CodeStatus, LoanStatus, Role};
use backend_domain::{
    CateringDefaults, ClaimedReward, FeedbackEntry, LoanQuery, LoanRecord, LoanSummary,
    PointsUsage, RedemptionCode, Reward, UsageSummary, User,
};

const USERS_FILE: &str = "users.json";
const CODES_FILE: &str = "codes.json";
const LOANS_FILE: &str = "loans.json";
const REWARDS_FILE: &str = "rewards.json";
const CLAIMS_FILE: &str = "claimed_rewards.json";
const USAGE_FILE: &str = "points_usage.json";
const FEEDBACK_FILE: &str = "feedback.json";

#[derive(Default)]
struct Collections {
    users: HashMap<String, User>,
    codes: HashMap<String, RedemptionCode>,
    loans: Vec<LoanRecord>,
    rewards: Vec<Reward>,
    claims: Vec<ClaimedReward>,
    usage: Vec<PointsUsage>,
    feedback: Vec<FeedbackEntry>,
}

pub struct DocumentStore {
    dir: Option<PathBuf>,
    collections: RwLock<Collections>,
}

impl DocumentStore {
    pub fn in_memory() -> Self {
        Self {
            dir: None,
            collections: RwLock::new(Collections::default()),
        }
    }

    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create data dir {}", dir.display()))?;

        let mut collections = Collections::default();
        let users: Vec<User> = load_collection(&dir, USERS_FILE).await?;
        collections.users = users
            .into_iter()
            .map(|user| (user.id_number.clone(), user))
            .collect();
        let codes: Vec<RedemptionCode> = load_collection(&dir, CODES_FILE).await?;
        collections.codes = codes
            .into_iter()
            .map(|code| (code.code.clone(), code))
            .collect();
        collections.loans = load_collection(&dir, LOANS_FILE).await?;
        collections.rewards = load_collection(&dir, REWARDS_FILE).await?;
        collections.claims = load_collection(&dir, CLAIMS_FILE).await?;
        collections.usage = load_collection(&dir, USAGE_FILE).await?;
        collections.feedback = load_collection(&dir, FEEDBACK_FILE).await?;

        Ok(Self {
            dir: Some(dir),
            collections: RwLock::new(collections),
        })
    }

    async fn persist<T: Serialize>(&self, file: &str, rows: &[T]) -> Result<()> {
        let Some(dir) = &self.dir else {
            return Ok(());
        };
        let content = serde_json::to_string(rows)?;
        fs::write(dir.join(file), content)
            .await
            .with_context(|| format!("write {}", file))?;
        Ok(())
    }

    async fn persist_users(&self, collections: &Collections) -> Result<()> {
        let mut users: Vec<&User> = collections.users.values().collect();
        users.sort_by(|a, b| a.id_number.cmp(&b.id_number));
        self.persist(USERS_FILE, &users).await
    }

    async fn persist_codes(&self, collections: &Collections) -> Result<()> {
        let mut codes: Vec<&RedemptionCode> = collections.codes.values().collect();
        codes.sort_by(|a, b| a.code.cmp(&b.code));
        self.persist(CODES_FILE, &codes).await
    }
}

async fn load_collection<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<Vec<T>> {
    let path = dir.join(file);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(&path)
        .await
        .with_context(|| format!("read {}", file))?;
    serde_json::from_str(&content).with_context(|| format!("parse {}", file))
}

#[async_trait]
impl UserRepository for DocumentStore {
    async fn insert_user(&self, user: &User) -> Result<bool> {
        let mut collections = self.collections.write().await;
        let taken = collections.users.contains_key(&user.id_number)
            || collections
                .users
                .values()
                .any(|existing| existing.email == user.email);
        if taken {
            return Ok(false);
        }
        collections
            .users
            .insert(user.id_number.clone(), user.clone());
        self.persist_users(&collections).await?;
        Ok(true)
    }

    async fn fetch_user(&self, id_number: &str) -> Result<Option<User>> {
        let collections = self.collections.read().await;
        Ok(collections.users.get(id_number).cloned())
    }

    async fn list_users(&self, role: Option<Role>) -> Result<Vec<User>> {
        let collections = self.collections.read().await;
        Ok(collections
            .users
            .values()
            .filter(|user| role.map(|role| user.role == role).unwrap_or(true))
            .cloned()
            .collect())
    }

    async fn count_users(&self) -> Result<u64> {
        let collections = self.collections.read().await;
        Ok(collections.users.len() as u64)
    }

    async fn ping(&self) -> Result<()> {
        let _ = self.collections.read().await;
        Ok(())
    }
}

#[async_trait]
impl LedgerRepository for DocumentStore {
    async fn debit_for_claim(&self, claim: ClaimedReward) -> Result<DebitOutcome> {
        let mut collections = self.collections.write().await;
        let balance = {
            let Some(user) = collections.users.get_mut(&claim.id_number) else {
                return Ok(DebitOutcome::UserMissing);
            };
            let required = u64::from(claim.points_spent);
            if user.points < required {
                return Ok(DebitOutcome::Insufficient {
                    required,
                    available: user.points,
                });
            }
            user.points -= required;
            user.points_used += required;
            user.points
        };
        collections.claims.push(claim);
        self.persist_users(&collections).await?;
        self.persist(CLAIMS_FILE, &collections.claims).await?;
        Ok(DebitOutcome::Applied { balance })
    }

    async fn debit_for_usage(
        &self,
        usage: PointsUsage,
        defaults: &CateringDefaults,
    ) -> Result<DebitOutcome> {
        let mut collections = self.collections.write().await;
        let remaining = {
            let Some(user) = collections.users.get_mut(&usage.id_number) else {
                return Ok(DebitOutcome::UserMissing);
            };
            refresh_allowance(&mut user.catering, defaults, usage.recorded_at);
            let required = u64::from(usage.points_spent);
            let available = u64::from(user.catering.for_meal(usage.meal_type));
            if available < required {
                return Ok(DebitOutcome::Insufficient {
                    required,
                    available,
                });
            }
            user.catering.debit(usage.meal_type, usage.points_spent);
            user.points_used += required;
            u64::from(user.catering.for_meal(usage.meal_type))
        };
        collections.usage.push(usage);
        self.persist_users(&collections).await?;
        self.persist(USAGE_FILE, &collections.usage).await?;
        Ok(DebitOutcome::Applied { balance: remaining })
    }

    async fn credit_for_feedback(
        &self,
        entry: FeedbackEntry,
        window_start: i64,
    ) -> Result<FeedbackOutcome> {
        let mut collections = self.collections.write().await;
        let balance = {
            let Some(user) = collections.users.get_mut(&entry.id_number) else {
                return Ok(FeedbackOutcome::UserMissing);
            };
            if user
                .last_feedback_at
                .map(|at| at >= window_start)
                .unwrap_or(false)
            {
                return Ok(FeedbackOutcome::AlreadySubmitted);
            }
            user.points += u64::from(entry.awarded_points);
            user.last_feedback_at = Some(entry.submitted_at);
            user.points
        };
        collections.feedback.push(entry);
        self.persist_users(&collections).await?;
        self.persist(FEEDBACK_FILE, &collections.feedback).await?;
        Ok(FeedbackOutcome::Awarded { balance })
    }

    async fn refresh_catering(
        &self,
        id_number: &str,
        defaults: &CateringDefaults,
        now: i64,
    ) -> Result<Option<User>> {
        let mut collections = self.collections.write().await;
        let Some(user) = collections.users.get_mut(id_number) else {
            return Ok(None);
        };
        let reset = refresh_allowance(&mut user.catering, defaults, now);
        let snapshot = user.clone();
        if reset {
            self.persist_users(&collections).await?;
        }
        Ok(Some(snapshot))
    }

    async fn list_claims(
        &self,
        id_number: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ClaimedReward>> {
        let collections = self.collections.read().await;
        let mut rows: Vec<ClaimedReward> = collections
            .claims
            .iter()
            .filter(|claim| id_number.map(|id| claim.id_number == id).unwrap_or(true))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.claimed_at.cmp(&a.claimed_at));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn list_usage(&self, id_number: Option<&str>, limit: usize) -> Result<Vec<PointsUsage>> {
        let collections = self.collections.read().await;
        let mut rows: Vec<PointsUsage> = collections
            .usage
            .iter()
            .filter(|usage| id_number.map(|id| usage.id_number == id).unwrap_or(true))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn usage_summary(&self, from: Option<i64>, to: Option<i64>) -> Result<UsageSummary> {
        let collections = self.collections.read().await;
        let mut summary = UsageSummary::default();
        for usage in &collections.usage {
            if from.map(|from| usage.recorded_at < from).unwrap_or(false) {
                continue;
            }
            if to.map(|to| usage.recorded_at >= to).unwrap_or(false) {
                continue;
            }
            summary.records += 1;
            summary.total_points_spent += u64::from(usage.points_spent);
            *summary.by_store.entry(usage.store.clone()).or_default() +=
                u64::from(usage.points_spent);
            *summary
                .by_meal
                .entry(usage.meal_type.as_str().to_string())
                .or_default() += u64::from(usage.points_spent);
        }
        Ok(summary)
    }
}

#[async_trait]
impl CodeRepository for DocumentStore {
    async fn insert_code(&self, code: &RedemptionCode) -> Result<bool> {
        let mut collections = self.collections.write().await;
        if collections.codes.contains_key(&code.code) {
            return Ok(false);
        }
        collections.codes.insert(code.code.clone(), code.clone());
        self.persist_codes(&collections).await?;
        Ok(true)
    }

    async fn claim_code(
        &self,
        digits: &str,
        redeemer: &str,
        now: i64,
    ) -> Result<CodeClaimOutcome> {
        let mut collections = self.collections.write().await;
        let claimed = {
            let Some(code) = collections.codes.get_mut(digits) else {
                return Ok(CodeClaimOutcome::NotFound);
            };
            if code.status != CodeStatus::Active {
                return Ok(CodeClaimOutcome::AlreadyClaimed);
            }
            code.status = CodeStatus::Inactive;
            code.redeemed_by = Some(redeemer.to_string());
            code.redeemed_at = Some(now);
            code.clone()
        };
        self.persist_codes(&collections).await?;
        Ok(CodeClaimOutcome::Claimed(claimed))
    }

    async fn list_codes(
        &self,
        issued_by: Option<&str>,
        limit: usize,
    ) -> Result<Vec<RedemptionCode>> {
        let collections = self.collections.read().await;
        let mut rows: Vec<RedemptionCode> = collections
            .codes
            .values()
            .filter(|code| issued_by.map(|id| code.issued_by == id).unwrap_or(true))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.issued_at.cmp(&a.issued_at));
        rows.truncate(limit);
        Ok(rows)
    }
}

#[async_trait]
impl LoanRepository for DocumentStore {
    async fn insert_loan_if_new(&self, loan: &LoanRecord) -> Result<bool> {
        let mut collections = self.collections.write().await;
        let duplicate = collections.loans.iter().any(|existing| {
            existing.owner_id_number == loan.owner_id_number
                && existing.borrowed_at == loan.borrowed_at
        });
        if duplicate {
            return Ok(false);
        }
        collections.loans.push(loan.clone());
        self.persist(LOANS_FILE, &collections.loans).await?;
        Ok(true)
    }

    async fn mark_returned(&self, loan_id: &str, now: i64) -> Result<ReturnOutcome> {
        let mut collections = self.collections.write().await;
        let returned = {
            let Some(loan) = collections.loans.iter_mut().find(|loan| loan.id == loan_id) else {
                return Ok(ReturnOutcome::NotFound);
            };
            if loan.status == LoanStatus::Returned {
                return Ok(ReturnOutcome::AlreadyReturned);
            }
            loan.status = LoanStatus::Returned;
            loan.returned_at = Some(now);
            loan.clone()
        };
        self.persist(LOANS_FILE, &collections.loans).await?;
        Ok(ReturnOutcome::Returned(returned))
    }

    async fn mark_returned_by_borrow(
        &self,
        owner_id_number: &str,
        borrowed_at: i64,
        now: i64,
    ) -> Result<ReturnOutcome> {
        let mut collections = self.collections.write().await;
        let returned = {
            let Some(loan) = collections.loans.iter_mut().find(|loan| {
                loan.owner_id_number == owner_id_number && loan.borrowed_at == borrowed_at
            }) else {
                return Ok(ReturnOutcome::NotFound);
            };
            if loan.status == LoanStatus::Returned {
                return Ok(ReturnOutcome::AlreadyReturned);
            }
            loan.status = LoanStatus::Returned;
            loan.returned_at = Some(now);
            loan.clone()
        };
        self.persist(LOANS_FILE, &collections.loans).await?;
        Ok(ReturnOutcome::Returned(returned))
    }

    async fn list_loans(&self, query: LoanQuery) -> Result<Vec<LoanRecord>> {
        let collections = self.collections.read().await;
        let mut rows: Vec<LoanRecord> = collections
            .loans
            .iter()
            .filter(|loan| {
                if query.status.map(|status| loan.status != status).unwrap_or(false) {
                    return false;
                }
                if query.from.map(|from| loan.borrowed_at < from).unwrap_or(false) {
                    return false;
                }
                if query.to.map(|to| loan.borrowed_at >= to).unwrap_or(false) {
                    return false;
                }
                match query.owner_role {
                    Some(role) => collections
                        .users
                        .get(&loan.owner_id_number)
                        .map(|owner| owner.role == role)
                        .unwrap_or(false),
                    None => true,
                }
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.borrowed_at.cmp(&a.borrowed_at));
        if query.limit > 0 {
            rows.truncate(query.limit);
        }
        Ok(rows)
    }

    async fn loan_summary(&self) -> Result<LoanSummary> {
        let collections = self.collections.read().await;
        let mut summary = LoanSummary::default();
        for loan in &collections.loans {
            if loan.is_open() {
                summary.open_loans += 1;
                summary.outstanding_items += loan
                    .items
                    .iter()
                    .map(|item| u64::from(item.quantity))
                    .sum::<u64>();
            } else {
                summary.returned_loans += 1;
            }
        }
        Ok(summary)
    }
}

#[async_trait]
impl RewardRepository for DocumentStore {
    async fn insert_reward(&self, reward: &Reward) -> Result<()> {
        let mut collections = self.collections.write().await;
        collections.rewards.push(reward.clone());
        self.persist(REWARDS_FILE, &collections.rewards).await?;
        Ok(())
    }

    async fn fetch_reward(&self, id: &str) -> Result<Option<Reward>> {
        let collections = self.collections.read().await;
        Ok(collections
            .rewards
            .iter()
            .find(|reward| reward.id == id)
            .cloned())
    }

    async fn list_rewards(&self) -> Result<Vec<Reward>> {
        let collections = self.collections.read().await;
        Ok(collections.rewards.clone())
    }

    async fn update_reward(&self, reward: &Reward) -> Result<bool> {
        let mut collections = self.collections.write().await;
        let Some(slot) = collections
            .rewards
            .iter_mut()
            .find(|existing| existing.id == reward.id)
        else {
            return Ok(false);
        };
        *slot = reward.clone();
        self.persist(REWARDS_FILE, &collections.rewards).await?;
        Ok(true)
    }

    async fn delete_reward(&self, id: &str) -> Result<bool> {
        let mut collections = self.collections.write().await;
        let before = collections.rewards.len();
        collections.rewards.retain(|reward| reward.id != id);
        if collections.rewards.len() == before {
            return Ok(false);
        }
        self.persist(REWARDS_FILE, &collections.rewards).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend_domain::value_objects::MealType;
    use backend_domain::{CateringAllowance, LoanItem};

    const DAY_MILLIS: i64 = 86_400_000;

    const DEFAULTS: CateringDefaults = CateringDefaults {
        breakfast: 20,
        lunch: 35,
        dinner: 35,
    };

    fn user(id_number: &str, points: u64) -> User {
        User {
            id_number: id_number.to_string(),
            name: "Alex".to_string(),
            email: format!("{}@campus.test", id_number),
            university: "Campus".to_string(),
            role: Role::Student,
            password_hash: "hash".to_string(),
            points,
            points_used: 0,
            catering: CateringAllowance::fresh(&DEFAULTS, 0),
            last_feedback_at: None,
            created_at: 0,
        }
    }

    fn claim(id_number: &str, cost: u32) -> ClaimedReward {
        ClaimedReward {
            id: "c1".to_string(),
            id_number: id_number.to_string(),
            reward_name: "Mug".to_string(),
            points_spent: cost,
            claimed_at: 1_000,
        }
    }

    fn usage(id_number: &str, amount: u32, recorded_at: i64) -> PointsUsage {
        PointsUsage {
            id: "u1".to_string(),
            id_number: id_number.to_string(),
            meal_type: MealType::Lunch,
            store: "North Canteen".to_string(),
            items: vec![],
            points_spent: amount,
            recorded_at,
        }
    }

    fn loan(id: &str, owner: &str, borrowed_at: i64) -> LoanRecord {
        LoanRecord {
            id: id.to_string(),
            owner_id_number: owner.to_string(),
            items: vec![LoanItem {
                name: "Spoon".to_string(),
                quantity: 1,
            }],
            borrowed_at,
            status: LoanStatus::Borrowed,
            returned_at: None,
        }
    }

    #[tokio::test]
    async fn claim_debit_is_rejected_without_touching_the_balance() {
        let store = DocumentStore::in_memory();
        store.insert_user(&user("s1", 10)).await.expect("insert");

        let outcome = store.debit_for_claim(claim("s1", 15)).await.expect("debit");
        assert_eq!(
            outcome,
            DebitOutcome::Insufficient {
                required: 15,
                available: 10
            }
        );
        let unchanged = store.fetch_user("s1").await.expect("fetch").expect("user");
        assert_eq!(unchanged.points, 10);
        assert!(store.list_claims(Some("s1"), 10).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn claim_debit_applies_and_appends_exactly_one_audit_row() {
        let store = DocumentStore::in_memory();
        store.insert_user(&user("s1", 20)).await.expect("insert");

        let outcome = store.debit_for_claim(claim("s1", 15)).await.expect("debit");
        assert_eq!(outcome, DebitOutcome::Applied { balance: 5 });

        let debited = store.fetch_user("s1").await.expect("fetch").expect("user");
        assert_eq!(debited.points, 5);
        assert_eq!(debited.points_used, 15);
        let rows = store.list_claims(Some("s1"), 10).await.expect("list");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].points_spent, 15);
    }

    #[tokio::test]
    async fn second_code_claim_always_reports_already_claimed() {
        let store = DocumentStore::in_memory();
        let code = RedemptionCode::issue("042731".to_string(), "cashier".to_string(), 0);
        assert!(store.insert_code(&code).await.expect("insert"));

        let first = store.claim_code("042731", "s1", 10).await.expect("claim");
        assert!(matches!(first, CodeClaimOutcome::Claimed(_)));
        let second = store.claim_code("042731", "s2", 20).await.expect("claim");
        assert_eq!(second, CodeClaimOutcome::AlreadyClaimed);
        let missing = store.claim_code("999999", "s1", 30).await.expect("claim");
        assert_eq!(missing, CodeClaimOutcome::NotFound);
    }

    #[tokio::test]
    async fn duplicate_code_digits_are_rejected_at_insert() {
        let store = DocumentStore::in_memory();
        let code = RedemptionCode::issue("042731".to_string(), "cashier".to_string(), 0);
        assert!(store.insert_code(&code).await.expect("insert"));
        assert!(!store.insert_code(&code).await.expect("insert"));
    }

    #[tokio::test]
    async fn a_loan_cannot_be_returned_twice() {
        let store = DocumentStore::in_memory();
        store.insert_user(&user("a1", 0)).await.expect("insert");
        assert!(store.insert_loan_if_new(&loan("l1", "a1", 500)).await.expect("insert"));

        let first = store
            .mark_returned_by_borrow("a1", 500, 900)
            .await
            .expect("return");
        match first {
            ReturnOutcome::Returned(returned) => {
                assert_eq!(returned.returned_at, Some(900));
                assert_eq!(returned.status, LoanStatus::Returned);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        let second = store
            .mark_returned_by_borrow("a1", 500, 901)
            .await
            .expect("return");
        assert_eq!(second, ReturnOutcome::AlreadyReturned);
    }

    #[tokio::test]
    async fn duplicate_borrow_scans_are_rejected() {
        let store = DocumentStore::in_memory();
        assert!(store.insert_loan_if_new(&loan("l1", "a1", 500)).await.expect("insert"));
        assert!(!store.insert_loan_if_new(&loan("l2", "a1", 500)).await.expect("insert"));
        assert!(store.insert_loan_if_new(&loan("l3", "a1", 501)).await.expect("insert"));
    }

    #[tokio::test]
    async fn usage_debit_refreshes_a_stale_allowance_first() {
        let store = DocumentStore::in_memory();
        let mut stale = user("s1", 0);
        stale.catering.lunch = 0;
        stale.catering.last_reset = 0;
        store.insert_user(&stale).await.expect("insert");

        // Two days later the reset fires before the spend is judged.
        let outcome = store
            .debit_for_usage(usage("s1", 30, 2 * DAY_MILLIS), &DEFAULTS)
            .await
            .expect("debit");
        assert_eq!(outcome, DebitOutcome::Applied { balance: 5 });
        let refreshed = store.fetch_user("s1").await.expect("fetch").expect("user");
        assert_eq!(refreshed.catering.breakfast, 20);
        assert_eq!(refreshed.catering.lunch, 5);
        assert_eq!(refreshed.points_used, 30);
    }

    #[tokio::test]
    async fn usage_debit_reports_required_and_available() {
        let store = DocumentStore::in_memory();
        store.insert_user(&user("s1", 0)).await.expect("insert");

        let outcome = store
            .debit_for_usage(usage("s1", 40, 1_000), &DEFAULTS)
            .await
            .expect("debit");
        assert_eq!(
            outcome,
            DebitOutcome::Insufficient {
                required: 40,
                available: 35
            }
        );
        assert!(store.list_usage(Some("s1"), 10).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn feedback_is_awarded_once_per_window() {
        let store = DocumentStore::in_memory();
        store.insert_user(&user("s1", 5)).await.expect("insert");

        let entry = FeedbackEntry {
            id: "f1".to_string(),
            id_number: "s1".to_string(),
            rating: 5,
            comment: String::new(),
            awarded_points: 3,
            submitted_at: 1_000,
        };
        let first = store.credit_for_feedback(entry.clone(), 0).await.expect("credit");
        assert_eq!(first, FeedbackOutcome::Awarded { balance: 8 });
        let second = store.credit_for_feedback(entry, 0).await.expect("credit");
        assert_eq!(second, FeedbackOutcome::AlreadySubmitted);
    }

    #[tokio::test]
    async fn usage_summary_aggregates_by_store_and_meal() {
        let store = DocumentStore::in_memory();
        store.insert_user(&user("s1", 0)).await.expect("insert");
        store
            .debit_for_usage(usage("s1", 10, 1_000), &DEFAULTS)
            .await
            .expect("debit");
        store
            .debit_for_usage(
                PointsUsage {
                    id: "u2".to_string(),
                    store: "Cafe West".to_string(),
                    meal_type: MealType::Dinner,
                    recorded_at: 2_000,
                    ..usage("s1", 12, 2_000)
                },
                &DEFAULTS,
            )
            .await
            .expect("debit");

        let summary = store.usage_summary(None, None).await.expect("summary");
        assert_eq!(summary.records, 2);
        assert_eq!(summary.total_points_spent, 22);
        assert_eq!(summary.by_store.get("North Canteen"), Some(&10));
        assert_eq!(summary.by_store.get("Cafe West"), Some(&12));
        assert_eq!(summary.by_meal.get("lunch"), Some(&10));
        assert_eq!(summary.by_meal.get("dinner"), Some(&12));

        let windowed = store.usage_summary(Some(1_500), None).await.expect("summary");
        assert_eq!(windowed.records, 1);
        assert_eq!(windowed.total_points_spent, 12);
    }

    #[tokio::test]
    async fn open_loans_are_listed_newest_first_with_role_filter() {
        let store = DocumentStore::in_memory();
        store.insert_user(&user("s1", 0)).await.expect("insert");
        let mut staff = user("c1", 0);
        staff.role = Role::Concierge;
        store.insert_user(&staff).await.expect("insert");

        store.insert_loan_if_new(&loan("l1", "s1", 100)).await.expect("insert");
        store.insert_loan_if_new(&loan("l2", "s1", 300)).await.expect("insert");
        store.insert_loan_if_new(&loan("l3", "c1", 200)).await.expect("insert");
        store.mark_returned("l1", 400).await.expect("return");

        let open = store
            .list_loans(LoanQuery {
                status: Some(LoanStatus::Borrowed),
                limit: 10,
                ..LoanQuery::default()
            })
            .await
            .expect("list");
        assert_eq!(
            open.iter().map(|loan| loan.id.as_str()).collect::<Vec<_>>(),
            vec!["l2", "l3"]
        );

        let students_only = store
            .list_loans(LoanQuery {
                status: Some(LoanStatus::Borrowed),
                owner_role: Some(Role::Student),
                limit: 10,
                ..LoanQuery::default()
            })
            .await
            .expect("list");
        assert_eq!(students_only.len(), 1);
        assert_eq!(students_only[0].id, "l2");

        let summary = store.loan_summary().await.expect("summary");
        assert_eq!(summary.open_loans, 2);
        assert_eq!(summary.returned_loans, 1);
        assert_eq!(summary.outstanding_items, 2);
    }

    #[tokio::test]
    async fn collections_survive_a_reopen() {
        let dir = std::env::temp_dir().join(format!(
            "mensa-store-test-{}",
            backend_domain::utils::current_millis()
        ));
        {
            let store = DocumentStore::open(&dir).await.expect("open");
            store.insert_user(&user("s1", 20)).await.expect("insert");
            store.debit_for_claim(claim("s1", 15)).await.expect("debit");
        }
        let reopened = DocumentStore::open(&dir).await.expect("reopen");
        let persisted = reopened.fetch_user("s1").await.expect("fetch").expect("user");
        assert_eq!(persisted.points, 5);
        assert_eq!(reopened.list_claims(None, 10).await.expect("list").len(), 1);
        tokio::fs::remove_dir_all(&dir).await.expect("cleanup");
    }
}
