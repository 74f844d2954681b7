//! Request-level orchestration of issuance, storage and evaluation.

use std::sync::Arc;
use steer_diagnose::{observe, DiagnosticReporter, Scope};
use steer_eval::{evaluate, Verdict};
use steer_store::{ConditionStore, StoreError, StoreResult};
use steer_types::{ConditionRecord, UserId};
use tracing::debug;

/// Shown to the diagnostic reporter when an operation below fails.
const SOURCE: &str = include_str!("service.rs");

/// Ties the store, evaluator and diagnostic reporter together.
pub struct ConditionService {
    store: Arc<dyn ConditionStore>,
    reporter: Arc<dyn DiagnosticReporter>,
    base_url: String,
}

impl ConditionService {
    pub fn new(
        store: Arc<dyn ConditionStore>,
        reporter: Arc<dyn DiagnosticReporter>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            store,
            reporter,
            base_url,
        }
    }

    /// Issues a fresh user id and returns the URL that embeds it.
    pub fn issue_url(&self) -> String {
        let id = UserId::issue();
        debug!(user_id = %id, "issued user id");
        format!("{}/user/{}", self.base_url, id)
    }

    /// Stores `record` under its own user id, replacing any previous record.
    pub async fn submit_conditions(&self, record: ConditionRecord) -> StoreResult<()> {
        let scope = Scope::new("submit_conditions").with_source(SOURCE);
        observe(self.reporter.as_ref(), scope, async {
            self.store.put(&record.user_id, &record).await
        })
        .await
    }

    /// Evaluates `candidate` against the conditions stored for `user_id`.
    pub async fn validate(&self, user_id: &UserId, candidate: &str) -> StoreResult<Verdict> {
        let scope = Scope::new("validate").with_source(SOURCE);
        observe(self.reporter.as_ref(), scope, async {
            let record = self.store.get(user_id).await?;
            let verdict = evaluate(candidate, &record);
            debug!(user_id = %user_id, valid = verdict.is_valid(), "evaluated candidate");
            Ok::<_, StoreError>(verdict)
        })
        .await
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store_backend(&self) -> &'static str {
        self.store.backend()
    }

    pub fn reporter_name(&self) -> &'static str {
        self.reporter.name()
    }
}
