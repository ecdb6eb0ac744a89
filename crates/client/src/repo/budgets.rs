use api_types::{
    DataEnvelope,
    budget::{Budget, BudgetNew, BudgetPatch},
};
use reqwest::StatusCode;

use crate::{
    error::{ClientError, Result, ServerErrorKind},
    http::ApiClient,
    store::Store,
};

/// Budgets collection. Names are unique per user and the window must be
/// at least one month; both are server-enforced and arrive as free-text
/// messages, remapped here to stable copy.
#[derive(Clone)]
pub struct BudgetsRepo {
    api: ApiClient,
    store: Store<Budget>,
}

/// Banner copy for the known creation failures. The raw message stays in
/// the returned error and in the logs.
fn friendly_create_message(err: &ClientError) -> String {
    match err.kind() {
        ServerErrorKind::DuplicateName => {
            "A budget with this name already exists. Please choose a different name.".to_string()
        }
        ServerErrorKind::WindowTooShort => {
            "The date range must be at least one month. Please adjust the start and end dates."
                .to_string()
        }
        ServerErrorKind::Other => err.user_message(),
    }
}

impl BudgetsRepo {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self {
            api,
            store: Store::new(),
        }
    }

    pub async fn snapshot(&self) -> Vec<Budget> {
        self.store.snapshot().await
    }

    pub async fn loading(&self) -> bool {
        self.store.loading().await
    }

    pub async fn error(&self) -> Option<String> {
        self.store.error().await
    }

    pub async fn success_message(&self) -> Option<String> {
        self.store.success_message().await
    }

    async fn guard_token(&self) -> Result<()> {
        if self.api.has_token().await {
            return Ok(());
        }
        let err = ClientError::Unauthenticated;
        self.store.fail_precondition(&err.user_message()).await;
        Err(err)
    }

    pub async fn list(&self) -> Result<Vec<Budget>> {
        self.guard_token().await?;
        let started = self.store.begin().await;
        match self
            .api
            .get_json::<Vec<Budget>>("/budgets", &[StatusCode::OK])
            .await
        {
            Ok(rows) => {
                self.store.replace_all(started, rows.clone()).await;
                self.store.finish_ok(None).await;
                Ok(rows)
            }
            Err(err) => {
                tracing::warn!(error = %err, "budgets list failed");
                self.store.finish_err(err.user_message()).await;
                Err(err)
            }
        }
    }

    pub async fn create(&self, input: BudgetNew) -> Result<Budget> {
        self.guard_token().await?;
        self.store.begin().await;
        match self
            .api
            .post_json::<_, DataEnvelope<Budget>>("/budgets", &input, &[StatusCode::CREATED])
            .await
        {
            Ok(body) => {
                self.store.append(body.data.clone()).await;
                self.store
                    .finish_ok(Some("Budget created successfully"))
                    .await;
                Ok(body.data)
            }
            Err(err) => {
                tracing::warn!(error = %err, "budget create failed");
                self.store.finish_err(friendly_create_message(&err)).await;
                Err(err)
            }
        }
    }

    /// Applies a partial update. On success the patch is merged into the
    /// cached row client-side; the embedded category/earning refs are
    /// only refreshed by the next `list`.
    pub async fn update(&self, id: &str, patch: BudgetPatch) -> Result<()> {
        self.guard_token().await?;
        self.store.begin().await;
        match self
            .api
            .patch_json_unit(&format!("/budgets/{id}"), &patch, &[StatusCode::OK])
            .await
        {
            Ok(()) => {
                self.store
                    .update_by_id(id, |budget| {
                        if let Some(name) = patch.name {
                            budget.name = name;
                        }
                        if let Some(description) = patch.description {
                            budget.description = description;
                        }
                        if let Some(amount) = patch.amount {
                            budget.amount = amount;
                        }
                        if let Some(start_date) = patch.start_date {
                            budget.start_date = start_date;
                        }
                        if let Some(end_date) = patch.end_date {
                            budget.end_date = end_date;
                        }
                    })
                    .await;
                self.store
                    .finish_ok(Some("Budget updated successfully"))
                    .await;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "budget update failed");
                self.store.finish_err(err.user_message()).await;
                Err(err)
            }
        }
    }

    pub async fn remove(&self, id: &str) -> Result<()> {
        self.guard_token().await?;
        self.store.begin().await;
        match self
            .api
            .delete(
                &format!("/budgets/{id}"),
                &[StatusCode::OK, StatusCode::NO_CONTENT],
            )
            .await
        {
            Ok(()) => {
                self.store.remove_by_id(id).await;
                self.store
                    .finish_ok(Some("Budget deleted successfully"))
                    .await;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "budget delete failed");
                self.store.finish_err(err.user_message()).await;
                Err(err)
            }
        }
    }
}
