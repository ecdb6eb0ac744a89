use api_types::{
    DataEnvelope,
    transaction::{Transaction, TransactionNew},
};
use reqwest::StatusCode;

use crate::{
    error::{ClientError, Result},
    http::ApiClient,
    store::Store,
};

/// Transactions collection. Amounts are signed; the split into income
/// and expenses happens in `stats`, never here.
#[derive(Clone)]
pub struct TransactionsRepo {
    api: ApiClient,
    store: Store<Transaction>,
}

impl TransactionsRepo {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self {
            api,
            store: Store::new(),
        }
    }

    pub async fn snapshot(&self) -> Vec<Transaction> {
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

    pub async fn list(&self) -> Result<Vec<Transaction>> {
        self.guard_token().await?;
        let started = self.store.begin().await;
        match self
            .api
            .get_json::<Vec<Transaction>>("/transactions", &[StatusCode::OK])
            .await
        {
            Ok(rows) => {
                self.store.replace_all(started, rows.clone()).await;
                self.store.finish_ok(None).await;
                Ok(rows)
            }
            Err(err) => {
                tracing::warn!(error = %err, "transactions list failed");
                self.store.finish_err(err.user_message()).await;
                Err(err)
            }
        }
    }

    /// Server-side filter by budget. Replaces the collection with the
    /// filtered rows, the same way the screens it serves always did.
    pub async fn list_by_budget(&self, budget_id: &str) -> Result<Vec<Transaction>> {
        self.guard_token().await?;
        let started = self.store.begin().await;
        match self
            .api
            .get_json_with_query::<Vec<Transaction>>(
                "/transactions",
                &[("budgetId", budget_id)],
                &[StatusCode::OK],
            )
            .await
        {
            Ok(rows) => {
                self.store.replace_all(started, rows.clone()).await;
                self.store.finish_ok(None).await;
                Ok(rows)
            }
            Err(err) => {
                tracing::warn!(error = %err, budget_id, "transactions by budget failed");
                self.store.finish_err(err.user_message()).await;
                Err(err)
            }
        }
    }

    /// Single-row fetch. Returned to the caller without touching the
    /// collection.
    pub async fn get(&self, id: &str) -> Result<Transaction> {
        self.guard_token().await?;
        self.store.begin().await;
        match self
            .api
            .get_json::<DataEnvelope<Transaction>>(
                &format!("/transactions/{id}"),
                &[StatusCode::OK],
            )
            .await
        {
            Ok(body) => {
                self.store.finish_ok(None).await;
                Ok(body.data)
            }
            Err(err) => {
                tracing::warn!(error = %err, id, "transaction fetch failed");
                self.store.finish_err(err.user_message()).await;
                Err(err)
            }
        }
    }

    pub async fn create(&self, input: TransactionNew) -> Result<Transaction> {
        self.guard_token().await?;
        self.store.begin().await;
        match self
            .api
            .post_json::<_, DataEnvelope<Transaction>>(
                "/transactions",
                &input,
                &[StatusCode::CREATED],
            )
            .await
        {
            Ok(body) => {
                self.store.append(body.data.clone()).await;
                self.store
                    .finish_ok(Some("Transaction created successfully"))
                    .await;
                Ok(body.data)
            }
            Err(err) => {
                tracing::warn!(error = %err, "transaction create failed");
                self.store.finish_err(err.user_message()).await;
                Err(err)
            }
        }
    }
}
