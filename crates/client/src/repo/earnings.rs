use api_types::{
    DataEnvelope,
    earning::{Earning, EarningNew},
};
use reqwest::StatusCode;

use crate::{
    error::{ClientError, Result},
    http::ApiClient,
    store::Store,
};

/// Earnings collection. The backend exposes list, create and delete;
/// there is no update route for earnings.
#[derive(Clone)]
pub struct EarningsRepo {
    api: ApiClient,
    store: Store<Earning>,
}

impl EarningsRepo {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self {
            api,
            store: Store::new(),
        }
    }

    pub async fn snapshot(&self) -> Vec<Earning> {
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

    /// Fetches every earning and replaces the local collection.
    pub async fn list(&self) -> Result<Vec<Earning>> {
        self.guard_token().await?;
        let started = self.store.begin().await;
        match self
            .api
            .get_json::<Vec<Earning>>("/earnings", &[StatusCode::OK])
            .await
        {
            Ok(rows) => {
                self.store.replace_all(started, rows.clone()).await;
                self.store.finish_ok(None).await;
                Ok(rows)
            }
            Err(err) => {
                tracing::warn!(error = %err, "earnings list failed");
                self.store.finish_err(err.user_message()).await;
                Err(err)
            }
        }
    }

    /// Creates an earning and appends the server's canonical record.
    /// `amountBudgeted` starts at whatever the server formats for zero.
    pub async fn create(&self, input: EarningNew) -> Result<Earning> {
        self.guard_token().await?;
        self.store.begin().await;
        match self
            .api
            .post_json::<_, DataEnvelope<Earning>>("/earnings", &input, &[StatusCode::CREATED])
            .await
        {
            Ok(body) => {
                self.store.append(body.data.clone()).await;
                self.store
                    .finish_ok(Some("Earning created successfully"))
                    .await;
                Ok(body.data)
            }
            Err(err) => {
                tracing::warn!(error = %err, "earning create failed");
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
                &format!("/earnings/{id}"),
                &[StatusCode::OK, StatusCode::NO_CONTENT],
            )
            .await
        {
            Ok(()) => {
                self.store.remove_by_id(id).await;
                self.store
                    .finish_ok(Some("Earning deleted successfully"))
                    .await;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "earning delete failed");
                self.store.finish_err(err.user_message()).await;
                Err(err)
            }
        }
    }
}
