use api_types::DataEnvelope;
use reqwest::StatusCode;

use crate::{
    error::{ClientError, Result},
    http::ApiClient,
    store::Store,
};

/// Read-only feed of chart rows for the dashboard. The backend owns the
/// row shape and changes it freely, so rows stay loosely typed.
#[derive(Clone)]
pub struct GraphicsRepo {
    api: ApiClient,
    store: Store<serde_json::Value>,
}

impl GraphicsRepo {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self {
            api,
            store: Store::new(),
        }
    }

    pub async fn snapshot(&self) -> Vec<serde_json::Value> {
        self.store.snapshot().await
    }

    pub async fn loading(&self) -> bool {
        self.store.loading().await
    }

    pub async fn error(&self) -> Option<String> {
        self.store.error().await
    }

    async fn guard_token(&self) -> Result<()> {
        if self.api.has_token().await {
            return Ok(());
        }
        let err = ClientError::Unauthenticated;
        self.store.fail_precondition(&err.user_message()).await;
        Err(err)
    }

    pub async fn fetch(&self) -> Result<Vec<serde_json::Value>> {
        self.guard_token().await?;
        let started = self.store.begin().await;
        match self
            .api
            .get_json::<DataEnvelope<Vec<serde_json::Value>>>(
                "/graphics/broadcast",
                &[StatusCode::OK],
            )
            .await
        {
            Ok(body) => {
                self.store.replace_all(started, body.data.clone()).await;
                self.store.finish_ok(None).await;
                Ok(body.data)
            }
            Err(err) => {
                tracing::warn!(error = %err, "graphics fetch failed");
                self.store.finish_err(err.user_message()).await;
                Err(err)
            }
        }
    }
}
