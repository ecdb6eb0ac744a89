use api_types::{
    DataEnvelope,
    category::{Category, CategoryNew},
};
use reqwest::StatusCode;

use crate::{
    error::{ClientError, Result},
    http::ApiClient,
    store::Store,
};

/// Flat per-user category list; create-only, no rename or delete.
#[derive(Clone)]
pub struct CategoriesRepo {
    api: ApiClient,
    store: Store<Category>,
}

impl CategoriesRepo {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self {
            api,
            store: Store::new(),
        }
    }

    pub async fn snapshot(&self) -> Vec<Category> {
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

    pub async fn list(&self) -> Result<Vec<Category>> {
        self.guard_token().await?;
        let started = self.store.begin().await;
        match self
            .api
            .get_json::<Vec<Category>>("/categories", &[StatusCode::OK])
            .await
        {
            Ok(rows) => {
                self.store.replace_all(started, rows.clone()).await;
                self.store.finish_ok(None).await;
                Ok(rows)
            }
            Err(err) => {
                tracing::warn!(error = %err, "categories list failed");
                self.store.finish_err(err.user_message()).await;
                Err(err)
            }
        }
    }

    pub async fn create(&self, name: &str) -> Result<Category> {
        self.guard_token().await?;
        self.store.begin().await;
        let payload = CategoryNew {
            name: name.to_string(),
        };
        match self
            .api
            .post_json::<_, DataEnvelope<Category>>("/categories", &payload, &[StatusCode::CREATED])
            .await
        {
            Ok(body) => {
                self.store.append(body.data.clone()).await;
                self.store
                    .finish_ok(Some("Category created successfully"))
                    .await;
                Ok(body.data)
            }
            Err(err) => {
                tracing::warn!(error = %err, "category create failed");
                self.store.finish_err(err.user_message()).await;
                Err(err)
            }
        }
    }
}
