use api_types::user::{User, UserPatch};
use reqwest::{StatusCode, multipart::Form};

use crate::{
    error::{ClientError, Result},
    http::ApiClient,
    store::Store,
    upload::UploadFile,
};

/// Single-record repository for the authenticated user's profile. The
/// store holds at most one row.
#[derive(Clone)]
pub struct UserRepo {
    api: ApiClient,
    store: Store<User>,
}

impl UserRepo {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self {
            api,
            store: Store::new(),
        }
    }

    /// Last fetched profile, if any.
    pub async fn current(&self) -> Option<User> {
        self.store.snapshot().await.into_iter().next()
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

    /// Fetches the profile by id. The id comes from the token claims,
    /// not from this repository.
    pub async fn fetch(&self, id: &str) -> Result<User> {
        self.guard_token().await?;
        let started = self.store.begin().await;
        match self
            .api
            .get_json::<User>(&format!("/users/{id}"), &[StatusCode::OK])
            .await
        {
            Ok(user) => {
                self.store.replace_all(started, vec![user.clone()]).await;
                self.store.finish_ok(None).await;
                Ok(user)
            }
            Err(err) => {
                tracing::warn!(error = %err, "user fetch failed");
                self.store.finish_err(err.user_message()).await;
                Err(err)
            }
        }
    }

    /// Profile update, always multipart: provided scalar fields as text
    /// parts plus an optional `file` part with a new picture. The patch
    /// is merged into the cached row; a changed picture URL only shows
    /// up on the next fetch.
    pub async fn update(
        &self,
        id: &str,
        patch: UserPatch,
        picture: Option<UploadFile>,
    ) -> Result<()> {
        self.guard_token().await?;
        self.store.begin().await;
        let result = self.try_update(id, &patch, picture).await;
        match result {
            Ok(()) => {
                self.store
                    .update_by_id(id, |user| {
                        if let Some(name) = patch.name {
                            user.name = name;
                        }
                        if let Some(email) = patch.email {
                            user.email = email;
                        }
                        if let Some(phone) = patch.phone {
                            user.phone = phone;
                        }
                    })
                    .await;
                self.store
                    .finish_ok(Some("User updated successfully"))
                    .await;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "user update failed");
                self.store.finish_err(err.user_message()).await;
                Err(err)
            }
        }
    }

    async fn try_update(
        &self,
        id: &str,
        patch: &UserPatch,
        picture: Option<UploadFile>,
    ) -> Result<()> {
        let mut form = Form::new();
        if let Some(name) = &patch.name {
            form = form.text("name", name.clone());
        }
        if let Some(email) = &patch.email {
            form = form.text("email", email.clone());
        }
        if let Some(phone) = &patch.phone {
            form = form.text("phone", phone.clone());
        }
        if let Some(picture) = picture {
            form = form.part("file", picture.into_part()?);
        }
        self.api
            .patch_multipart(&format!("/users/{id}"), form, &[StatusCode::OK])
            .await
    }
}
