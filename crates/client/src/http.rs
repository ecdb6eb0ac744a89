use reqwest::{Client, StatusCode, multipart::Form};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    error::{ClientError, Result},
    session::SessionStore,
};

/// Thin wrapper over `reqwest` carrying the base URL and the session.
/// Every authenticated helper resolves the bearer token first and fails
/// with `Unauthenticated` before any request is built.
#[derive(Clone)]
pub(crate) struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionStore,
}

/// NestJS error body. `message` is a plain string for most failures and
/// an array of strings for validation errors.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<MessageField>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MessageField {
    One(String),
    Many(Vec<String>),
}

impl MessageField {
    fn flatten(self) -> String {
        match self {
            MessageField::One(message) => message,
            MessageField::Many(messages) => messages.join(", "),
        }
    }
}

impl ApiClient {
    pub(crate) fn new(http: Client, base_url: String, session: SessionStore) -> Self {
        Self {
            http,
            base_url,
            session,
        }
    }

    pub(crate) fn session(&self) -> &SessionStore {
        &self.session
    }

    pub(crate) async fn has_token(&self) -> bool {
        self.session.token().await.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn bearer(&self) -> Result<String> {
        self.session
            .token()
            .await
            .ok_or(ClientError::Unauthenticated)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        expect: &[StatusCode],
    ) -> Result<T> {
        self.get_json_with_query(path, &[], expect).await
    }

    pub(crate) async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        expect: &[StatusCode],
    ) -> Result<T> {
        let token = self.bearer().await?;
        let resp = self
            .http
            .get(self.url(path))
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;
        read_json(resp, expect).await
    }

    pub(crate) async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        expect: &[StatusCode],
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.bearer().await?;
        let resp = self
            .http
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        read_json(resp, expect).await
    }

    /// PATCH whose response body the caller does not read; the local
    /// collection is merged client-side instead of re-parsed.
    pub(crate) async fn patch_json_unit<B>(
        &self,
        path: &str,
        body: &B,
        expect: &[StatusCode],
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let token = self.bearer().await?;
        let resp = self
            .http
            .patch(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        read_unit(resp, expect).await
    }

    pub(crate) async fn delete(&self, path: &str, expect: &[StatusCode]) -> Result<()> {
        let token = self.bearer().await?;
        let resp = self
            .http
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await?;
        read_unit(resp, expect).await
    }

    pub(crate) async fn patch_multipart(
        &self,
        path: &str,
        form: Form,
        expect: &[StatusCode],
    ) -> Result<()> {
        let token = self.bearer().await?;
        let resp = self
            .http
            .patch(self.url(path))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        read_unit(resp, expect).await
    }

    /// Tokenless POST for the auth endpoints.
    pub(crate) async fn post_json_public<B, T>(
        &self,
        path: &str,
        body: &B,
        expect: &[StatusCode],
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        read_json(resp, expect).await
    }

    pub(crate) async fn post_json_public_unit<B>(
        &self,
        path: &str,
        body: &B,
        expect: &[StatusCode],
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        read_unit(resp, expect).await
    }

    /// Tokenless multipart POST, for registration.
    pub(crate) async fn post_multipart_public(
        &self,
        path: &str,
        form: Form,
        expect: &[StatusCode],
    ) -> Result<()> {
        let resp = self.http.post(self.url(path)).multipart(form).send().await?;
        read_unit(resp, expect).await
    }
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response, expect: &[StatusCode]) -> Result<T> {
    let status = resp.status();
    if status.is_success() {
        if !expect.contains(&status) {
            return Err(ClientError::UnexpectedStatus(status));
        }
        return Ok(resp.json::<T>().await?);
    }
    Err(server_error(resp).await)
}

async fn read_unit(resp: reqwest::Response, expect: &[StatusCode]) -> Result<()> {
    let status = resp.status();
    if status.is_success() {
        if !expect.contains(&status) {
            return Err(ClientError::UnexpectedStatus(status));
        }
        return Ok(());
    }
    Err(server_error(resp).await)
}

async fn server_error(resp: reqwest::Response) -> ClientError {
    let status = resp.status();
    let message = match resp.json::<ErrorBody>().await {
        Ok(ErrorBody {
            message: Some(message),
        }) => message.flatten(),
        _ => "An error occurred".to_string(),
    };
    ClientError::Server { status, message }
}
