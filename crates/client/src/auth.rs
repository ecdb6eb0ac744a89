use std::sync::Arc;

use api_types::auth::{
    ForgotPassword, LoginRequest, LoginResponse, RegisterUser, ResetPassword, ValidateRecoveryCode,
};
use reqwest::{StatusCode, multipart::Form};
use tokio::sync::Mutex;

use crate::{
    error::{ClientError, Result},
    http::ApiClient,
    upload::UploadFile,
};

#[derive(Debug, Default)]
struct AuthState {
    in_flight: u32,
    error: Option<String>,
    success: bool,
}

/// Registration, login and the three-step password recovery. These are
/// the tokenless endpoints; login is the one producer of the bearer
/// token the repositories depend on.
///
/// Recovery is strictly sequential for the user (validate the emailed
/// code before resetting) but each call stands alone here; ordering is
/// the caller's responsibility.
#[derive(Clone)]
pub struct AuthFlow {
    api: ApiClient,
    state: Arc<Mutex<AuthState>>,
}

impl AuthFlow {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(AuthState::default())),
        }
    }

    pub async fn loading(&self) -> bool {
        self.state.lock().await.in_flight > 0
    }

    pub async fn error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }

    /// True once the most recent operation succeeded. Reset at the start
    /// of every call, like the error.
    pub async fn success(&self) -> bool {
        self.state.lock().await.success
    }

    async fn begin(&self) {
        let mut guard = self.state.lock().await;
        guard.in_flight += 1;
        guard.error = None;
        guard.success = false;
    }

    async fn settle<T>(&self, result: &Result<T>) {
        let mut guard = self.state.lock().await;
        guard.in_flight = guard.in_flight.saturating_sub(1);
        match result {
            Ok(_) => guard.success = true,
            Err(err) => guard.error = Some(err.user_message()),
        }
    }

    /// Registers a new account. Multipart: the scalar fields plus an
    /// optional `file` part with the profile picture.
    pub async fn register(&self, input: RegisterUser, picture: Option<UploadFile>) -> Result<()> {
        self.begin().await;
        let result = self.try_register(input, picture).await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "registration failed");
        }
        self.settle(&result).await;
        result
    }

    async fn try_register(&self, input: RegisterUser, picture: Option<UploadFile>) -> Result<()> {
        let mut form = Form::new()
            .text("name", input.name)
            .text("email", input.email)
            .text("password", input.password)
            .text("phone", input.phone);
        if let Some(picture) = picture {
            form = form.part("file", picture.into_part()?);
        }
        self.api
            .post_multipart_public("/auth/register", form, &[StatusCode::CREATED])
            .await
    }

    /// Logs in and hands the returned token to the session store. A
    /// success status without a token in the body is `MissingToken`,
    /// never a silent success. With `remember` the credentials are kept
    /// for login-form prefill; otherwise any remembered pair is dropped.
    ///
    /// Returns the raw token; decode it with
    /// [`decode_claims`](crate::decode_claims) for the user id.
    pub async fn login(&self, email: &str, password: &str, remember: bool) -> Result<String> {
        self.begin().await;
        let result = self.try_login(email, password, remember).await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "login failed");
        }
        self.settle(&result).await;
        result
    }

    async fn try_login(&self, email: &str, password: &str, remember: bool) -> Result<String> {
        let payload = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let body: LoginResponse = self
            .api
            .post_json_public(
                "/auth/login",
                &payload,
                &[StatusCode::OK, StatusCode::CREATED],
            )
            .await?;
        let Some(token) = body.access_token else {
            return Err(ClientError::MissingToken);
        };

        let session = self.api.session();
        session.set_token(&token).await?;
        if remember {
            session.remember_credentials(email, password).await?;
        } else {
            session.forget_credentials().await?;
        }
        Ok(token)
    }

    /// Drops the stored token. Remembered credentials stay so the login
    /// form can be prefilled on the next run.
    pub async fn logout(&self) -> Result<()> {
        self.api.session().clear_token().await
    }

    /// Step 1 of recovery: have the server email a six-digit code.
    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        self.begin().await;
        let payload = ForgotPassword {
            email: email.to_string(),
        };
        let result = self
            .api
            .post_json_public_unit("/auth/forgot-password", &payload, &[StatusCode::OK])
            .await;
        self.settle(&result).await;
        result
    }

    /// Step 2: check the emailed code without consuming it.
    pub async fn validate_recovery_code(&self, email: &str, code: &str) -> Result<()> {
        self.begin().await;
        let payload = ValidateRecoveryCode {
            email: email.to_string(),
            code: code.to_string(),
        };
        let result = self
            .api
            .post_json_public_unit("/auth/validate-recovery-code", &payload, &[StatusCode::OK])
            .await;
        self.settle(&result).await;
        result
    }

    /// Step 3: set the new password using the validated code.
    pub async fn reset_password(&self, email: &str, code: &str, new_password: &str) -> Result<()> {
        self.begin().await;
        let payload = ResetPassword {
            email: email.to_string(),
            code: code.to_string(),
            new_password: new_password.to_string(),
        };
        let result = self
            .api
            .post_json_public_unit("/auth/reset-password", &payload, &[StatusCode::OK])
            .await;
        self.settle(&result).await;
        result
    }
}
