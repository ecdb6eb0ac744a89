//! Client-side data layer for the Financore backend.
//!
//! The crate is a thin client: every piece of state it holds mirrors the
//! REST API at the configured base URL, and nothing here renders UI.
//! Repositories cache the last known server state per resource and gate
//! every call on the session holding a bearer token; `stats` derives
//! money figures from their snapshots.

use std::path::PathBuf;

use reqwest::Client;

pub use auth::AuthFlow;
pub use claims::{TokenClaims, decode_claims};
pub use error::{ClientError, Result, ServerErrorKind};
pub use repo::{
    BudgetsRepo, CategoriesRepo, EarningsRepo, GraphicsRepo, TransactionsRepo, UserRepo,
};
pub use session::{RememberedCredentials, SessionStore};
pub use store::{Record, Store};
pub use upload::UploadFile;

mod auth;
mod claims;
mod error;
mod http;
mod repo;
mod session;
mod store;
mod upload;

pub const DEFAULT_BASE_URL: &str = "https://api-financore.onrender.com/api";

const DEFAULT_SESSION_PATH: &str = "config/financore_session.json";

/// One authenticated session's worth of handles: the auth flow plus a
/// repository per resource, all sharing the same HTTP client and token.
#[derive(Clone)]
pub struct Financore {
    session: SessionStore,
    auth: AuthFlow,
    earnings: EarningsRepo,
    budgets: BudgetsRepo,
    categories: CategoriesRepo,
    transactions: TransactionsRepo,
    user: UserRepo,
    graphics: GraphicsRepo,
}

impl Financore {
    pub fn builder() -> FinancoreBuilder {
        FinancoreBuilder::default()
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn auth(&self) -> &AuthFlow {
        &self.auth
    }

    pub fn earnings(&self) -> &EarningsRepo {
        &self.earnings
    }

    pub fn budgets(&self) -> &BudgetsRepo {
        &self.budgets
    }

    pub fn categories(&self) -> &CategoriesRepo {
        &self.categories
    }

    pub fn transactions(&self) -> &TransactionsRepo {
        &self.transactions
    }

    pub fn user(&self) -> &UserRepo {
        &self.user
    }

    pub fn graphics(&self) -> &GraphicsRepo {
        &self.graphics
    }
}

#[derive(Debug, Default)]
pub struct FinancoreBuilder {
    base_url: Option<String>,
    session_path: Option<PathBuf>,
}

impl FinancoreBuilder {
    pub fn base_url(mut self, base_url: &str) -> FinancoreBuilder {
        self.base_url = Some(base_url.to_string());
        self
    }

    pub fn session_path(mut self, path: impl Into<PathBuf>) -> FinancoreBuilder {
        self.session_path = Some(path.into());
        self
    }

    pub fn build(self) -> Result<Financore> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let session_path = self
            .session_path
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_PATH));

        let session = SessionStore::load_or_empty(session_path);
        let http = Client::builder().build()?;
        let api = http::ApiClient::new(http, base_url, session.clone());

        Ok(Financore {
            session,
            auth: AuthFlow::new(api.clone()),
            earnings: EarningsRepo::new(api.clone()),
            budgets: BudgetsRepo::new(api.clone()),
            categories: CategoriesRepo::new(api.clone()),
            transactions: TransactionsRepo::new(api.clone()),
            user: UserRepo::new(api.clone()),
            graphics: GraphicsRepo::new(api),
        })
    }
}
