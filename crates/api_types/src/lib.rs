use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub use money::{Money, MoneyError};

mod money;

/// Envelope the backend wraps around create/detail responses (`{"data": …}`).
///
/// List endpoints return bare arrays; only single-record bodies are nested.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Embedded `{id, name}` reference nested inside response records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: String,
    pub name: String,
}

pub mod auth {
    use super::*;

    /// Registration payload. Sent as multipart form fields, with an optional
    /// `file` part for the profile picture; never as JSON.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct RegisterUser {
        pub name: String,
        pub email: String,
        pub password: String,
        pub phone: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub email: String,
        pub password: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct LoginResponse {
        /// Bearer token. May be absent even on a success status; callers must
        /// treat that as a failed login, not a silent success.
        #[serde(default)]
        pub access_token: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ForgotPassword {
        pub email: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ValidateRecoveryCode {
        pub email: String,
        /// Six-digit code delivered by email.
        pub code: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResetPassword {
        pub email: String,
        pub code: String,
        pub new_password: String,
    }
}

pub mod earning {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Earning {
        pub id: String,
        pub name: String,
        /// Currency string on the wire (`"$1,000.00"`).
        pub general_amount: Money,
        /// Server-maintained running total of budgets created against this
        /// earning. Informational; never recomputed client-side.
        pub amount_budgeted: Money,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub created_at: Option<DateTime<Utc>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub updated_at: Option<DateTime<Utc>>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct EarningNew {
        pub name: String,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        /// Sent as a bare number; the server formats it into a currency
        /// string on the way back.
        pub general_amount: f64,
    }
}

pub mod budget {
    use super::*;

    /// Budget as returned by the server: category/earning/user are embedded
    /// `{id, name}` refs. Create payloads send flat ids instead.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Budget {
        pub id: String,
        pub name: String,
        pub description: String,
        pub amount: f64,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        pub category: NamedRef,
        pub earning: NamedRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub user: Option<NamedRef>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetNew {
        pub name: String,
        pub description: String,
        pub amount: f64,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        pub category_id: String,
        pub earning_id: String,
    }

    /// Partial update; only present fields are sent and merged.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetPatch {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub amount: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub start_date: Option<NaiveDate>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub end_date: Option<NaiveDate>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub earning_id: Option<String>,
    }
}

pub mod category {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Category {
        pub id: String,
        pub name: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub name: String,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Transaction {
        pub id: String,
        pub description: String,
        /// Signed: positive = income-like credit, negative = expense.
        pub amount: Money,
        pub date: NaiveDate,
        pub budget_id: String,
        pub category_id: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionNew {
        pub description: String,
        pub amount: Money,
        pub date: NaiveDate,
        pub budget_id: String,
        pub category_id: String,
    }
}

pub mod user {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct User {
        pub id: String,
        pub name: String,
        pub email: String,
        pub phone: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub profile_picture: Option<String>,
    }

    /// Profile update; sent as multipart form fields, with an optional
    /// `file` part for a new picture. Absent fields are left untouched.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct UserPatch {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub email: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub phone: Option<String>,
    }
}
