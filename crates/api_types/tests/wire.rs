use api_types::{
    DataEnvelope, Money,
    auth::LoginResponse,
    budget::{Budget, BudgetPatch},
    earning::Earning,
    transaction::Transaction,
    user::UserPatch,
};

#[test]
fn earning_deserializes_from_server_json() {
    let raw = r#"{
        "id": "e1",
        "name": "Salary",
        "generalAmount": "$2,000,000",
        "amountBudgeted": "$500,000",
        "startDate": "2024-01-01",
        "endDate": "2024-12-31",
        "createdAt": "2024-01-01T10:00:00Z"
    }"#;

    let earning: Earning = serde_json::from_str(raw).unwrap();
    assert_eq!(earning.name, "Salary");
    assert_eq!(earning.general_amount.cents(), 200_000_000);
    assert_eq!(earning.amount_budgeted.cents(), 50_000_000);
    assert!(earning.created_at.is_some());
    assert!(earning.updated_at.is_none());
}

#[test]
fn malformed_amount_degrades_to_zero_instead_of_failing_the_row() {
    let raw = r#"{
        "id": "e2",
        "name": "Bonus",
        "generalAmount": "not-a-number",
        "amountBudgeted": "",
        "startDate": "2024-01-01",
        "endDate": "2024-02-01"
    }"#;

    let earning: Earning = serde_json::from_str(raw).unwrap();
    assert_eq!(earning.general_amount, Money::ZERO);
    assert_eq!(earning.amount_budgeted, Money::ZERO);
}

#[test]
fn budget_embeds_named_refs() {
    let raw = r#"{
        "id": "b1",
        "name": "Groceries",
        "description": "Monthly food",
        "amount": 250000,
        "startDate": "2024-01-01",
        "endDate": "2024-03-01",
        "category": {"id": "c1", "name": "Food"},
        "earning": {"id": "e1", "name": "Salary"},
        "user": {"id": "u1", "name": "Ada"}
    }"#;

    let budget: Budget = serde_json::from_str(raw).unwrap();
    assert_eq!(budget.category.name, "Food");
    assert_eq!(budget.earning.id, "e1");
    assert_eq!(budget.amount, 250_000.0);
}

#[test]
fn transaction_amount_keeps_sign() {
    let raw = r#"{
        "id": "t1",
        "description": "Rent",
        "amount": "-$50,000",
        "date": "2024-02-01",
        "budgetId": "B1",
        "categoryId": "c1"
    }"#;

    let tx: Transaction = serde_json::from_str(raw).unwrap();
    assert_eq!(tx.amount.cents(), -5_000_000);
    assert_eq!(tx.budget_id, "B1");
    assert_eq!(serde_json::to_value(tx.amount).unwrap(), "-$50,000.00");
}

#[test]
fn login_response_tolerates_missing_token() {
    let present: LoginResponse = serde_json::from_str(r#"{"accessToken": "abc"}"#).unwrap();
    assert_eq!(present.access_token.as_deref(), Some("abc"));

    let absent: LoginResponse = serde_json::from_str(r#"{}"#).unwrap();
    assert!(absent.access_token.is_none());
}

#[test]
fn envelope_unwraps_created_records() {
    let raw = r#"{"data": {"id": "c9", "name": "Travel"}}"#;
    let body: DataEnvelope<api_types::category::Category> = serde_json::from_str(raw).unwrap();
    assert_eq!(body.data.id, "c9");
}

#[test]
fn patches_serialize_only_present_fields() {
    let patch = BudgetPatch {
        name: Some("Rent".to_string()),
        ..BudgetPatch::default()
    };
    assert_eq!(
        serde_json::to_value(&patch).unwrap(),
        serde_json::json!({"name": "Rent"})
    );

    let empty = UserPatch::default();
    assert_eq!(serde_json::to_value(&empty).unwrap(), serde_json::json!({}));
}
