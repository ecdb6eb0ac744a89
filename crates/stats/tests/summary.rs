//! Aggregations driven by server-shaped JSON, the way repositories feed them.

use api_types::{Money, earning::Earning, transaction::Transaction};

fn earnings_from(raw: &str) -> Vec<Earning> {
    serde_json::from_str(raw).unwrap()
}

fn transactions_from(raw: &str) -> Vec<Transaction> {
    serde_json::from_str(raw).unwrap()
}

#[test]
fn free_salary_from_formatted_wire_amounts() {
    let earnings = earnings_from(
        r#"[{
            "id": "e1", "name": "Salary",
            "generalAmount": "$2,000,000", "amountBudgeted": "$500,000",
            "startDate": "2024-01-01", "endDate": "2024-12-31"
        }]"#,
    );

    let free = stats::free_salary(&earnings[0]);
    assert_eq!(free, Money::from_cents(150_000_000));
    assert_eq!(free.to_string(), "$1,500,000.00");
}

#[test]
fn portfolio_totals_include_malformed_rows_as_zero() {
    let earnings = earnings_from(
        r#"[
            {"id": "e1", "name": "Salary", "generalAmount": "$1,000.00",
             "amountBudgeted": "$250.00", "startDate": "2024-01-01", "endDate": "2024-06-30"},
            {"id": "e2", "name": "Bonus", "generalAmount": "oops",
             "amountBudgeted": "", "startDate": "2024-01-01", "endDate": "2024-06-30"}
        ]"#,
    );

    let totals = stats::totals(&earnings);
    assert_eq!(totals.general, Money::from_cents(100_000));
    assert_eq!(totals.budgeted, Money::from_cents(25_000));
    assert_eq!(totals.free(), Money::from_cents(75_000));
}

#[test]
fn budget_flow_for_the_documented_fixture() {
    let rows = transactions_from(
        r#"[
            {"id": "t1", "description": "Rent", "amount": "-$50,000",
             "date": "2024-02-01", "budgetId": "B1", "categoryId": "c1"},
            {"id": "t2", "description": "Refund", "amount": "$200,000",
             "date": "2024-02-02", "budgetId": "B1", "categoryId": "c1"}
        ]"#,
    );

    let flow = stats::budget_flow(&rows, "B1");
    assert_eq!(flow.income, Money::from_cents(20_000_000));
    assert_eq!(flow.expenses, Money::from_cents(-5_000_000));
    assert!(flow.expenses <= Money::ZERO);
    assert_eq!(flow.net(), Money::from_cents(15_000_000));
}

#[test]
fn shares_for_chart_widgets_never_divide_by_zero() {
    assert_eq!(stats::percentage_share(&[0.0, 0.0]), vec![0.0, 0.0]);
    assert_eq!(stats::percentage_share(&[30.0, 70.0]), vec![30.0, 70.0]);
}
