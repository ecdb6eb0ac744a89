use api_types::{Money, earning::Earning, transaction::Transaction};

/// Portion of an earning not yet committed to budgets.
///
/// Negative when budgets overrun the earning. The sign passes through
/// untouched; callers decide how to surface an overrun.
///
/// ```rust
/// # use api_types::earning::Earning;
/// let earning: Earning = serde_json::from_str(
///     r#"{"id": "e1", "name": "Salary",
///         "generalAmount": "$2,000,000", "amountBudgeted": "$500,000",
///         "startDate": "2024-01-01", "endDate": "2024-12-31"}"#,
/// )?;
/// assert_eq!(stats::free_salary(&earning).to_string(), "$1,500,000.00");
/// # Ok::<(), serde_json::Error>(())
/// ```
pub fn free_salary(earning: &Earning) -> Money {
    earning.general_amount - earning.amount_budgeted
}

/// Portfolio-wide sums across every earning in a snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EarningTotals {
    pub general: Money,
    pub budgeted: Money,
}

impl EarningTotals {
    /// Free salary across the whole portfolio.
    pub fn free(self) -> Money {
        self.general - self.budgeted
    }
}

pub fn totals(earnings: &[Earning]) -> EarningTotals {
    earnings
        .iter()
        .fold(EarningTotals::default(), |acc, earning| EarningTotals {
            general: acc.general + earning.general_amount,
            budgeted: acc.budgeted + earning.amount_budgeted,
        })
}

/// Signed in/out split of a budget's transactions.
///
/// `income` collects the positive amounts, `expenses` the negative ones,
/// so `expenses` is always `<= 0`. Zero-amount rows count as income.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BudgetFlow {
    pub income: Money,
    pub expenses: Money,
}

impl BudgetFlow {
    /// Spent total as a positive figure, for display beside `income`.
    pub fn expense_magnitude(self) -> Money {
        self.expenses.magnitude()
    }

    /// What the budget keeps once spending is netted off.
    pub fn net(self) -> Money {
        self.income + self.expenses
    }
}

/// Folds the rows belonging to `budget_id` into a [`BudgetFlow`].
///
/// Rows for other budgets are skipped, so an unfiltered snapshot is fine.
pub fn budget_flow(transactions: &[Transaction], budget_id: &str) -> BudgetFlow {
    transactions
        .iter()
        .filter(|tx| tx.budget_id == budget_id)
        .fold(BudgetFlow::default(), |mut flow, tx| {
            if tx.amount >= Money::ZERO {
                flow.income += tx.amount;
            } else {
                flow.expenses += tx.amount;
            }
            flow
        })
}
