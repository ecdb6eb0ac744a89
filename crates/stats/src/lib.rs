//! Aggregations over repository snapshots.
//!
//! Everything here is pure and synchronous. Repositories own the data;
//! these functions only fold over what a snapshot already holds, so they
//! can run on every redraw without touching the network.

pub use shares::percentage_share;
pub use summary::{BudgetFlow, EarningTotals, budget_flow, free_salary, totals};

mod shares;
mod summary;
