//! Per-resource repositories: network calls plus a cached local mirror.
//!
//! Every operation follows the same protocol. A missing token fails
//! before any request is built. Otherwise the store's outcome pair is
//! cleared, the call runs, and the result is mirrored into `error()` or
//! `success_message()` as well as returned, so both callers and
//! banner-style presentation see it.

pub use budgets::BudgetsRepo;
pub use categories::CategoriesRepo;
pub use earnings::EarningsRepo;
pub use graphics::GraphicsRepo;
pub use transactions::TransactionsRepo;
pub use user::UserRepo;

mod budgets;
mod categories;
mod earnings;
mod graphics;
mod transactions;
mod user;
