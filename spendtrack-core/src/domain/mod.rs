//! Transport-level domain models
//!
//! Every type here is a wire contract with the REST backend, not an owned
//! entity with a lifecycle of its own. Decoding is deliberately tolerant:
//! optional fields default, amounts coerce from strings or numbers.

pub mod analytics;
pub mod engagement;
pub mod planning;
pub mod result;
pub mod transaction;
pub mod user;

pub use analytics::{
    CategoryStats, DashboardStats, HealthStatus, MonthlyStats, SpendingTrend, TotalsByKey,
};
pub use engagement::{Acknowledgment, Alert, Badge, Report, Tip};
pub use planning::{
    Budget, BudgetForm, Category, CategoryForm, EmergencyFund, EmergencyFundForm, Goal, GoalForm,
    Insurance, InsuranceForm, LinkedAccount, LinkedAccountForm,
};
pub use result::{ApiResult, Error, Paginated, Result};
pub use transaction::{
    Transaction, TransactionFilters, TransactionForm, TransactionPatch, TransactionType,
    UploadOutcome,
};
pub use user::{AuthState, ProfileUpdate, User, UserPreferences};
