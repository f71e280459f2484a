// Pure domain services (no I/O) shared by the admin UI and the server

pub mod dashboard;
pub mod list_editing;
pub mod validation;

pub use dashboard::{DashboardSummary, RECENT_SUBMISSIONS};
pub use list_editing::{next_display_order, upsert_item};
pub use validation::{is_valid_email, is_valid_url, validate_portfolio_item, validate_service, ContactFormInput};
