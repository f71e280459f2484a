// Admin screens mounted under /admin (see `AdminLayout`)

mod contact_info;
mod content;
mod dashboard;
mod partners;
mod portfolio;
mod services;
mod submissions;
mod users;

pub use contact_info::AdminContactInfo;
pub use content::AdminContent;
pub use dashboard::AdminDashboard;
pub use partners::AdminPartners;
pub use portfolio::AdminPortfolio;
pub use services::AdminServices;
pub use submissions::AdminSubmissions;
pub use users::AdminUsers;
