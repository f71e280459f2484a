pub mod admin_sidebar;
pub mod navbar;

pub use admin_sidebar::AdminSidebar;
pub use navbar::{Footer, Navbar};
