pub mod admin;
pub mod contact;
pub mod home;
pub mod login;
pub mod routes;

pub use contact::Contact;
pub use home::Home;
pub use login::Login;
pub use routes::{App, Route};
