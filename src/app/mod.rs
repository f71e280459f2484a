pub mod components;
pub mod layouts;
pub mod pages;

// Re-export the site App
pub use pages::App;
