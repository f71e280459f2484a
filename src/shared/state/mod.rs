// Pure UI state, kept free of Dioxus so it can be unit tested

pub mod content_cache;
pub mod editable_field;

pub use content_cache::ContentCache;
pub use editable_field::{EditableField, FieldMode, SnippetCommit};
