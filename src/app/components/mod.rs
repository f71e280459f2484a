pub mod card;
pub mod common;
pub mod contact_form;
pub mod delete_button;
pub mod edit_mode_toggle;
pub mod editable_text;

pub use card::{Card, StatCard};
pub use common::{
    join_lines, optional, parse_lines, parse_tags, ErrorMessage, LoadingText, Notice, NoticeBanner,
    NoticeKind,
};
pub use contact_form::{ContactForm, FormField};
pub use delete_button::DeleteButton;
pub use edit_mode_toggle::EditModeToggle;
pub use editable_text::EditableText;
