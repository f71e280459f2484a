//! Inline edit state for one snippet binding
//!
//! `Viewing -> Editing -> Saving -> Viewing`. A failed save drops back to
//! `Editing` with the draft intact and the error recorded.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldMode {
    #[default]
    Viewing,
    Editing,
    Saving,
}

/// The write a save should perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetCommit {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditableField {
    key: String,
    mode: FieldMode,
    draft: String,
    error: Option<String>,
}

impl EditableField {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn mode(&self) -> FieldMode {
        self.mode
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.mode == FieldMode::Editing
    }

    pub fn is_saving(&self) -> bool {
        self.mode == FieldMode::Saving
    }

    /// Copy the currently displayed value into the draft
    pub fn begin_edit(&mut self, resolved_value: &str) {
        if self.mode == FieldMode::Viewing {
            self.draft = resolved_value.to_string();
            self.error = None;
            self.mode = FieldMode::Editing;
        }
    }

    pub fn update_draft(&mut self, text: impl Into<String>) {
        if self.mode == FieldMode::Editing {
            self.draft = text.into();
        }
    }

    /// Discard the draft without writing
    pub fn cancel(&mut self) {
        if self.mode == FieldMode::Editing {
            self.reset();
        }
    }

    /// Enter `Saving` and hand back the write to perform
    pub fn begin_save(&mut self) -> Option<SnippetCommit> {
        if self.mode != FieldMode::Editing {
            return None;
        }
        self.mode = FieldMode::Saving;
        self.error = None;
        Some(SnippetCommit {
            key: self.key.clone(),
            value: self.draft.clone(),
        })
    }

    pub fn finish_save(&mut self, result: Result<(), String>) {
        if self.mode != FieldMode::Saving {
            return;
        }
        match result {
            Ok(()) => self.reset(),
            Err(e) => {
                self.mode = FieldMode::Editing;
                self.error = Some(e);
            }
        }
    }

    /// Turning global edit mode off discards an open draft.
    /// An in-flight save is left to finish.
    pub fn on_edit_mode_changed(&mut self, edit_mode: bool) {
        if !edit_mode && self.mode == FieldMode::Editing {
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.mode = FieldMode::Viewing;
        self.draft.clear();
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editing(value: &str) -> EditableField {
        let mut field = EditableField::new("hero.title");
        field.begin_edit(value);
        field
    }

    #[test]
    fn test_begin_edit_copies_resolved_value() {
        let field = editing("Welcome");
        assert_eq!(field.mode(), FieldMode::Editing);
        assert_eq!(field.draft(), "Welcome");
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut field = editing("Welcome");
        field.update_draft("Changed");
        field.cancel();
        assert_eq!(field.mode(), FieldMode::Viewing);
        assert_eq!(field.draft(), "");
    }

    #[test]
    fn test_successful_save_returns_to_viewing() {
        let mut field = editing("Welcome");
        field.update_draft("Hello");

        let commit = field.begin_save().unwrap();
        assert_eq!(commit, SnippetCommit { key: "hero.title".into(), value: "Hello".into() });
        assert!(field.is_saving());

        // No second commit while one is in flight
        assert!(field.begin_save().is_none());
        field.update_draft("ignored");

        field.finish_save(Ok(()));
        assert_eq!(field.mode(), FieldMode::Viewing);
    }

    #[test]
    fn test_failed_save_keeps_draft_and_error() {
        let mut field = editing("Welcome");
        field.update_draft("Hello");
        field.begin_save();
        field.finish_save(Err("Failed to update content".to_string()));

        assert!(field.is_editing());
        assert_eq!(field.draft(), "Hello");
        assert_eq!(field.error(), Some("Failed to update content"));

        // Retry clears the error
        field.begin_save();
        assert_eq!(field.error(), None);
    }

    #[test]
    fn test_leaving_edit_mode_discards_draft_but_not_inflight_save() {
        let mut field = editing("Welcome");
        field.on_edit_mode_changed(false);
        assert_eq!(field.mode(), FieldMode::Viewing);

        let mut saving = editing("Welcome");
        saving.begin_save();
        saving.on_edit_mode_changed(false);
        assert!(saving.is_saving());
    }

    #[test]
    fn test_begin_edit_ignored_unless_viewing() {
        let mut field = editing("Welcome");
        field.update_draft("Draft");
        field.begin_edit("Other");
        assert_eq!(field.draft(), "Draft");
    }
}
