//! Structured logging for the content layer
//!
//! Consistent `operation` / `collection` fields on every repository, seed,
//! submission and auth event, plus a span macro the repository wraps each
//! store call in.

/// Log operations for different parts of the content layer
#[derive(Debug, Clone, Copy)]
pub enum LogOperation {
    ContentRead,
    ContentWrite,
    Fallback,
    Seed,
    Submission,
    Auth,
}

impl LogOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOperation::ContentRead => "content_read",
            LogOperation::ContentWrite => "content_write",
            LogOperation::Fallback => "fallback",
            LogOperation::Seed => "seed",
            LogOperation::Submission => "submission",
            LogOperation::Auth => "auth",
        }
    }
}

/// Log a successful collection read
pub fn log_read(backend: &str, collection: &str, count: usize) {
    tracing::debug!(
        operation = LogOperation::ContentRead.as_str(),
        backend = backend,
        collection = collection,
        record_count = count,
        "Loaded collection"
    );
}

/// Log a read that failed on the primary store
pub fn log_read_error(backend: &str, collection: &str, error: &str) {
    tracing::warn!(
        operation = LogOperation::ContentRead.as_str(),
        backend = backend,
        collection = collection,
        error = error,
        "Failed to load collection"
    );
}

/// Log which source served a read after the primary failed
pub fn log_read_fallback(collection: &str, source: &str) {
    tracing::warn!(
        operation = LogOperation::Fallback.as_str(),
        collection = collection,
        source = source,
        "Serving collection from fallback"
    );
}

/// Log a successful write
pub fn log_write(backend: &str, collection: &str, action: &str) {
    tracing::info!(
        operation = LogOperation::ContentWrite.as_str(),
        backend = backend,
        collection = collection,
        action = action,
        "Collection updated"
    );
}

/// Log a failed write, and whether the local fallback kept the edit
pub fn log_write_error(backend: &str, collection: &str, error: &str, kept_locally: bool) {
    tracing::error!(
        operation = LogOperation::ContentWrite.as_str(),
        backend = backend,
        collection = collection,
        error = error,
        kept_locally = kept_locally,
        "Failed to update collection"
    );
}

/// Log default records written into an empty collection
pub fn log_seed(backend: &str, collection: &str, count: usize) {
    tracing::info!(
        operation = LogOperation::Seed.as_str(),
        backend = backend,
        collection = collection,
        record_count = count,
        "Seeded empty collection with defaults"
    );
}

/// Log a new contact-form submission
pub fn log_submission_received(submission_id: &str) {
    tracing::info!(
        operation = LogOperation::Submission.as_str(),
        submission_id = submission_id,
        "Contact form submission stored"
    );
}

/// Log a patch aimed at a submission that does not exist
pub fn log_submission_missing(submission_id: &str) {
    tracing::warn!(
        operation = LogOperation::Submission.as_str(),
        submission_id = submission_id,
        "Submission not found, update skipped"
    );
}

/// Log sign-in / sign-out / role changes
pub fn log_auth_event(email: &str, event: &str) {
    tracing::info!(
        operation = LogOperation::Auth.as_str(),
        email = email,
        event = event,
        "Auth event"
    );
}

/// Deliver a password reset link through the log; there is no mail transport
pub fn log_reset_link(email: &str, link: &str) {
    tracing::info!(
        operation = LogOperation::Auth.as_str(),
        email = email,
        link = link,
        "Password reset link issued"
    );
}

/// Log a rejected auth attempt
pub fn log_auth_denied(event: &str, reason: &str) {
    tracing::warn!(
        operation = LogOperation::Auth.as_str(),
        event = event,
        reason = reason,
        "Auth denied"
    );
}

/// Macro for creating structured log context
#[macro_export]
macro_rules! log_context {
    ($operation:expr) => {
        tracing::info_span!(
            "naya_cms",
            operation = $operation.as_str()
        )
    };
    ($operation:expr, $collection:expr) => {
        tracing::info_span!(
            "naya_cms",
            operation = $operation.as_str(),
            collection = $collection
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_operation_as_str() {
        assert_eq!(LogOperation::ContentRead.as_str(), "content_read");
        assert_eq!(LogOperation::ContentWrite.as_str(), "content_write");
        assert_eq!(LogOperation::Fallback.as_str(), "fallback");
        assert_eq!(LogOperation::Seed.as_str(), "seed");
        assert_eq!(LogOperation::Submission.as_str(), "submission");
        assert_eq!(LogOperation::Auth.as_str(), "auth");
    }

    #[test]
    fn test_log_context_builds_span() {
        let _span = crate::log_context!(LogOperation::ContentWrite, "services");
    }
}
