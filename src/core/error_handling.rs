//! Generic error handling utilities
//!
//! Provides unified fatal-error reporting for the binaries while each
//! layer keeps its own error type.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// When `is_user_actionable()` returns `true`, `user_message()` must return
/// `Some(message)` with a short, actionable message. When it returns `false`,
/// `user_message()` returns `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error carries a message the user can act on
    ///
    /// Examples of user-actionable errors:
    /// - A zero buffer size
    /// - A pipe path that is a regular file
    /// - A missing measurement or configuration file
    ///
    /// Examples of system errors:
    /// - Read failures on an open pipe
    /// - Worker threads that could not be started
    fn is_user_actionable(&self) -> bool;

    /// Returns the specific user message if this is a user-actionable error
    fn user_message(&self) -> Option<&str>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// - User-actionable errors show their specific message
/// - System errors show the operation context plus the error itself
/// - Full debug detail is always available at debug level
///
/// # Examples
/// ```rust
/// # use sensorpipe::core::error_handling::log_error_with_context;
/// # use sensorpipe::queue::BoundedQueue;
/// if let Err(e) = BoundedQueue::<String>::new(0) {
///     // Logs: "FATAL: Buffer size must be greater than 0"
///     log_error_with_context(&e, "Monitor startup");
/// }
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message().filter(|_| error.is_user_actionable()) {
        Some(user_msg) => log::error!("FATAL: {} ({})", user_msg, error),
        None => log::error!("FATAL: {}: {}", operation_context, error),
    }
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
