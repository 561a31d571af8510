//! Common error types and handling for FluffyTeams

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown to command senders when an infrastructure error occurs
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred, see the server log";

/// Common error type for the plugin.
///
/// Every domain failure (unknown team, unknown member, missing spawn,
/// duplicate membership, invalid names) is an `InvalidArgument` whose message
/// is shown to the command sender verbatim. The remaining variants are
/// infrastructure failures that are logged and hidden behind a generic message.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Whether the message can be shown to a player as-is
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// Get the error code used in log records
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Unexpected(_) => "UNEXPECTED_ERROR",
            Error::Database(_) => "DATABASE_ERROR",
            Error::Configuration(_) => "CONFIGURATION_ERROR",
            Error::InvalidArgument(_) => "INVALID_ARGUMENT",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Text to show the command sender.
    ///
    /// Infrastructure errors are logged here with full context so callers
    /// only have to forward the returned text.
    pub fn sender_message(&self) -> String {
        if self.is_user_facing() {
            return self.to_string();
        }

        tracing::error!(error = %self, code = self.error_code(), "Command failed");
        INTERNAL_ERROR_MESSAGE.to_string()
    }
}
