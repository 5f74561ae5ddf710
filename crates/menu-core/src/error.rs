//! Error Types
//!
//! Menu-side failures share one taxonomy so the UI can turn any of them into a
//! status message. Stamp-card failures are separate; the two subsystems never
//! meet.

/// Common result type for menu operations
pub type MenuResult<T> = Result<T, MenuError>;

/// Menu editing and remote storage errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    /// Bad form input; nothing was sent to the remote
    #[error("invalid input: {0}")]
    Validation(String),

    /// Credential rejected by the remote
    #[error("authentication failed: {0}")]
    AuthFailure(String),

    /// The file changed since it was read (stale SHA)
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Network or server failure
    #[error("transport error: {0}")]
    Transport(String),

    /// Remote content is not a menu document
    #[error("invalid menu document: {0}")]
    InvalidDocument(String),

    #[error("configuration error: {0}")]
    Config(String),

    /// Another mutation is still in flight
    #[error("another change is still being saved")]
    Busy,
}

impl MenuError {
    /// Message shown in the admin status region
    pub fn user_message(&self) -> String {
        match self {
            MenuError::Validation(msg) => msg.clone(),
            MenuError::AuthFailure(_) => {
                "The repository token was rejected. Check the settings.".to_string()
            }
            MenuError::Conflict(_) => {
                "The menu changed since it was loaded. Reload and redo the change.".to_string()
            }
            MenuError::Busy => "Please wait for the current save to finish.".to_string(),
            other => format!("Error: {}", other),
        }
    }
}

impl From<serde_json::Error> for MenuError {
    fn from(e: serde_json::Error) -> Self {
        MenuError::InvalidDocument(e.to_string())
    }
}

impl From<reqwest::Error> for MenuError {
    fn from(e: reqwest::Error) -> Self {
        MenuError::Transport(e.to_string())
    }
}

/// Loyalty stamp card errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StampError {
    #[error("wrong staff code")]
    WrongPin,

    /// Award attempted without a fresh staff code
    #[error("staff code required before adding a stamp")]
    NotAuthorized,

    #[error("card is full")]
    CardFull,

    #[error("could not save stamps: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message_asks_for_reload() {
        let msg = MenuError::Conflict("sha mismatch".into()).user_message();
        assert!(msg.contains("Reload"));
    }

    #[test]
    fn test_json_error_maps_to_invalid_document() {
        let err: MenuError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, MenuError::InvalidDocument(_)));
    }
}
