use thiserror::Error;

/// Generic message shown when the server gives no usable reason.
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Everything that can go wrong between pressing submit and rendered results.
///
/// All variants surface to the user the same way (a blocking alert); the
/// distinction exists so tests and logs can tell a bad server payload from a
/// dead network.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Missing file or empty JD text, caught before any network activity.
    #[error("{0}")]
    Validation(String),

    /// The request itself failed or never completed.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response parsed but carried `success: false`.
    #[error("{0}")]
    Application(String),

    /// The response did not match the expected result schema.
    #[error("malformed server response: {0}")]
    MalformedResponse(String),
}

impl SubmitError {
    /// The user-facing alert text: the server-provided reason when there is
    /// one, a generic fallback otherwise.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Validation(msg) | SubmitError::Application(msg) => msg.clone(),
            SubmitError::Transport(_) | SubmitError::MalformedResponse(_) => {
                FALLBACK_ERROR_MESSAGE.to_string()
            }
        }
    }
}
