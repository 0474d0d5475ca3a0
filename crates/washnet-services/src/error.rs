use thiserror::Error;
use washnet_core::NetworkError;

/// Shown when the backend gives no usable message
pub const GENERIC_SEARCH_ERROR: &str = "Error searching orders. Please try again.";
/// Shown when the search form is submitted without a name
pub const EMPTY_NAME_MESSAGE: &str = "Please enter your name";

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("customer name is required")]
    EmptyName,

    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Non-success status; `message` is the body's `message` field when present
    #[error("order API returned {status}")]
    Api { status: u16, message: Option<String> },

    #[error("invalid order response: {0}")]
    InvalidResponse(String),
}

impl OrderError {
    /// Text for the error banner on the search form.
    pub fn user_message(&self) -> String {
        match self {
            OrderError::EmptyName => EMPTY_NAME_MESSAGE.to_string(),
            OrderError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            _ => GENERIC_SEARCH_ERROR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_wins() {
        let err = OrderError::Api {
            status: 422,
            message: Some("The customer name field is required.".into()),
        };
        assert_eq!(err.user_message(), "The customer name field is required.");
    }

    #[test]
    fn test_generic_fallback() {
        let err = OrderError::Api {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), GENERIC_SEARCH_ERROR);

        let err: OrderError = NetworkError::Timeout.into();
        assert_eq!(err.user_message(), GENERIC_SEARCH_ERROR);
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(OrderError::EmptyName.user_message(), "Please enter your name");
    }
}
