//! # API Error Type
//!
//! Unified error type for register commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Register                           │
//! │                                                                         │
//! │  Shell / CLI                 Command                                    │
//! │  ───────────                 ───────                                    │
//! │                                                                         │
//! │  "add 3"  ──────────────►  Result<T, ApiError>                          │
//! │                                   │                                     │
//! │        CoreError::CartTooLarge ───┤                                     │
//! │        ClientError::Timeout ──────┼──► ApiError { code, message }       │
//! │        ValidationError ───────────┘              │                      │
//! │                                                  ▼                      │
//! │  Shell: prints "[NETWORK_ERROR] Request timed out", keeps running       │
//! │  CLI:   same message on stderr, exit status 1                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pesatrack_client::ClientError;
use pesatrack_core::{CoreError, ValidationError};
use serde::Serialize;

/// Error returned from every command.
///
/// ## Serialization
/// ```json
/// {
///   "code": "SESSION_EXPIRED",
///   "message": "Session expired, please sign in again"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message, shown as is
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Backend unreachable or too slow
    NetworkError,

    /// Form or argument failed validation
    ValidationError,

    /// Sign-in refused
    AuthError,

    /// No session token, or the backend rejected it
    SessionExpired,

    /// Cart or checkout step refused the action
    CartError,

    /// Cash tendered does not cover the total
    PaymentError,

    NotFound,

    /// Backend answered but reported a failure or sent garbage
    BackendError,

    ConfigError,

    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::AuthError => "AUTH_ERROR",
            ErrorCode::SessionExpired => "SESSION_EXPIRED",
            ErrorCode::CartError => "CART_ERROR",
            ErrorCode::PaymentError => "PAYMENT_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::BackendError => "BACKEND_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::LineNotFound(id) => ApiError::not_found("Cart item", &id),
            CoreError::CartTooLarge { .. } | CoreError::EmptyCart => ApiError::cart(message),
            CoreError::InvalidCheckoutStep { .. } => ApiError::cart(message),
            CoreError::QuantityTooLarge { .. } => ApiError::validation(message),
            CoreError::InsufficientTender { .. } => ApiError::new(ErrorCode::PaymentError, message),
            CoreError::UserNotFound(id) => ApiError::not_found("User", &id.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts client errors to API errors.
impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        let message = err.to_string();
        let code = if err.is_transport_error() {
            ErrorCode::NetworkError
        } else if err.needs_sign_in() {
            ErrorCode::SessionExpired
        } else if err.is_config_error() {
            ErrorCode::ConfigError
        } else {
            match &err {
                ClientError::HttpStatus { status: 404, .. } | ClientError::NotFound(_) => {
                    ErrorCode::NotFound
                }
                ClientError::AuthFailed(_) => ErrorCode::AuthError,
                ClientError::Validation(_) => ErrorCode::ValidationError,
                ClientError::SessionStorage(_) => {
                    tracing::error!(error = %message, "Session storage failed");
                    ErrorCode::Internal
                }
                _ => ErrorCode::BackendError,
            }
        };
        ApiError::new(code, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pesatrack_core::Money;

    #[test]
    fn test_core_error_codes() {
        let err: ApiError = CoreError::EmptyCart.into();
        assert_eq!(err.code, ErrorCode::CartError);

        let err: ApiError = CoreError::InsufficientTender {
            total: Money::from_major(250),
            received: Some(Money::from_major(200)),
        }
        .into();
        assert_eq!(err.code, ErrorCode::PaymentError);

        let err: ApiError = CoreError::UserNotFound(9).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "User not found: 9");
    }

    #[test]
    fn test_client_error_codes() {
        let cases = [
            (ClientError::Timeout, ErrorCode::NetworkError),
            (ClientError::NotAuthenticated, ErrorCode::SessionExpired),
            (
                ClientError::HttpStatus { status: 401, message: "Unauthorized".into() },
                ErrorCode::SessionExpired,
            ),
            (
                ClientError::HttpStatus { status: 500, message: "boom".into() },
                ErrorCode::BackendError,
            ),
            (ClientError::AuthFailed("Invalid credentials".into()), ErrorCode::AuthError),
            (ClientError::InvalidUrl("x".into()), ErrorCode::ConfigError),
            (ClientError::ConfigLoadFailed("denied".into()), ErrorCode::ConfigError),
            (ClientError::Network("refused".into()), ErrorCode::NetworkError),
            (ClientError::NotFound("Customer C-9".into()), ErrorCode::NotFound),
            (ClientError::InvalidResponse("not JSON".into()), ErrorCode::BackendError),
            (ClientError::SessionStorage("read-only".into()), ErrorCode::Internal),
        ];
        for (err, code) in cases {
            assert_eq!(ApiError::from(err).code, code);
        }
    }

    #[test]
    fn test_validation_names_the_field() {
        let err: ApiError = ValidationError::required("email").into();
        assert_eq!(err.to_string(), "[VALIDATION_ERROR] email is required");
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::new(ErrorCode::SessionExpired, "Session expired");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "SESSION_EXPIRED");
        assert_eq!(json["message"], "Session expired");
    }
}
