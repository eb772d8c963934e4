//! # Error Types
//!
//! Domain-specific error types for pesatrack-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pesatrack-core errors (this file)                                     │
//! │  ├── CoreError        - Cart / checkout / roster rule violations       │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  pesatrack-client errors (separate crate)                              │
//! │  └── ClientError      - Transport, backend and config failures         │
//! │                                                                         │
//! │  Register app errors                                                   │
//! │  └── ApiError         - What the cashier sees (code + message)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → alert                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No cart line exists for the product.
    #[error("Product {0} is not in the cart")]
    LineNotFound(String),

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Checkout was started on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cash received does not cover the order total.
    ///
    /// ## User Workflow
    /// ```text
    /// Total: Kshs. 250.00
    ///      │
    ///      ▼
    /// Amount received: "200"
    ///      │
    ///      ▼
    /// InsufficientTender { total: 250, received: Some(200) }
    ///      │
    ///      ▼
    /// "Complete Purchase" refused, balance stays hidden
    /// ```
    #[error("Amount received {} does not cover total {total}", describe_received(.received))]
    InsufficientTender {
        total: Money,
        received: Option<Money>,
    },

    /// The checkout wizard cannot perform the action from its current step.
    #[error("Cannot {action} while checkout is at {step}")]
    InvalidCheckoutStep { step: String, action: String },

    /// Staff user id not in the roster.
    #[error("User not found: {0}")]
    UserNotFound(u64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

fn describe_received(received: &Option<Money>) -> String {
    received
        .map(|m| m.to_string())
        .unwrap_or_else(|| "(none)".to_string())
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any request is sent or any state is mutated.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (amount, email, date, time).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Two fields that must agree do not.
    #[error("{field} does not match")]
    Mismatch { field: String },
}

impl ValidationError {
    /// Shorthand for the most common failure: an empty form field.
    pub fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::QuantityTooLarge {
            requested: 1000,
            max: 999,
        };
        assert_eq!(err.to_string(), "Quantity 1000 exceeds maximum allowed (999)");

        let err = CoreError::LineNotFound("42".to_string());
        assert_eq!(err.to_string(), "Product 42 is not in the cart");
    }

    #[test]
    fn test_insufficient_tender_message() {
        let err = CoreError::InsufficientTender {
            total: Money::from_major(250),
            received: Some(Money::from_major(200)),
        };
        assert_eq!(
            err.to_string(),
            "Amount received Kshs. 200.00 does not cover total Kshs. 250.00"
        );

        let err = CoreError::InsufficientTender {
            total: Money::from_major(250),
            received: None,
        };
        assert!(err.to_string().contains("(none)"));
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("email").to_string(), "email is required");

        let err = ValidationError::Mismatch {
            field: "confirm password".to_string(),
        };
        assert_eq!(err.to_string(), "confirm password does not match");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("name").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
