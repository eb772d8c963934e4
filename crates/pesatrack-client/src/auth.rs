//! # Auth Endpoints
//!
//! Sign-in, registration, password reset and sign-out.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Cashier enters email + password                                     │
//! │  2. Both present?  no → ValidationError, nothing sent                   │
//! │  3. POST sign-in                                                        │
//! │       success + sessionId → token stored, register unlocked             │
//! │       otherwise           → AuthFailed(server message)                  │
//! │  4. logout → token file deleted                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Password reset never leaves the register: there is no reset endpoint, so
//! it only validates the address and confirms.

use pesatrack_core::validation::{validate_email, validate_sign_in, validate_sign_up, SignUpForm};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::protocol::{SignInRequest, SignInResponse, SignUpRequest, StatusResponse};

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const SIGN_UP_FAILED: &str = "Sign up failed";

impl ApiClient {
    /// Signs in and keeps the session token. Returns the token.
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> ClientResult<String> {
        validate_sign_in(email, password)?;

        let request = SignInRequest {
            email: email.trim(),
            password,
        };
        let path = self.endpoints().sign_in.clone();

        let body = match self.post_json(&path, Some(&request)).await {
            Ok(body) => body,
            Err(ClientError::HttpStatus { status: 400 | 401 | 403, message }) => {
                warn!(email = %request.email, "Sign-in refused");
                return Err(ClientError::AuthFailed(non_empty_or(message, INVALID_CREDENTIALS)));
            }
            Err(e) => return Err(e),
        };

        let response: SignInResponse = serde_json::from_value(body)?;
        let token = match (response.success, response.session_id) {
            (true, Some(token)) if !token.trim().is_empty() => token,
            (true, _) => {
                return Err(ClientError::InvalidResponse(
                    "sign-in succeeded without a session id".into(),
                ))
            }
            (false, _) => {
                warn!(email = %request.email, "Sign-in refused");
                let message = response.message.unwrap_or_default();
                return Err(ClientError::AuthFailed(non_empty_or(message, INVALID_CREDENTIALS)));
            }
        };

        self.session().store(&token).await?;
        info!(email = %request.email, "Signed in");
        Ok(token)
    }

    /// Registers a new account. Returns the backend's confirmation.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn sign_up(&self, form: &SignUpForm) -> ClientResult<String> {
        validate_sign_up(form)?;

        let request = SignUpRequest {
            name: form.name.trim(),
            id_number: form.id_number.trim(),
            phone: form.phone.trim(),
            email: form.email.trim(),
            password: &form.password,
        };
        let path = self.endpoints().sign_up.clone();

        let body = match self.post_json(&path, Some(&request)).await {
            Ok(body) => body,
            Err(ClientError::HttpStatus { status: 400 | 409, message }) => {
                return Err(ClientError::Backend(non_empty_or(message, SIGN_UP_FAILED)));
            }
            Err(e) => return Err(e),
        };

        let status: StatusResponse = match body {
            Value::Null => StatusResponse::default(),
            other => serde_json::from_value(other)?,
        };
        if let Some(message) = status.failure(SIGN_UP_FAILED) {
            warn!(message = %message, "Sign-up refused");
            return Err(ClientError::Backend(message));
        }
        if status.success != Some(true) {
            return Err(ClientError::InvalidResponse("sign-up reply has no success flag".into()));
        }

        info!("Account registered");
        Ok(status.message.unwrap_or_else(|| "Account created".to_string()))
    }

    /// Forgets the session token.
    pub async fn sign_out(&self) -> ClientResult<()> {
        self.session().clear().await?;
        info!("Signed out");
        Ok(())
    }
}

/// Validates the address and returns the confirmation shown to the user.
pub fn request_password_reset(email: &str) -> ClientResult<String> {
    let email = validate_email(email)?;
    info!(email, "Password reset requested");
    Ok(format!("A reset link has been sent to {}", email))
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
