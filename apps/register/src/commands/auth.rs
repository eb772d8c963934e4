//! # Auth Commands
//!
//! Sign-in, sign-up, password reset and sign-out. The session token itself
//! lives in the client's `SessionStore`; these commands only drive it.

use pesatrack_client::{request_password_reset, ApiClient};
use pesatrack_core::validation::SignUpForm;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;

/// Whether a session token is on disk.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub signed_in: bool,
    pub token_path: String,
}

pub async fn sign_in(api: &ApiClient, email: &str, password: &str) -> Result<(), ApiError> {
    debug!(email = %email, "sign_in command");
    api.sign_in(email, password).await?;
    Ok(())
}

/// Returns the backend's confirmation message.
pub async fn sign_up(api: &ApiClient, form: &SignUpForm) -> Result<String, ApiError> {
    debug!(email = %form.email, "sign_up command");
    Ok(api.sign_up(form).await?)
}

pub fn reset_password(email: &str) -> Result<String, ApiError> {
    debug!("reset_password command");
    Ok(request_password_reset(email)?)
}

pub async fn sign_out(api: &ApiClient) -> Result<(), ApiError> {
    debug!("sign_out command");
    Ok(api.sign_out().await?)
}

pub async fn session_status(api: &ApiClient) -> SessionStatus {
    SessionStatus {
        signed_in: api.session().current().await.is_some(),
        token_path: api.session().path().display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pesatrack_client::{ClientConfig, SessionStore};

    fn client_in(dir: &std::path::Path) -> ApiClient {
        let mut config = ClientConfig::default();
        config.api.base_url = "http://127.0.0.1:9/".into();
        ApiClient::new(&config, SessionStore::new(dir.join("token"))).unwrap()
    }

    #[test]
    fn test_reset_password() {
        assert_eq!(
            reset_password("owner@duka.co.ke").unwrap(),
            "A reset link has been sent to owner@duka.co.ke"
        );
        assert_eq!(reset_password("").unwrap_err().code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_sign_in_requires_both_fields() {
        let dir = tempfile::tempdir().unwrap();
        let api = client_in(dir.path());
        let err = sign_in(&api, "owner@duka.co.ke", " ").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(!session_status(&api).await.signed_in);
    }

    #[tokio::test]
    async fn test_sign_out_forgets_token() {
        let dir = tempfile::tempdir().unwrap();
        let api = client_in(dir.path());
        api.session().store("abc123").await.unwrap();
        assert!(session_status(&api).await.signed_in);

        sign_out(&api).await.unwrap();
        assert!(!session_status(&api).await.signed_in);
    }
}
