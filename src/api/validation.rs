//! Input shape checks that run before any request is sent.

use crate::api::error::ApiError;
use crate::api::LoginCredentials;

pub const USERNAME_MAX_CHARS: usize = 100;
pub const PASSWORD_MAX_CHARS: usize = 255;
pub const ROOM_NAME_MAX_CHARS: usize = 100;

/// Checks credentials and returns the payload that should be sent.
///
/// The username is trimmed; the password is sent exactly as entered.
pub fn validate_credentials(credentials: &LoginCredentials) -> Result<LoginCredentials, ApiError> {
    let username = credentials.username.trim();
    if username.is_empty() {
        return Err(ApiError::Validation("Username is required".to_string()));
    }
    if username.chars().count() > USERNAME_MAX_CHARS {
        return Err(ApiError::Validation(format!(
            "Username must be at most {USERNAME_MAX_CHARS} characters"
        )));
    }

    if credentials.password.is_empty() {
        return Err(ApiError::Validation("Password is required".to_string()));
    }
    if credentials.password.chars().count() > PASSWORD_MAX_CHARS {
        return Err(ApiError::Validation(format!(
            "Password must be at most {PASSWORD_MAX_CHARS} characters"
        )));
    }

    Ok(LoginCredentials {
        username: username.to_string(),
        password: credentials.password.clone(),
    })
}

/// Returns the trimmed room name, or a validation error.
pub fn validate_room_name(name: &str) -> Result<String, ApiError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation("Room name is required".to_string()));
    }
    if trimmed.chars().count() > ROOM_NAME_MAX_CHARS {
        return Err(ApiError::Validation(format!(
            "Room name must be at most {ROOM_NAME_MAX_CHARS} characters"
        )));
    }
    Ok(trimmed.to_string())
}
