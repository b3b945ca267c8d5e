use serde::{Deserialize, Serialize};

pub mod client;
pub mod error;
pub mod validation;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: u64,
    pub username: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthUser>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatRoom {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: u64,
    pub room_id: u64,
    pub sender: String,
    pub content: String,
    pub timestamp: String,
}

#[derive(Serialize)]
pub(crate) struct RoomPayload<'a> {
    pub name: &'a str,
}

// Login responses are decoded loosely first so that a missing token is
// reported as a protocol error rather than a generic decode failure. The
// user object is optional and never fails the login on its own.
#[derive(Deserialize)]
pub(crate) struct RawAuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}
