//! HTTP client for the chat room backend.
//!
//! Every public method issues at most one request and turns the outcome into
//! either a typed value or an [`ApiError`]. Nothing is retried here; retry
//! policy belongs to the caller.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::error::ApiError;
use crate::api::validation::{validate_credentials, validate_room_name};
use crate::api::{AuthResponse, AuthUser, ChatRoom, LoginCredentials, RawAuthResponse, RoomPayload};
use crate::core::session::Session;
use crate::core::storage::{SessionStorage, AUTH_TOKEN_KEY, USERNAME_KEY};
use crate::utils::url::{construct_api_url, normalize_base_url};

const LOGIN_FAILED: &str = "Login failed";
const FETCH_ROOMS_FAILED: &str = "Failed to fetch chat rooms";
const CREATE_ROOM_FAILED: &str = "Failed to create chat room";
const UPDATE_ROOM_FAILED: &str = "Failed to update chat room";
const DELETE_ROOM_FAILED: &str = "Failed to delete chat room";
const ROOM_DETAIL_FAILED: &str = "Failed to fetch chat room detail";

/// Fields checked, in order, when looking for a human readable message in an
/// error body.
const SERVER_MESSAGE_FIELDS: [&str; 5] = ["detail", "message", "error", "non_field_errors", "name"];

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
    storage: Arc<dyn SessionStorage>,
}

impl ApiClient {
    pub fn new(base_url: &str, storage: Arc<dyn SessionStorage>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url, storage)
    }

    /// Builds a client around an existing `reqwest::Client`.
    ///
    /// The persisted token, if any, is loaded once here.
    pub fn with_http_client(
        http: reqwest::Client,
        base_url: &str,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        let token = storage.get(AUTH_TOKEN_KEY).unwrap_or_else(|err| {
            warn!(error = %err, "Could not read persisted session token");
            None
        });

        Self {
            http,
            base_url: normalize_base_url(base_url),
            session: Session::new(token),
            storage,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn storage(&self) -> &Arc<dyn SessionStorage> {
        &self.storage
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = construct_api_url(&self.base_url, endpoint);
        debug!(method = %method, url = %url, "Sending API request");
        self.http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
    }

    fn authed_request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let request = self.request(method, endpoint);
        match self.session.authorization() {
            Some(value) => request.header(AUTHORIZATION, value),
            None => request,
        }
    }

    pub async fn login(&mut self, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError> {
        let credentials = validate_credentials(credentials)?;

        let response = send(self.request(Method::POST, "login/").json(&credentials)).await?;
        if !response.status().is_success() {
            return Err(failure_with_server_message(response, LOGIN_FAILED).await);
        }

        let raw: RawAuthResponse = decode(response).await?;
        let token = raw
            .token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Protocol("login response did not include a token".into()))?;

        self.session.set_token(token.clone());
        // The in-memory session is usable even when persisting it fails.
        if let Err(err) = self.storage.set(AUTH_TOKEN_KEY, &token) {
            warn!(error = %err, "Could not persist session token");
        }
        debug!(username = %credentials.username, "Login succeeded");

        let user = raw.user.and_then(|value| {
            serde_json::from_value::<AuthUser>(value)
                .map_err(|err| warn!(error = %err, "Ignoring unrecognised user in login response"))
                .ok()
        });

        Ok(AuthResponse { token, user })
    }

    /// Ends the session locally and tells the server about it.
    ///
    /// The local session is always cleared, even when the server cannot be
    /// reached or rejects the request.
    pub async fn logout(&mut self) {
        match self.authed_request(Method::POST, "logout/").send().await {
            Ok(response) if response.status().is_success() => debug!("Logout acknowledged"),
            Ok(response) => warn!(
                status = %response.status(),
                "Logout rejected by server; clearing local session anyway"
            ),
            Err(err) => warn!(
                error = %err,
                "Logout request failed; clearing local session anyway"
            ),
        }
        self.clear_local_session();
    }

    fn clear_local_session(&mut self) {
        self.session.clear();
        for key in [AUTH_TOKEN_KEY, USERNAME_KEY] {
            if let Err(err) = self.storage.remove(key) {
                warn!(key, error = %err, "Could not remove persisted session value");
            }
        }
    }

    pub async fn get_chat_rooms(&self) -> Result<Vec<ChatRoom>, ApiError> {
        let response = send(self.authed_request(Method::GET, "chat_rooms/")).await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            return Err(failure_with_server_message(response, FETCH_ROOMS_FAILED).await);
        }
        decode(response).await
    }

    pub async fn create_chat_room(&self, name: &str) -> Result<ChatRoom, ApiError> {
        let name = validate_room_name(name)?;
        let request = self
            .authed_request(Method::POST, "chat_rooms/")
            .json(&RoomPayload { name: &name });

        let response = send(request).await?;
        if !response.status().is_success() {
            return Err(failure_with_server_message(response, CREATE_ROOM_FAILED).await);
        }
        decode(response).await
    }

    pub async fn update_chat_room(&self, id: u64, name: &str) -> Result<ChatRoom, ApiError> {
        let name = validate_room_name(name)?;
        let request = self
            .authed_request(Method::PUT, &format!("chat_rooms/{id}/"))
            .json(&RoomPayload { name: &name });

        let response = send(request).await?;
        if !response.status().is_success() {
            return Err(failure_with_server_message(response, UPDATE_ROOM_FAILED).await);
        }
        decode(response).await
    }

    pub async fn delete_chat_room(&self, id: u64) -> Result<(), ApiError> {
        let response = send(self.authed_request(Method::DELETE, &format!("chat_rooms/{id}/"))).await?;
        if !response.status().is_success() {
            return Err(generic_failure(response.status(), DELETE_ROOM_FAILED));
        }
        Ok(())
    }

    pub async fn get_chat_room_detail(&self, id: u64) -> Result<ChatRoom, ApiError> {
        // The backend routes detail reads without a trailing slash.
        let response = send(self.authed_request(Method::GET, &format!("chat_rooms/{id}"))).await?;
        if !response.status().is_success() {
            return Err(generic_failure(response.status(), ROOM_DETAIL_FAILED));
        }
        decode(response).await
    }
}

async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    request.send().await.map_err(ApiError::Connectivity)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = response.bytes().await.map_err(ApiError::Connectivity)?;
    serde_json::from_slice(&body).map_err(|err| ApiError::Protocol(err.to_string()))
}

fn generic_failure(status: StatusCode, fallback: &str) -> ApiError {
    ApiError::Request {
        status,
        message: fallback.to_string(),
    }
}

async fn failure_with_server_message(response: Response, fallback: &str) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = extract_server_message(&body).unwrap_or_else(|| fallback.to_string());
    debug!(status = %status, message = %message, "API request rejected");
    ApiError::Request { status, message }
}

/// Pulls a human readable message out of an error body, if there is one.
pub fn extract_server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match &value {
        Value::String(text) => non_blank(text),
        Value::Object(fields) => SERVER_MESSAGE_FIELDS
            .iter()
            .filter_map(|field| fields.get(*field))
            .find_map(message_from_value),
        _ => None,
    }
}

fn message_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => non_blank(text),
        Value::Array(items) => items.iter().find_map(message_from_value),
        _ => None,
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
