use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::api::LoginCredentials;
use crate::core::storage::USERNAME_KEY;

/// The authentication collaborator a login form talks to.
#[async_trait]
pub trait AuthContext: Send {
    type Error: fmt::Display + Send;

    async fn login(&mut self, credentials: LoginCredentials) -> Result<(), Self::Error>;
    async fn logout(&mut self);
    fn is_authenticated(&self) -> bool;
    fn username(&self) -> Option<&str>;
    fn is_loading(&self) -> bool;
}

/// Shared view of whether an authentication request is in flight.
///
/// The context holds `&mut self` for the whole request, so observers keep a
/// clone of this handle instead of asking the context.
#[derive(Debug, Clone, Default)]
pub struct LoadingHandle(Arc<AtomicBool>);

impl LoadingHandle {
    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn set(&self, loading: bool) {
        self.0.store(loading, Ordering::Release);
    }
}

/// [`AuthContext`] backed by the HTTP API client.
///
/// Remembers the last username that logged in successfully, both in memory
/// and in the client's session storage.
pub struct ApiAuthContext {
    client: ApiClient,
    username: Option<String>,
    loading: LoadingHandle,
}

impl ApiAuthContext {
    pub fn new(client: ApiClient) -> Self {
        let username = if client.is_authenticated() {
            client.storage().get(USERNAME_KEY).unwrap_or_else(|err| {
                warn!(error = %err, "Could not read persisted username");
                None
            })
        } else {
            None
        };

        Self {
            client,
            username,
            loading: LoadingHandle::default(),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn loading_handle(&self) -> LoadingHandle {
        self.loading.clone()
    }
}

#[async_trait]
impl AuthContext for ApiAuthContext {
    type Error = ApiError;

    async fn login(&mut self, credentials: LoginCredentials) -> Result<(), ApiError> {
        self.loading.set(true);
        let result = self.client.login(&credentials).await;
        self.loading.set(false);

        let response = result?;
        let username = response
            .user
            .map(|user| user.username)
            .unwrap_or_else(|| credentials.username.trim().to_string());
        if let Err(err) = self.client.storage().set(USERNAME_KEY, &username) {
            warn!(error = %err, "Could not persist username");
        }
        self.username = Some(username);
        Ok(())
    }

    async fn logout(&mut self) {
        self.loading.set(true);
        self.client.logout().await;
        self.loading.set(false);
        self.username = None;
    }

    fn is_authenticated(&self) -> bool {
        self.client.is_authenticated()
    }

    fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }
}
