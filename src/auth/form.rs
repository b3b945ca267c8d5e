//! Login form flow: collect two fields, hand them to the authentication
//! context, then either navigate away or raise a toast.

use tokio::sync::watch;
use tracing::debug;

use crate::api::LoginCredentials;
use crate::auth::context::AuthContext;

pub const CHAT_ROUTE: &str = "/chat";
pub const LOGIN_FAILED_TITLE: &str = "Login failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

impl ToastVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastVariant::Default => "default",
            ToastVariant::Destructive => "destructive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

pub trait Notifier {
    fn toast(&mut self, toast: Toast);
}

pub trait Navigator {
    fn navigate(&mut self, destination: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    /// Waiting for input. Carries the message of the last failed attempt.
    Idle { last_error: Option<String> },
    Submitting,
    NavigatedAway,
}

impl Default for FormState {
    fn default() -> Self {
        FormState::Idle { last_error: None }
    }
}

/// The form's fields and state. The state is published on a watch channel
/// so it can be observed while a submit is awaiting the collaborator.
#[derive(Debug)]
pub struct LoginForm {
    username: String,
    password: String,
    state: watch::Sender<FormState>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            state: watch::Sender::new(FormState::default()),
        }
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn state(&self) -> FormState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    /// Submits the entered fields exactly as typed and returns the state the
    /// form settled in.
    ///
    /// Once the form has navigated away, further submits are ignored.
    pub async fn submit<A>(
        &mut self,
        auth: &mut A,
        navigator: &mut dyn Navigator,
        notifier: &mut dyn Notifier,
    ) -> FormState
    where
        A: AuthContext + ?Sized,
    {
        if *self.state.borrow() == FormState::NavigatedAway {
            return FormState::NavigatedAway;
        }

        self.state.send_replace(FormState::Submitting);
        let credentials = LoginCredentials {
            username: self.username.clone(),
            password: self.password.clone(),
        };

        let settled = match auth.login(credentials).await {
            Ok(()) => {
                debug!(destination = CHAT_ROUTE, "Login accepted");
                navigator.navigate(CHAT_ROUTE);
                FormState::NavigatedAway
            }
            Err(err) => {
                let description = err.to_string();
                notifier.toast(Toast {
                    title: LOGIN_FAILED_TITLE.to_string(),
                    description: description.clone(),
                    variant: ToastVariant::Destructive,
                });
                FormState::Idle {
                    last_error: Some(description),
                }
            }
        };

        self.state.send_replace(settled.clone());
        settled
    }
}
