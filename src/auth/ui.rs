use std::fmt;

use tracing::debug;

use crate::auth::form::{Navigator, Notifier, Toast, ToastVariant};
use crate::utils::line_editor::{prompt_line_editor, LineEditorOptions};

const USERNAME_PROMPT: &str = "Username: ";
const PASSWORD_PROMPT: &str = "Password: ";

#[derive(Debug, Clone)]
pub struct UiError {
    message: String,
}

impl UiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for UiError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialsInput {
    pub username: String,
    pub password: String,
}

/// Asks for a username (pre-filled with the last one used) and a masked
/// password.
///
/// `preset_username` skips the username prompt entirely.
pub fn prompt_credentials(
    preset_username: Option<&str>,
    last_username: Option<&str>,
) -> Result<CredentialsInput, UiError> {
    println!("🔐 Sign in");
    println!("━━━━━━━━━━");

    let username = match preset_username {
        Some(username) => {
            println!("{USERNAME_PROMPT}{username}");
            username.to_string()
        }
        None => prompt_line_editor(
            USERNAME_PROMPT,
            &LineEditorOptions::plain(last_username.unwrap_or_default()),
        )
        .map_err(|err| UiError::new(err.to_string()))?,
    };

    let password = prompt_line_editor(PASSWORD_PROMPT, &LineEditorOptions::hidden())
        .map_err(|err| UiError::new(err.to_string()))?;

    Ok(CredentialsInput { username, password })
}

pub fn format_toast(toast: &Toast) -> String {
    let marker = match toast.variant {
        ToastVariant::Destructive => "❌",
        ToastVariant::Default => "✅",
    };
    if toast.description.is_empty() {
        format!("{marker} {}", toast.title)
    } else {
        format!("{marker} {}: {}", toast.title, toast.description)
    }
}

/// Prints toasts to the terminal. Destructive ones go to stderr.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn toast(&mut self, toast: Toast) {
        debug!(variant = toast.variant.as_str(), title = %toast.title, "Showing toast");
        let line = format_toast(&toast);
        match toast.variant {
            ToastVariant::Destructive => eprintln!("{line}"),
            ToastVariant::Default => println!("{line}"),
        }
    }
}

/// Records where the form asked to go; the CLI decides what that means.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    destination: Option<String>,
}

impl TerminalNavigator {
    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&mut self, destination: &str) {
        self.destination = Some(destination.to_string());
    }
}
