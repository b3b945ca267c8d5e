use std::error::Error;

use crate::api::client::ApiClient;
use crate::auth::form::CHAT_ROUTE;
use crate::auth::ui::{prompt_credentials, TerminalNavigator, TerminalNotifier};
use crate::auth::{ApiAuthContext, AuthContext, LoginForm, Notifier, Toast, ToastVariant};
use crate::cli::rooms::list_rooms;
use crate::cli::Outcome;
use crate::core::storage::USERNAME_KEY;

/// Runs the login form against the terminal. On success the form navigates
/// to the chat view, which on the command line is the room listing.
///
/// A rejected login has already been reported by the notifier, so it only
/// yields a failing exit code.
pub async fn login(
    client: ApiClient,
    username: Option<String>,
) -> Result<Outcome, Box<dyn Error>> {
    let last_username = client.storage().get(USERNAME_KEY).ok().flatten();
    let input = prompt_credentials(username.as_deref(), last_username.as_deref())?;

    let mut form = LoginForm::new();
    form.set_username(input.username);
    form.set_password(input.password);

    let mut auth = ApiAuthContext::new(client);
    let mut navigator = TerminalNavigator::default();
    let mut notifier = TerminalNotifier;
    form.submit(&mut auth, &mut navigator, &mut notifier).await;

    match navigator.destination() {
        Some(CHAT_ROUTE) => {
            println!(
                "✅ Signed in as {}",
                auth.username().unwrap_or(form.username())
            );
            println!();
            list_rooms(auth.client()).await?;
            Ok(Outcome::Success)
        }
        Some(other) => Err(format!("Unknown destination after login: {other}").into()),
        None => Ok(Outcome::Failure),
    }
}

pub async fn logout(client: ApiClient) -> Result<(), Box<dyn Error>> {
    let was_authenticated = client.is_authenticated();
    let mut auth = ApiAuthContext::new(client);
    auth.logout().await;

    let title = if was_authenticated {
        "Signed out"
    } else {
        "Not signed in; cleared any stored session"
    };
    TerminalNotifier.toast(Toast {
        title: title.to_string(),
        description: String::new(),
        variant: ToastVariant::Default,
    });
    Ok(())
}

pub fn status(client: &ApiClient) -> String {
    let username = client.storage().get(USERNAME_KEY).ok().flatten();
    let signed_in = match (client.is_authenticated(), username) {
        (true, Some(username)) => format!("signed in as {username}"),
        (true, None) => "signed in".to_string(),
        (false, _) => "not signed in".to_string(),
    };
    format!("Server: {}\nSession: {}", client.base_url(), signed_in)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::storage::{MemoryStorage, AUTH_TOKEN_KEY};
    use crate::utils::test_utils::test_client;

    #[test]
    fn status_reports_session_and_server() {
        let storage = Arc::new(MemoryStorage::with_entries([
            (AUTH_TOKEN_KEY, "tok"),
            (USERNAME_KEY, "admin"),
        ]));
        let client = test_client("http://127.0.0.1:9/api/", storage);
        assert_eq!(
            status(&client),
            "Server: http://127.0.0.1:9/api\nSession: signed in as admin"
        );

        let anonymous = test_client("http://127.0.0.1:9/api", Arc::new(MemoryStorage::new()));
        assert!(status(&anonymous).ends_with("not signed in"));
    }
}
