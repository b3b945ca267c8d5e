/// The authentication state held by one API client.
///
/// A session has a single owner. Mutation goes through `&mut self`, so the
/// borrow checker rules out two requests racing to replace the token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn new(token: Option<String>) -> Self {
        // An empty persisted value is treated as no session at all.
        Self {
            token: token.filter(|token| !token.is_empty()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn clear(&mut self) {
        self.token = None;
    }

    /// Value for the `Authorization` header, if a token is held.
    pub fn authorization(&self) -> Option<String> {
        self.token.as_deref().map(|token| format!("Token {token}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_unauthenticated() {
        assert!(!Session::new(Some(String::new())).is_authenticated());
        assert!(!Session::new(None).is_authenticated());
    }

    #[test]
    fn authorization_uses_token_scheme() {
        let mut session = Session::default();
        assert_eq!(session.authorization(), None);

        session.set_token("abc123".to_string());
        assert_eq!(session.authorization().as_deref(), Some("Token abc123"));

        session.clear();
        assert!(!session.is_authenticated());
    }
}
