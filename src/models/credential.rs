//! Session credential handed over by the authentication collaborator.

/// Bearer token and display username.
///
/// Read-only from the browser's point of view; the login flow owns it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
    token: String,
    username: String,
}

impl Credential {
    /// Builds a credential from stored values.
    ///
    /// Returns `None` when the token is missing or blank; the username is
    /// optional and falls back to "user".
    pub fn from_parts(token: Option<String>, username: Option<String>) -> Option<Self> {
        let token = token.filter(|t| !t.trim().is_empty())?;
        let username = username
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| "user".to_string());
        Some(Self { token, username })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token() {
        assert_eq!(Credential::from_parts(None, Some("amy".into())), None);
        assert_eq!(Credential::from_parts(Some("  ".into()), None), None);
    }

    #[test]
    fn test_bearer() {
        let cred = Credential::from_parts(Some("abc".into()), Some("amy".into())).unwrap();
        assert_eq!(cred.bearer(), "Bearer abc");
        assert_eq!(cred.username(), "amy");
    }

    #[test]
    fn test_username_fallback() {
        let cred = Credential::from_parts(Some("abc".into()), None).unwrap();
        assert_eq!(cred.username(), "user");
    }
}
