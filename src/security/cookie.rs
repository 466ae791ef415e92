//! Cookie validation.
//!
//! The gate only needs a yes/no answer for a raw `Cookie` header value.
//! How that answer is reached (signatures, session lookup) belongs to the
//! validator.

use std::collections::HashSet;

use axum_extra::extract::cookie::Cookie;

use crate::config::schema::AuthConfig;
use crate::util::read_lines;

/// Decides whether a raw `Cookie` header value carries a valid session.
///
/// An absent header is passed as the empty string.
pub trait CookieValidator: Send + Sync {
    fn validate_cookie(&self, cookie: &str) -> bool;
}

impl<F> CookieValidator for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn validate_cookie(&self, cookie: &str) -> bool {
        self(cookie)
    }
}

/// Accepts requests whose named session cookie holds one of a fixed set of
/// tokens.
#[derive(Debug, Clone)]
pub struct SessionTokenValidator {
    cookie_name: String,
    tokens: HashSet<String>,
}

impl SessionTokenValidator {
    pub fn new<I, T>(cookie_name: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            cookie_name: cookie_name.into(),
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Build from `[auth]`, merging inline tokens with the non-blank lines
    /// of `session_tokens_file`.
    pub fn from_config(auth: &AuthConfig) -> std::io::Result<Self> {
        let mut tokens: HashSet<String> = auth.session_tokens.iter().cloned().collect();

        if let Some(path) = &auth.session_tokens_file {
            let lines = read_lines(path)?;
            tokens.extend(
                lines
                    .iter()
                    .map(|line| line.trim())
                    .filter(|line| !line.is_empty())
                    .map(str::to_string),
            );
        }

        if tokens.is_empty() {
            tracing::warn!(cookie = %auth.cookie_name, "No session tokens configured; every secure route will deny");
        }

        Ok(Self {
            cookie_name: auth.cookie_name.clone(),
            tokens,
        })
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

impl CookieValidator for SessionTokenValidator {
    fn validate_cookie(&self, cookie: &str) -> bool {
        if cookie.is_empty() {
            return false;
        }

        Cookie::split_parse(cookie)
            .filter_map(Result::ok)
            .any(|c| c.name() == self.cookie_name && self.tokens.contains(c.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn validator() -> SessionTokenValidator {
        SessionTokenValidator::new("session", ["abc123", "def456"])
    }

    #[test]
    fn test_closure_is_a_validator() {
        let v = |cookie: &str| cookie == "ok";
        assert!(v.validate_cookie("ok"));
        assert!(!v.validate_cookie(""));
    }

    #[test]
    fn test_accepts_known_token() {
        assert!(validator().validate_cookie("session=abc123"));
        assert!(validator().validate_cookie("theme=dark; session=def456"));
    }

    #[test]
    fn test_rejects_unknown_or_missing() {
        let v = validator();
        assert!(!v.validate_cookie(""));
        assert!(!v.validate_cookie("session=nope"));
        assert!(!v.validate_cookie("other=abc123"));
        assert!(!v.validate_cookie("garbage"));
    }

    #[test]
    fn test_from_config_reads_token_file() {
        let dir = std::env::temp_dir().join(format!("route-gate-tokens-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tokens.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "from-file").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  padded  ").unwrap();

        let auth = AuthConfig {
            session_tokens: vec!["inline".into()],
            session_tokens_file: Some(path.clone()),
            ..AuthConfig::default()
        };
        let v = SessionTokenValidator::from_config(&auth).unwrap();

        assert_eq!(v.token_count(), 3);
        assert!(v.validate_cookie("session=inline"));
        assert!(v.validate_cookie("session=from-file"));
        assert!(v.validate_cookie("session=padded"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_from_config_missing_file_is_error() {
        let auth = AuthConfig {
            session_tokens_file: Some("/nonexistent/route-gate/tokens".into()),
            ..AuthConfig::default()
        };
        assert!(SessionTokenValidator::from_config(&auth).is_err());
    }
}
