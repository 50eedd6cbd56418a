use crate::error::CredentialError;
use std::fmt;

/// Environment variables consulted, in order, when no key is passed explicitly.
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// A generation service API key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a key, trimming surrounding whitespace and newlines.
    pub fn new(raw: &str) -> Result<Self, CredentialError> {
        let key = raw.trim();
        if key.is_empty() {
            return Err(CredentialError::MissingCredential);
        }
        Ok(Credential(key.to_string()))
    }

    /// Use `explicit` when it is non-blank, otherwise the first non-blank
    /// variable from [`API_KEY_ENV_VARS`].
    pub fn resolve(explicit: Option<&str>) -> Result<Self, CredentialError> {
        resolve_with(explicit, |name| std::env::var(name).ok())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

fn resolve_with(
    explicit: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Credential, CredentialError> {
    if let Some(credential) = explicit.and_then(|raw| Credential::new(raw).ok()) {
        return Ok(credential);
    }
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find_map(|raw| Credential::new(&raw).ok())
        .ok_or(CredentialError::MissingCredential)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_explicit_key_wins_and_is_trimmed() {
        let c = resolve_with(Some("  abc\n"), env(&[("GEMINI_API_KEY", "env")])).unwrap();
        assert_eq!(c.expose(), "abc");
    }

    #[test]
    fn test_blank_explicit_falls_back_to_env() {
        let c = resolve_with(Some("   "), env(&[("GEMINI_API_KEY", " gem ")])).unwrap();
        assert_eq!(c.expose(), "gem");
    }

    #[test]
    fn test_google_key_is_second_choice() {
        let c = resolve_with(None, env(&[("GOOGLE_API_KEY", "goog")])).unwrap();
        assert_eq!(c.expose(), "goog");

        let c = resolve_with(
            None,
            env(&[("GEMINI_API_KEY", "gem"), ("GOOGLE_API_KEY", "goog")]),
        )
        .unwrap();
        assert_eq!(c.expose(), "gem");
    }

    #[test]
    fn test_missing_everywhere() {
        assert_eq!(
            resolve_with(None, env(&[("GEMINI_API_KEY", "")])),
            Err(CredentialError::MissingCredential)
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let c = Credential::new("secret-key").unwrap();
        assert!(!format!("{c:?}").contains("secret"));
    }
}
