use crate::utils::error::{Result, SermonError};
use crate::utils::validation::{self, Validate};
use std::fmt;

pub const API_KEY_VARS: &[&str] = &["API_KEY", "GEMINI_API_KEY"];
pub const SUPABASE_URL_VARS: &[&str] = &["SUPABASE_URL", "VITE_SUPABASE_URL"];
pub const SUPABASE_ANON_KEY_VARS: &[&str] = &["SUPABASE_ANON_KEY", "VITE_SUPABASE_ANON_KEY"];

/// Secrets for the completion and persistence services. All three are
/// required before any client is built.
#[derive(Clone)]
pub struct Credentials {
    pub completion_api_key: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            completion_api_key: first_present(&lookup, API_KEY_VARS)?,
            supabase_url: first_present(&lookup, SUPABASE_URL_VARS)?,
            supabase_anon_key: first_present(&lookup, SUPABASE_ANON_KEY_VARS)?,
        })
    }
}

fn first_present(lookup: &impl Fn(&str) -> Option<String>, names: &[&str]) -> Result<String> {
    names
        .iter()
        .filter_map(|name| lookup(*name))
        .find(|value| !value.trim().is_empty())
        .ok_or_else(|| SermonError::MissingConfigError {
            field: names.join(" or "),
        })
}

impl Validate for Credentials {
    fn validate(&self) -> Result<()> {
        validation::validate_url("SUPABASE_URL", &self.supabase_url)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("completion_api_key", &"<redacted>")
            .field("supabase_url", &self.supabase_url)
            .field("supabase_anon_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_all_present() {
        let creds = Credentials::from_lookup(lookup_from(&[
            ("API_KEY", "gemini-key"),
            ("SUPABASE_URL", "https://project.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();

        assert_eq!(creds.completion_api_key, "gemini-key");
        assert_eq!(creds.supabase_url, "https://project.supabase.co");
        assert!(creds.validate().is_ok());
    }

    #[test]
    fn test_vite_prefixed_fallback() {
        let creds = Credentials::from_lookup(lookup_from(&[
            ("API_KEY", "gemini-key"),
            ("VITE_SUPABASE_URL", "https://project.supabase.co"),
            ("VITE_SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();

        assert_eq!(creds.supabase_anon_key, "anon");
    }

    #[test]
    fn test_missing_anon_key_is_fatal() {
        let err = Credentials::from_lookup(lookup_from(&[
            ("API_KEY", "gemini-key"),
            ("SUPABASE_URL", "https://project.supabase.co"),
        ]))
        .unwrap_err();

        match err {
            SermonError::MissingConfigError { field } => {
                assert_eq!(field, "SUPABASE_ANON_KEY or VITE_SUPABASE_ANON_KEY")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let result = Credentials::from_lookup(lookup_from(&[
            ("API_KEY", "  "),
            ("SUPABASE_URL", "https://project.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]));

        assert!(matches!(result, Err(SermonError::MissingConfigError { .. })));
    }

    #[test]
    fn test_debug_redacts_keys() {
        let creds = Credentials {
            completion_api_key: "secret-1".to_string(),
            supabase_url: "https://project.supabase.co".to_string(),
            supabase_anon_key: "secret-2".to_string(),
        };
        let printed = format!("{:?}", creds);

        assert!(!printed.contains("secret-1"));
        assert!(!printed.contains("secret-2"));
    }
}
