//! Environment bundle
//!
//! The resolved key/value configuration passed into a deployment. Read in
//! full from a flat `key=value` file before orchestration starts, then
//! grown as steps discover new values (checkout URL, storefront domain).
//! The bundle bound to the storefront project must be the fully resolved
//! superset including any checkout-derived keys.

use std::collections::BTreeMap;
use std::path::Path;

use tokio::fs;

use crate::errors::CliError;

// Keys folded in by the checkout sub-deployment
pub const CHECKOUT_APP_URL: &str = "CHECKOUT_APP_URL";
pub const CHECKOUT_STOREFRONT_URL: &str = "CHECKOUT_STOREFRONT_URL";
pub const COMMERCE_APP_TOKEN: &str = "COMMERCE_APP_TOKEN";
pub const COMMERCE_APP_ID: &str = "COMMERCE_APP_ID";

// Key folded in by the domain-resolution step
pub const STOREFRONT_URL: &str = "STOREFRONT_URL";

/// Local key/value configuration for one orchestration run.
///
/// Keys are unique; setting an existing key replaces its value. Not safe
/// to share across concurrent runs targeting the same project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentBundle {
    vars: BTreeMap<String, String>,
}

impl EnvironmentBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse flat `key=value` lines. Blank lines and `#` comments are
    /// skipped; a later duplicate key wins; surrounding quotes on values
    /// are stripped.
    pub fn parse(contents: &str) -> Self {
        let mut vars = BTreeMap::new();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                if key.is_empty() {
                    continue;
                }
                vars.insert(key.to_string(), unquote(value.trim()).to_string());
            }
        }
        Self { vars }
    }

    /// Read and parse a local environment file
    pub async fn read_env_file(path: &Path) -> Result<Self, CliError> {
        let contents = fs::read_to_string(path).await.map_err(|e| {
            CliError::Config(format!("unable to read {}: {e}", path.display()))
        })?;
        Ok(Self::parse(&contents))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let bundle = EnvironmentBundle::parse(
            "# comment\n\nAPI_URL=https://demo.example/graphql/\nTOKEN=abc\n",
        );
        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.get("API_URL"), Some("https://demo.example/graphql/"));
        assert_eq!(bundle.get("TOKEN"), Some("abc"));
    }

    #[test]
    fn test_parse_strips_quotes_and_keeps_last_duplicate() {
        let bundle = EnvironmentBundle::parse("KEY=\"first\"\nKEY='second'\n");
        assert_eq!(bundle.get("KEY"), Some("second"));
    }

    #[test]
    fn test_parse_keeps_equals_in_value() {
        let bundle = EnvironmentBundle::parse("QUERY=a=b=c\n");
        assert_eq!(bundle.get("QUERY"), Some("a=b=c"));
    }

    #[test]
    fn test_set_replaces_value() {
        let mut bundle = EnvironmentBundle::new();
        bundle.set("A", "1");
        bundle.set("A", "2");
        assert_eq!(bundle.get("A"), Some("2"));
        assert_eq!(bundle.len(), 1);
    }
}
