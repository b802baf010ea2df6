use regex::Regex;

use super::SettingsError;

/// Per-site rules deciding on which pages the controller runs.
///
/// Each rule is a URL prefix, where `*` matches any sequence of characters.
/// The scheme and a leading `www.` are ignored on both sides, so `youtube.com`
/// matches `https://www.youtube.com/watch?v=...`.
///
/// By default rules block the pages they match. An inverted blocklist acts
/// as an allow-list instead.
#[derive(Clone, Debug, Default)]
pub struct Blocklist {
    rules: Vec<(String, Regex)>,
    is_inverted: bool,
}

impl Blocklist {
    pub fn new(rules: &[String], is_inverted: bool) -> Result<Self, SettingsError> {
        let rules = rules
            .iter()
            .filter(|rule| !rule.is_empty())
            .map(|rule| compile_rule(rule).map(|regex| (rule.clone(), regex)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules, is_inverted })
    }

    /// Returns `true` if the controller may run on `url`.
    pub fn is_allowed(&self, url: &str) -> bool {
        self.matching_rule(url).is_none() != self.is_inverted
    }

    /// The first rule matching `url`, if any.
    pub fn matching_rule(&self, url: &str) -> Option<&str> {
        let url = strip_url_prefix(url);
        self.rules
            .iter()
            .find(|(_, regex)| regex.is_match(url))
            .map(|(rule, _)| rule.as_str())
    }

    pub fn is_inverted(&self) -> bool {
        self.is_inverted
    }
}

fn compile_rule(rule: &str) -> Result<Regex, SettingsError> {
    let pattern = strip_url_prefix(rule)
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("(.*)");
    Regex::new(&format!("^{pattern}")).map_err(|source| SettingsError::InvalidBlocklistRule {
        rule: rule.to_owned(),
        source,
    })
}

/// Removes an optional `http://`/`https://` scheme, then an optional `www.`.
fn strip_url_prefix(url: &str) -> &str {
    let url = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    url.strip_prefix("www.").unwrap_or(url)
}
