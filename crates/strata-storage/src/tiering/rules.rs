use serde::{Deserialize, Serialize};
use strata_core::Tier;

/// Predicate over an object identifier. Matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMatcher {
    Contains(String),
    StartsWith(String),
    EndsWith(String),
    /// Matches when any inner matcher does
    Any(Vec<NameMatcher>),
}

impl NameMatcher {
    pub fn contains(pattern: &str) -> Self {
        Self::Contains(pattern.to_lowercase())
    }

    pub fn starts_with(pattern: &str) -> Self {
        Self::StartsWith(pattern.to_lowercase())
    }

    pub fn ends_with(pattern: &str) -> Self {
        Self::EndsWith(pattern.to_lowercase())
    }

    pub fn any(matchers: impl IntoIterator<Item = NameMatcher>) -> Self {
        Self::Any(matchers.into_iter().collect())
    }

    /// `name` must already be lowercased.
    fn matches_lowercase(&self, name: &str) -> bool {
        match self {
            Self::Contains(pattern) => name.contains(&pattern.to_lowercase()),
            Self::StartsWith(pattern) => name.starts_with(&pattern.to_lowercase()),
            Self::EndsWith(pattern) => name.ends_with(&pattern.to_lowercase()),
            Self::Any(matchers) => matchers.iter().any(|m| m.matches_lowercase(name)),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.matches_lowercase(&name.to_lowercase())
    }
}

/// One entry of the naming heuristic table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingRule {
    /// Short label used in logs and decision reasons
    pub name: String,
    pub matcher: NameMatcher,
    pub tier: Tier,
}

impl NamingRule {
    pub fn new(name: impl Into<String>, matcher: NameMatcher, tier: Tier) -> Self {
        Self {
            name: name.into(),
            matcher,
            tier,
        }
    }
}

/// Built-in heuristics, in evaluation order.
pub fn default_naming_rules() -> Vec<NamingRule> {
    vec![
        NamingRule::new(
            "monthly-report",
            NameMatcher::any([
                NameMatcher::contains("monthly_report"),
                NameMatcher::contains("monthly-report"),
            ]),
            Tier::Warm,
        ),
        NamingRule::new(
            "yearly",
            NameMatcher::any([NameMatcher::contains("yearly"), NameMatcher::contains("annual")]),
            Tier::Cold,
        ),
        NamingRule::new(
            "logs",
            NameMatcher::any([NameMatcher::ends_with(".log"), NameMatcher::contains("logs")]),
            Tier::Archive,
        ),
        NamingRule::new(
            "backup",
            NameMatcher::any([NameMatcher::contains("backup"), NameMatcher::contains("bak")]),
            Tier::Cold,
        ),
        NamingRule::new(
            "temp",
            NameMatcher::any([NameMatcher::starts_with("temp"), NameMatcher::starts_with("tmp")]),
            Tier::Cold,
        ),
    ]
}

/// First rule in `rules` matching `name`.
pub fn first_match<'a>(rules: &'a [NamingRule], name: &str) -> Option<&'a NamingRule> {
    let lowered = name.to_lowercase();
    rules.iter().find(|rule| rule.matcher.matches_lowercase(&lowered))
}
