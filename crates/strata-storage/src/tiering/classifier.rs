use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strata_core::{AccessRecord, ClassifierConfig, CoreError, CoreResult, Tier};

use super::rules::{default_naming_rules, first_match, NamingRule};

/// Why the classifier picked a tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionReason {
    /// Access count reached the frequent threshold
    Frequency { access_count: u64 },
    /// A naming heuristic matched
    NamingRule { rule: String },
    /// Fell through to the age breakpoints
    Age { days_since_access: i64 },
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frequency { access_count } => write!(f, "frequent ({access_count} accesses)"),
            Self::NamingRule { rule } => write!(f, "naming rule `{rule}`"),
            Self::Age { days_since_access } => write!(f, "{days_since_access} days since last access"),
        }
    }
}

/// Target tier plus the rule that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub tier: Tier,
    pub reason: DecisionReason,
}

/// Tier classifier
///
/// Pure decision function from (identifier, access record, current tier) to
/// the tier the object should live in. First matching step wins:
/// 1. `access_count >= frequent_threshold` → Hot
/// 2. the first matching [`NamingRule`] in table order
/// 3. whole days since last access against the warm/cold/archive breakpoints
///
/// Objects without an access record are treated as new (0 accesses, 0 days).
///
/// # Example
///
/// ```
/// use strata_core::{AccessRecord, Tier};
/// use strata_storage::tiering::TierClassifier;
/// use chrono::{Duration, Utc};
///
/// let classifier = TierClassifier::default();
/// let now = Utc::now();
/// let mut record = AccessRecord::new(now - Duration::days(200));
/// record.last_accessed_at = now - Duration::days(100);
///
/// assert_eq!(classifier.decide_at("data.csv", Some(&record), Tier::Hot, now), Tier::Cold);
/// ```
#[derive(Debug, Clone)]
pub struct TierClassifier {
    config: ClassifierConfig,
    rules: Vec<NamingRule>,
}

impl Default for TierClassifier {
    fn default() -> Self {
        Self {
            config: ClassifierConfig::default(),
            rules: default_naming_rules(),
        }
    }
}

impl TierClassifier {
    /// Create a classifier with the built-in naming rules
    ///
    /// # Errors
    ///
    /// Returns error if threshold validation fails
    pub fn new(config: ClassifierConfig) -> CoreResult<Self> {
        config.validate().map_err(CoreError::ValidationError)?;

        Ok(Self {
            config,
            rules: default_naming_rules(),
        })
    }

    /// Replace the naming rule table.
    pub fn with_rules(mut self, rules: Vec<NamingRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Naming rules in evaluation order.
    pub fn rules(&self) -> &[NamingRule] {
        &self.rules
    }

    /// Mutable access to the rule table (reorder, insert, remove).
    pub fn rules_mut(&mut self) -> &mut Vec<NamingRule> {
        &mut self.rules
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Target tier as of now.
    pub fn decide(&self, object_id: &str, record: Option<&AccessRecord>, current: Tier) -> Tier {
        self.decide_at(object_id, record, current, Utc::now())
    }

    /// Target tier as of `now`.
    pub fn decide_at(
        &self,
        object_id: &str,
        record: Option<&AccessRecord>,
        current: Tier,
        now: DateTime<Utc>,
    ) -> Tier {
        self.classify_at(object_id, record, current, now).tier
    }

    /// Target tier and the reason for it, as of `now`.
    ///
    /// The current tier does not influence the decision; it is accepted so
    /// callers can log transitions alongside the reason.
    pub fn classify_at(
        &self,
        object_id: &str,
        record: Option<&AccessRecord>,
        current: Tier,
        now: DateTime<Utc>,
    ) -> Classification {
        let access_count = record.map_or(0, |r| r.access_count);
        let days_since_access = record.map_or(0, |r| r.days_since_access(now));

        let classification = if access_count >= self.config.frequent_threshold {
            Classification {
                tier: Tier::Hot,
                reason: DecisionReason::Frequency { access_count },
            }
        } else if let Some(rule) = first_match(&self.rules, object_id) {
            Classification {
                tier: rule.tier,
                reason: DecisionReason::NamingRule {
                    rule: rule.name.clone(),
                },
            }
        } else {
            Classification {
                tier: self.tier_for_age(days_since_access),
                reason: DecisionReason::Age { days_since_access },
            }
        };

        tracing::trace!(
            object_id = %object_id,
            current = %current,
            target = %classification.tier,
            reason = %classification.reason,
            "Classified object"
        );

        classification
    }

    fn tier_for_age(&self, days: i64) -> Tier {
        if days >= self.config.archive_after_days {
            Tier::Archive
        } else if days >= self.config.cold_after_days {
            Tier::Cold
        } else if days >= self.config.warm_after_days {
            Tier::Warm
        } else {
            Tier::Hot
        }
    }

    /// Informational: objects in Cold or Archive are candidates for a
    /// cheaper provider. Never used to trigger transfers.
    pub fn is_cross_provider_archive_candidate(&self, current: Tier) -> bool {
        current.is_cost_optimized()
    }
}
