use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strata_core::Tier;

use crate::migration::ItemError;

/// What the driver did with one object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectAction {
    AlreadyOptimal,
    ClassChanged,
    /// Handed to the archive provider through the migration coordinator
    Migrated,
    Failed,
}

/// Per-object line of a [`TieringReport`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectReport {
    pub id: String,
    /// Tier before the run; None when the object could not be inspected
    pub previous_tier: Option<Tier>,
    /// Tier after the run; equals `previous_tier` when nothing changed
    pub new_tier: Option<Tier>,
    pub action: ObjectAction,
    /// Provider that now holds the object, for migrated objects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ItemError>,
}

/// Outcome of one driver run over a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TieringReport {
    pub provider: String,
    pub started_at: DateTime<Utc>,
    pub objects_analyzed: usize,
    /// Class changes plus migrations
    pub changes_performed: usize,
    pub already_optimal: usize,
    pub failed: usize,
    /// Changes that landed in Cold or Archive
    pub cost_optimizations: usize,
    /// Advisory: `cost_optimizations × savings_per_demotion`
    pub estimated_monthly_savings: f64,
    /// Ids whose final tier is Cold or Archive
    pub archive_candidates: Vec<String>,
    /// Final tier counts of every inspected object
    pub tier_distribution: BTreeMap<Tier, usize>,
    pub objects: Vec<ObjectReport>,
}

impl TieringReport {
    pub(crate) fn new(provider: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            provider: provider.into(),
            started_at,
            objects_analyzed: 0,
            changes_performed: 0,
            already_optimal: 0,
            failed: 0,
            cost_optimizations: 0,
            estimated_monthly_savings: 0.0,
            archive_candidates: Vec::new(),
            tier_distribution: BTreeMap::new(),
            objects: Vec::new(),
        }
    }

    /// Fold one object outcome into the summary counters.
    pub(crate) fn push(&mut self, object: ObjectReport) {
        self.objects_analyzed += 1;

        match object.action {
            ObjectAction::AlreadyOptimal => self.already_optimal += 1,
            ObjectAction::ClassChanged | ObjectAction::Migrated => {
                self.changes_performed += 1;
                if object.new_tier.is_some_and(Tier::is_cost_optimized) {
                    self.cost_optimizations += 1;
                }
            }
            ObjectAction::Failed => self.failed += 1,
        }

        if let Some(tier) = object.new_tier {
            *self.tier_distribution.entry(tier).or_insert(0) += 1;
            if tier.is_cost_optimized() {
                self.archive_candidates.push(object.id.clone());
            }
        }

        self.objects.push(object);
    }

    /// Object lines with the given action.
    pub fn with_action(&self, action: ObjectAction) -> impl Iterator<Item = &ObjectReport> {
        self.objects.iter().filter(move |o| o.action == action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::FailureKind;

    fn line(id: &str, previous: Tier, new: Tier, action: ObjectAction) -> ObjectReport {
        ObjectReport {
            id: id.into(),
            previous_tier: Some(previous),
            new_tier: Some(new),
            action,
            destination: None,
            error: None,
        }
    }

    #[test]
    fn test_summary_counters() {
        let mut report = TieringReport::new("aws", Utc::now());
        report.push(line("a", Tier::Hot, Tier::Hot, ObjectAction::AlreadyOptimal));
        report.push(line("b", Tier::Hot, Tier::Cold, ObjectAction::ClassChanged));
        report.push(line("c", Tier::Cold, Tier::Warm, ObjectAction::ClassChanged));
        report.push(ObjectReport {
            id: "d".into(),
            previous_tier: None,
            new_tier: None,
            action: ObjectAction::Failed,
            destination: None,
            error: Some(ItemError {
                object_id: "d".into(),
                kind: FailureKind::NotFound,
                message: "gone".into(),
            }),
        });

        assert_eq!(report.objects_analyzed, 4);
        assert_eq!(report.changes_performed, 2);
        assert_eq!(report.already_optimal, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.cost_optimizations, 1);
        assert_eq!(report.archive_candidates, vec!["b".to_string()]);
        assert_eq!(report.tier_distribution.get(&Tier::Hot), Some(&1));
        assert_eq!(report.tier_distribution.values().sum::<usize>(), 3);
        assert_eq!(report.with_action(ObjectAction::ClassChanged).count(), 2);
    }

    #[test]
    fn test_report_serializes() {
        let mut report = TieringReport::new("aws", Utc::now());
        report.push(line("a", Tier::Warm, Tier::Archive, ObjectAction::ClassChanged));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["objects"][0]["action"], "class_changed");
        assert_eq!(json["objects"][0]["new_tier"], "archive");
        assert_eq!(json["tier_distribution"]["archive"], 1);
        assert!(json["objects"][0].get("error").is_none());
    }
}
