use std::fmt;

use super::ids::IdRegistry;
use crate::db::CollectionName;

/// Documents removed from each collection by a reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetReport {
    pub deleted: Vec<(CollectionName, u64)>,
}

impl ResetReport {
    pub fn deleted_from(&self, collection: CollectionName) -> u64 {
        self.deleted
            .iter()
            .find(|(name, _)| *name == collection)
            .map_or(0, |(_, count)| *count)
    }

    pub fn total(&self) -> u64 {
        self.deleted.iter().map(|(_, count)| count).sum()
    }
}

impl fmt::Display for ResetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (collection, count) in &self.deleted {
            writeln!(f, "  {:<10} {} removed", collection.as_str(), count)?;
        }
        Ok(())
    }
}

/// Outcome of a full fixture load.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub reset: ResetReport,
    /// Documents inserted per collection, in phase order.
    pub inserted: Vec<(CollectionName, u64)>,
    /// Documents present in every collection after the load.
    pub counts: Vec<(CollectionName, u64)>,
    pub ids: IdRegistry,
    pub elapsed_ms: u64,
}

impl LoadReport {
    pub fn count(&self, collection: CollectionName) -> u64 {
        self.counts
            .iter()
            .find(|(name, _)| *name == collection)
            .map_or(0, |(_, count)| *count)
    }

    pub fn inserted_into(&self, collection: CollectionName) -> u64 {
        self.inserted
            .iter()
            .filter(|(name, _)| *name == collection)
            .map(|(_, count)| count)
            .sum()
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Collection counts:")?;
        for (collection, count) in &self.counts {
            writeln!(f, "  {:<10} {}", collection.as_str(), count)?;
        }
        write!(f, "Loaded in {}ms", self.elapsed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_collections_count_as_zero() {
        let report = LoadReport {
            counts: vec![(CollectionName::Users, 2)],
            ..LoadReport::default()
        };
        assert_eq!(report.count(CollectionName::Users), 2);
        assert_eq!(report.count(CollectionName::Media), 0);
    }

    #[test]
    fn comment_batches_add_up() {
        let report = LoadReport {
            inserted: vec![
                (CollectionName::Comments, 3),
                (CollectionName::Comments, 1),
            ],
            ..LoadReport::default()
        };
        assert_eq!(report.inserted_into(CollectionName::Comments), 4);
    }

    #[test]
    fn reset_report_lists_every_collection() {
        let report = ResetReport {
            deleted: vec![(CollectionName::Users, 2), (CollectionName::Posts, 3)],
        };
        assert_eq!(report.total(), 5);
        assert_eq!(report.deleted_from(CollectionName::Posts), 3);
        let text = report.to_string();
        assert!(text.contains("users"));
        assert!(text.contains("3 removed"));
    }
}
