// Directory snapshot: ordered, sentinel-free view of one listing

use crate::models::RemoteEntry;
use crate::sequence::SENTINEL;

/// Listing entries sorted oldest to newest with the sentinel removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorySnapshot {
    entries: Vec<RemoteEntry>,
}

impl DirectorySnapshot {
    /// Build a snapshot from a raw listing.
    ///
    /// The sort is stable, so entries sharing a timestamp keep their
    /// listing order.
    pub fn build(mut raw: Vec<RemoteEntry>) -> Self {
        raw.sort_by_key(|entry| entry.modified);
        raw.retain(|entry| entry.name != SENTINEL);
        Self { entries: raw }
    }

    /// Most recently modified entry, if the site has any data
    pub fn latest(&self) -> Option<&RemoteEntry> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[RemoteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<RemoteEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use proptest::prelude::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn names(snapshot: &DirectorySnapshot) -> Vec<&str> {
        snapshot.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_sorts_and_prunes_sentinel() {
        let snapshot = DirectorySnapshot::build(vec![
            RemoteEntry::new("sn.0005", 10, at(2)),
            RemoteEntry::new("sn.0003", 10, at(1)),
            RemoteEntry::new("sn.last", 10, at(3)),
        ]);

        assert_eq!(names(&snapshot), vec!["sn.0003", "sn.0005"]);
        assert_eq!(snapshot.latest().map(|e| e.name.as_str()), Some("sn.0005"));
    }

    #[test]
    fn test_empty_listing() {
        let snapshot = DirectorySnapshot::build(Vec::new());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.latest(), None);
    }

    #[test]
    fn test_sentinel_only_listing_is_empty() {
        let snapshot = DirectorySnapshot::build(vec![RemoteEntry::new("sn.last", 4, at(0))]);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.latest(), None);
    }

    #[test]
    fn test_equal_timestamps_keep_listing_order() {
        let snapshot = DirectorySnapshot::build(vec![
            RemoteEntry::new("sn.0010", 1, at(5)),
            RemoteEntry::new("sn.0009", 1, at(5)),
            RemoteEntry::new("sn.0001", 1, at(1)),
            RemoteEntry::new("sn.0011", 1, at(5)),
        ]);

        assert_eq!(names(&snapshot), vec!["sn.0001", "sn.0010", "sn.0009", "sn.0011"]);
        assert_eq!(snapshot.latest().map(|e| e.name.as_str()), Some("sn.0011"));
    }

    #[test]
    fn test_wraparound_uses_time_not_index() {
        let snapshot = DirectorySnapshot::build(vec![
            RemoteEntry::new("sn.0250", 1, at(1)),
            RemoteEntry::new("sn.0000", 1, at(2)),
            RemoteEntry::new("sn.0001", 1, at(3)),
        ]);
        assert_eq!(snapshot.latest().map(|e| e.name.as_str()), Some("sn.0001"));
    }

    proptest! {
        #[test]
        fn prop_snapshot_is_sorted_and_sentinel_free(
            raw in prop::collection::vec((0u16..251, 0i64..1000, any::<bool>()), 0..60)
        ) {
            let entries: Vec<RemoteEntry> = raw
                .iter()
                .map(|(index, secs, sentinel)| {
                    let name = if *sentinel { "sn.last".to_string() } else { format!("sn.{:04}", index) };
                    RemoteEntry::new(name, 0, at(*secs))
                })
                .collect();
            let kept = raw.iter().filter(|(_, _, sentinel)| !sentinel).count();

            let snapshot = DirectorySnapshot::build(entries);

            prop_assert_eq!(snapshot.len(), kept);
            prop_assert!(snapshot.entries().iter().all(|e| e.name != SENTINEL));
            prop_assert!(snapshot.entries().windows(2).all(|w| w[0].modified <= w[1].modified));
            if let Some(latest) = snapshot.latest() {
                prop_assert!(snapshot.entries().iter().all(|e| e.modified <= latest.modified));
            }
        }
    }
}
