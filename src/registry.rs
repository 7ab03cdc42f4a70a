/// Last-known signal magnitude per device, accumulated across scan cycles
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Maps a device's canonical address to the magnitude of its latest signal.
///
/// Entries are never removed: a device seen once keeps its entry even when it
/// drops out of later scans.
#[derive(Debug, Default)]
pub struct SignalRegistry {
    entries: HashMap<String, u32>,
}

impl SignalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `magnitude` for `key`, replacing the stored value only if it changed
    pub fn upsert(&mut self, key: String, magnitude: u32) {
        match self.entries.entry(key) {
            Entry::Occupied(mut entry) => {
                if *entry.get() != magnitude {
                    debug!(
                        "Signal for {} changed: {} -> {}",
                        entry.key(),
                        entry.get(),
                        magnitude
                    );
                    entry.insert(magnitude);
                }
            }
            Entry::Vacant(entry) => {
                debug!("New device {} with signal {}", entry.key(), magnitude);
                entry.insert(magnitude);
            }
        }
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &str) -> Option<u32> {
        self.entries.get(key).copied()
    }

    /// Entries ordered by key
    pub fn sorted_entries(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<(&str, u32)> = self
            .entries
            .iter()
            .map(|(key, magnitude)| (key.as_str(), *magnitude))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_new_keys() {
        let mut registry = SignalRegistry::new();
        assert_eq!(registry.size(), 0);

        registry.upsert("00:0D:97:00:00:01".to_string(), 40);
        registry.upsert("00:0D:97:00:00:02".to_string(), 55);

        assert_eq!(registry.size(), 2);
        assert_eq!(registry.get("00:0D:97:00:00:01"), Some(40));
        assert_eq!(registry.get("00:0D:97:00:00:02"), Some(55));
    }

    #[test]
    fn overwrites_changed_value_without_growing() {
        let mut registry = SignalRegistry::new();
        registry.upsert("A".to_string(), 40);
        registry.upsert("A".to_string(), 42);

        assert_eq!(registry.size(), 1);
        assert_eq!(registry.get("A"), Some(42));
    }

    #[test]
    fn repeated_upsert_is_idempotent() {
        let mut once = SignalRegistry::new();
        once.upsert("A".to_string(), 40);

        let mut twice = SignalRegistry::new();
        twice.upsert("A".to_string(), 40);
        twice.upsert("A".to_string(), 40);

        assert_eq!(once.sorted_entries(), twice.sorted_entries());
    }

    #[test]
    fn sorted_entries_are_ordered_by_key() {
        let mut registry = SignalRegistry::new();
        registry.upsert("C".to_string(), 3);
        registry.upsert("A".to_string(), 1);
        registry.upsert("B".to_string(), 2);

        assert_eq!(registry.sorted_entries(), vec![("A", 1), ("B", 2), ("C", 3)]);
    }
}
