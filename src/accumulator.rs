//! Insertion-ordered record of completed stage results

use indexmap::IndexMap;

/// Read view over the results of all previously completed stages.
///
/// Entries appear in execution order, keyed by stage name; only stages whose
/// `before`, `up`, and `after` all succeeded are present. A fresh accumulator
/// is created per execution and discarded when it finishes. Stages receive an
/// owned snapshot, so nothing a stage does to its copy can reach engine state.
#[derive(Clone, Debug)]
pub struct Accumulator<T> {
    entries: IndexMap<String, T>,
}

impl<T> Accumulator<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub(crate) fn record(&mut self, name: String, result: T) {
        self.entries.insert(name, result);
    }

    /// Removes and returns a stage's result, preserving the order of the rest.
    pub(crate) fn take(&mut self, name: &str) -> Option<T> {
        self.entries.shift_remove(name)
    }

    /// Look up a completed stage's result by name
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    /// Whether a stage of this name has completed
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of completed stages
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no stage has completed yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of completed stages, in execution order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Name/result pairs, in execution order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(name, result)| (name.as_str(), result))
    }
}

impl<T> Default for Accumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut results = Accumulator::new();
        results.record("charge".to_string(), 1);
        results.record("ship".to_string(), 2);
        results.record("notify".to_string(), 3);

        let names: Vec<&str> = results.names().collect();
        assert_eq!(names, vec!["charge", "ship", "notify"]);
    }

    #[test]
    fn take_keeps_remaining_order() {
        let mut results = Accumulator::new();
        results.record("a".to_string(), 1);
        results.record("b".to_string(), 2);
        results.record("c".to_string(), 3);

        assert_eq!(results.take("b"), Some(2));
        assert_eq!(results.take("b"), None);

        let names: Vec<&str> = results.names().collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn lookup_by_name() {
        let mut results = Accumulator::new();
        results.record("charge".to_string(), 42);

        assert_eq!(results.get("charge"), Some(&42));
        assert!(results.contains("charge"));
        assert!(!results.contains("ship"));
        assert_eq!(results.len(), 1);
        assert!(!results.is_empty());
    }
}
