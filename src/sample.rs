//! Representative values handed to examples that declare they need test data.

use std::collections::{BTreeMap, BTreeSet};

/// Fresh bundle of sample values. Every invocation gets its own instance, so an
/// example mutating `testlist` never affects the next one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleData {
    pub testlist: Vec<String>,
    pub testdict: BTreeMap<String, i32>,
    pub testset: BTreeSet<i32>,
    pub testtuple: (i32, i32, i32),
    pub teststring: String,
}

impl SampleData {
    pub fn new() -> Self {
        Self {
            testlist: ["apple", "banana", "cherry"]
                .into_iter()
                .map(String::from)
                .collect(),
            testdict: [("a", 1), ("b", 2), ("c", 3)]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            testset: BTreeSet::from([1, 2, 3]),
            testtuple: (10, 20, 30),
            teststring: "Rust is awesome!".to_string(),
        }
    }
}

impl Default for SampleData {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_instances_are_independent() {
        let mut first = SampleData::new();
        first.testlist.push("four".to_string());
        first.testset.insert(4);

        let second = SampleData::new();
        assert_eq!(second.testlist, vec!["apple", "banana", "cherry"]);
        assert!(!second.testset.contains(&4));
        assert_eq!(second, SampleData::default());
    }
}
