//! Registry of runnable examples keyed by name, in registration order.

use std::fmt;
use std::path::Path;

use anyhow::Result;
use indexmap::IndexMap;
use thiserror::Error;

use crate::sample::SampleData;

/// Procedure behind an example, tagged by the collaborators it needs injected.
pub enum Action {
    Plain(Box<dyn Fn() -> Result<()>>),
    TestData(Box<dyn Fn(SampleData) -> Result<()>>),
    OutputDir(Box<dyn Fn(&Path) -> Result<()>>),
    TestDataAndOutputDir(Box<dyn Fn(SampleData, &Path) -> Result<()>>),
}

impl Action {
    pub fn plain(f: impl Fn() -> Result<()> + 'static) -> Self {
        Action::Plain(Box::new(f))
    }

    pub fn with_test_data(f: impl Fn(SampleData) -> Result<()> + 'static) -> Self {
        Action::TestData(Box::new(f))
    }

    pub fn with_output_dir(f: impl Fn(&Path) -> Result<()> + 'static) -> Self {
        Action::OutputDir(Box::new(f))
    }

    pub fn with_test_data_and_output_dir(
        f: impl Fn(SampleData, &Path) -> Result<()> + 'static,
    ) -> Self {
        Action::TestDataAndOutputDir(Box::new(f))
    }

    pub fn needs_test_data(&self) -> bool {
        matches!(self, Action::TestData(_) | Action::TestDataAndOutputDir(_))
    }

    pub fn needs_output_dir(&self) -> bool {
        matches!(self, Action::OutputDir(_) | Action::TestDataAndOutputDir(_))
    }

    /// Call the procedure with exactly the collaborators its variant declares.
    /// Sample data is built fresh for every call.
    pub fn invoke(&self, output_dir: &Path) -> Result<()> {
        match self {
            Action::Plain(f) => f(),
            Action::TestData(f) => f(SampleData::new()),
            Action::OutputDir(f) => f(output_dir),
            Action::TestDataAndOutputDir(f) => f(SampleData::new(), output_dir),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Action::Plain(_) => "plain",
            Action::TestData(_) => "test-data",
            Action::OutputDir(_) => "output-dir",
            Action::TestDataAndOutputDir(_) => "test-data+output-dir",
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Action::{}", self.label())
    }
}

/// Metadata about one registered example.
#[derive(Debug)]
pub struct ExampleInfo {
    pub name: String,
    pub category: String,
    pub description: String,
    pub doc_url: Option<String>,
    pub tags: Vec<String>,
    pub action: Action,
}

impl ExampleInfo {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        action: Action,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            description: description.into(),
            doc_url: None,
            tags: Vec::new(),
            action,
        }
    }

    pub fn doc_url(mut self, url: impl Into<String>) -> Self {
        self.doc_url = Some(url.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn needs_test_data(&self) -> bool {
        self.action.needs_test_data()
    }

    pub fn needs_output_dir(&self) -> bool {
        self.action.needs_output_dir()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("example `{name}` is already registered")]
    DuplicateExample { name: String },
}

/// Owned table of examples. Populated during startup, read-only afterwards.
#[derive(Debug, Default)]
pub struct Registry {
    entries: IndexMap<String, ExampleInfo>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Record an example under its name. A name that is already taken is
    /// rejected and the existing entry is kept.
    pub fn register(&mut self, info: ExampleInfo) -> Result<(), RegistryError> {
        if self.entries.contains_key(&info.name) {
            return Err(RegistryError::DuplicateExample { name: info.name });
        }
        tracing::trace!(name = %info.name, category = %info.category, "registered example");
        self.entries.insert(info.name.clone(), info);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ExampleInfo> {
        self.entries.get(name)
    }

    pub fn all(&self) -> impl Iterator<Item = &ExampleInfo> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Group examples by category. Keys follow first-seen order and members keep
    /// registration order; nothing is sorted.
    pub fn by_category(&self) -> IndexMap<&str, Vec<&ExampleInfo>> {
        let mut groups: IndexMap<&str, Vec<&ExampleInfo>> = IndexMap::new();
        for info in self.entries.values() {
            groups.entry(info.category.as_str()).or_default().push(info);
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    fn noop(name: &str, category: &str) -> ExampleInfo {
        ExampleInfo::new(name, category, "does nothing", Action::plain(|| Ok(())))
    }

    #[test]
    fn get_returns_none_for_unknown_names() -> Result<()> {
        let mut registry = Registry::new();
        registry.register(noop("loop_range", "Loops"))?;
        assert!(registry.get("loop_range").is_some());
        assert!(registry.get("totally_unknown_name").is_none());
        Ok(())
    }

    #[test]
    fn duplicate_names_are_rejected() -> Result<()> {
        let mut registry = Registry::new();
        registry.register(noop("list_iterate", "Data Structures"))?;
        let err = registry
            .register(noop("list_iterate", "Loops"))
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateExample {
                name: "list_iterate".to_string()
            }
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("list_iterate").map(|i| i.category.as_str()),
            Some("Data Structures")
        );
        Ok(())
    }

    #[test]
    fn all_and_names_keep_registration_order() -> Result<()> {
        let mut registry = Registry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.register(noop(name, "Misc"))?;
        }
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        let all: Vec<_> = registry.all().map(|i| i.name.as_str()).collect();
        assert_eq!(all, names);
        Ok(())
    }

    #[test]
    fn by_category_groups_in_first_seen_order_and_is_stable() -> Result<()> {
        let mut registry = Registry::new();
        registry.register(noop("b1", "B"))?;
        registry.register(noop("a1", "A"))?;
        registry.register(noop("b2", "B"))?;
        registry.register(noop("a2", "A"))?;

        let first = registry.by_category();
        let keys: Vec<_> = first.keys().copied().collect();
        assert_eq!(keys, vec!["B", "A"]);
        let b: Vec<_> = first["B"].iter().map(|i| i.name.as_str()).collect();
        assert_eq!(b, vec!["b1", "b2"]);

        let second = registry.by_category();
        let b_again: Vec<_> = second["B"].iter().map(|i| i.name.as_str()).collect();
        assert_eq!(b, b_again);
        Ok(())
    }

    #[test]
    fn flags_follow_the_action_variant() {
        let info = ExampleInfo::new(
            "both",
            "Misc",
            "needs everything",
            Action::with_test_data_and_output_dir(|_, _| Ok(())),
        )
        .doc_url("https://doc.rust-lang.org/std/")
        .tags(["io", "data"]);
        assert!(info.needs_test_data());
        assert!(info.needs_output_dir());
        assert_eq!(info.tags, vec!["io", "data"]);
        assert_eq!(info.doc_url.as_deref(), Some("https://doc.rust-lang.org/std/"));

        let plain = noop("plain", "Misc");
        assert!(!plain.needs_test_data());
        assert!(!plain.needs_output_dir());
    }

    #[test]
    fn invoke_injects_declared_collaborators_only() -> Result<()> {
        let seen: Rc<RefCell<Vec<PathBuf>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let action = Action::with_output_dir(move |dir: &Path| {
            sink.borrow_mut().push(dir.to_path_buf());
            Ok(())
        });
        action.invoke(Path::new("out"))?;
        assert_eq!(*seen.borrow(), vec![PathBuf::from("out")]);
        assert_eq!(format!("{action:?}"), "Action::output-dir");
        Ok(())
    }
}
