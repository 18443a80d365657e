//! Lesson catalogue: the ordered curriculum grouping example categories.

use once_cell::sync::Lazy;

/// A pedagogical unit aggregating one or more categories.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lesson {
    /// Declared ordinal, used for display and lookup. Need not match the index.
    pub number: u32,
    pub title: String,
    pub goal: String,
    pub categories: Vec<String>,
    pub doc_url: Option<String>,
}

impl Lesson {
    pub fn new<I, S>(
        number: u32,
        title: impl Into<String>,
        goal: impl Into<String>,
        categories: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            number,
            title: title.into(),
            goal: goal.into(),
            categories: categories.into_iter().map(Into::into).collect(),
            doc_url: None,
        }
    }

    pub fn doc_url(mut self, url: impl Into<String>) -> Self {
        self.doc_url = Some(url.into());
        self
    }
}

/// Immutable ordered sequence of lessons.
#[derive(Clone, Debug, Default)]
pub struct Curriculum {
    lessons: Vec<Lesson>,
}

impl Curriculum {
    pub fn new(lessons: Vec<Lesson>) -> Self {
        Self { lessons }
    }

    /// The built-in beginner-to-advanced progression.
    pub fn standard() -> &'static Curriculum {
        &STANDARD
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// Look a lesson up by its declared number.
    pub fn lesson(&self, number: u32) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| lesson.number == number)
    }

    /// Smallest and largest declared lesson numbers, if any lessons exist.
    pub fn number_range(&self) -> Option<(u32, u32)> {
        let min = self.lessons.iter().map(|l| l.number).min()?;
        let max = self.lessons.iter().map(|l| l.number).max()?;
        Some((min, max))
    }
}

pub const DATA_STRUCTURES: &str = "Data Structures";
pub const CONTROL_FLOW: &str = "Control Flow";
pub const STRINGS: &str = "Strings";
pub const LOOPS: &str = "Loops";
pub const FUNCTIONAL: &str = "Functional";
pub const STRUCTS_TRAITS: &str = "Structs & Traits";
pub const ERROR_HANDLING: &str = "Error Handling";
pub const COLLECTIONS: &str = "Collections";
pub const FILE_OPERATIONS: &str = "File Operations";
pub const ADVANCED: &str = "Advanced";
pub const MODERN_RUST: &str = "Modern Rust";
pub const STDLIB_TOOLS: &str = "Stdlib Tools";
pub const DESIGN_PATTERNS: &str = "Design Patterns";
pub const PRACTICAL_PATTERNS: &str = "Practical Patterns";
// Registered but not part of any lesson; they run after the curriculum.
pub const CONCURRENCY: &str = "Concurrency";
pub const TYPE_SYSTEM: &str = "Type System";
pub const ITERATORS_GUARDS: &str = "Iterators & Scope Guards";
pub const ADVANCED_TRAITS: &str = "Advanced Traits";
pub const MODULES_PACKAGING: &str = "Modules & Packaging";
pub const TESTING_DEBUGGING: &str = "Testing & Debugging";

static STANDARD: Lazy<Curriculum> = Lazy::new(|| {
    Curriculum::new(vec![
        Lesson::new(
            1,
            "Data Structures",
            "Scalars, Vec, HashMap, HashSet, tuples, slicing, iterator collection",
            [DATA_STRUCTURES],
        )
        .doc_url("https://doc.rust-lang.org/book/ch08-00-common-collections.html"),
        Lesson::new(
            2,
            "Strings & Control Flow",
            "if/else, if let, loop/while/for, String and &str manipulation",
            [CONTROL_FLOW, STRINGS, LOOPS],
        )
        .doc_url("https://doc.rust-lang.org/book/ch03-05-control-flow.html"),
        Lesson::new(
            3,
            "Functions & Closures",
            "fn, closures, Fn/FnMut/FnOnce, iterator adapters, recursion, higher-order functions",
            [FUNCTIONAL],
        )
        .doc_url("https://doc.rust-lang.org/book/ch13-00-functional-features.html"),
        Lesson::new(
            4,
            "Structs & Traits",
            "Structs, impl blocks, traits, default methods, operator overloading",
            [STRUCTS_TRAITS],
        )
        .doc_url("https://doc.rust-lang.org/book/ch10-02-traits.html"),
        Lesson::new(
            5,
            "Error Handling",
            "Result, Option, the ? operator, custom error types",
            [ERROR_HANDLING],
        )
        .doc_url("https://doc.rust-lang.org/book/ch09-00-error-handling.html"),
        Lesson::new(
            6,
            "Collections",
            "Entry API counters, VecDeque, BTreeMap, IndexMap, BinaryHeap and sorting",
            [COLLECTIONS],
        )
        .doc_url("https://doc.rust-lang.org/std/collections/index.html"),
        Lesson::new(
            7,
            "File I/O & Data Formats",
            "Reading and writing files, RAII guards, JSON and YAML with serde, regex, itertools",
            [FILE_OPERATIONS, ADVANCED],
        )
        .doc_url("https://doc.rust-lang.org/std/fs/index.html"),
        Lesson::new(
            8,
            "Modern Rust",
            "Derives, pattern matching, let-else, enums with data, custom iterators",
            [MODERN_RUST],
        )
        .doc_url("https://doc.rust-lang.org/edition-guide/rust-2024/index.html"),
        Lesson::new(
            9,
            "Standard Library",
            "Path, chrono dates and times, lazy statics, hashing digests",
            [STDLIB_TOOLS],
        )
        .doc_url("https://doc.rust-lang.org/std/index.html"),
        Lesson::new(
            10,
            "Design Patterns",
            "Factory, strategy, observer, builder",
            [DESIGN_PATTERNS],
        )
        .doc_url("https://rust-unofficial.github.io/patterns/"),
        Lesson::new(
            11,
            "Practical Patterns",
            "Retry, timeout, pipeline, batching, grouping, config layering, memoization",
            [PRACTICAL_PATTERNS],
        )
        .doc_url("https://rust-unofficial.github.io/patterns/idioms/index.html"),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_lookup_by_declared_number() {
        let curriculum = Curriculum::standard();
        let first = curriculum.lesson(1).expect("lesson 1");
        assert_eq!(first.title, "Data Structures");
        assert!(curriculum.lesson(0).is_none());

        let (_, max) = curriculum.number_range().expect("lessons exist");
        assert!(curriculum.lesson(max).is_some());
        assert!(curriculum.lesson(max + 1).is_none());
    }

    #[test]
    fn lookup_does_not_rely_on_position() {
        let curriculum = Curriculum::new(vec![
            Lesson::new(10, "Ten", "", ["A"]),
            Lesson::new(3, "Three", "", ["B"]),
        ]);
        assert_eq!(curriculum.lesson(3).map(|l| l.title.as_str()), Some("Three"));
        assert_eq!(curriculum.number_range(), Some((3, 10)));
        assert!(curriculum.lesson(1).is_none());
    }

    #[test]
    fn standard_lessons_are_numbered_in_order() {
        let numbers: Vec<_> = Curriculum::standard()
            .lessons()
            .iter()
            .map(|l| l.number)
            .collect();
        assert_eq!(numbers, (1..=11).collect::<Vec<_>>());
        assert!(Curriculum::standard().lessons().iter().all(|l| l.doc_url.is_some()));
    }
}
