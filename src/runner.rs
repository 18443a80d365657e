//! Executes examples with their declared collaborators and prints progress banners.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::lesson::{Curriculum, Lesson};
use crate::registry::{ExampleInfo, Registry};
use crate::resolve;

const BANNER_WIDTH: usize = 60;

/// Outcome of a selective run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub ran: Vec<String>,
    pub skipped: Vec<String>,
}

pub struct Runner<'a, W: Write> {
    registry: &'a Registry,
    curriculum: &'a Curriculum,
    output_dir: PathBuf,
    output_dir_ready: bool,
    out: W,
}

impl<'a, W: Write> Runner<'a, W> {
    pub fn new(
        registry: &'a Registry,
        curriculum: &'a Curriculum,
        output_dir: impl Into<PathBuf>,
        out: W,
    ) -> Self {
        Self {
            registry,
            curriculum,
            output_dir: output_dir.into(),
            output_dir_ready: false,
            out,
        }
    }

    /// Give back the writer, e.g. to inspect captured banners.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Run the whole curriculum in canonical order. A lesson banner is printed
    /// whenever the lesson changes; examples outside every lesson get none.
    pub fn run_all(&mut self) -> Result<()> {
        let registry = self.registry;
        let curriculum = self.curriculum;
        let placements = resolve::placements(registry, curriculum);
        info!(count = placements.len(), "running all examples");

        let mut current: Option<u32> = None;
        for placement in placements {
            let number = placement.lesson.map(|lesson| lesson.number);
            if let Some(lesson) = placement.lesson {
                if number != current {
                    self.print_lesson_header(lesson)?;
                }
            }
            current = number;
            self.run_one(placement.example)?;
        }
        Ok(())
    }

    /// Run the named examples in request order. Unknown names are reported and
    /// skipped; repeated names run repeatedly.
    pub fn run_selected<S: AsRef<str>>(&mut self, names: &[S]) -> Result<RunReport> {
        let registry = self.registry;
        let mut report = RunReport::default();
        for name in names {
            let name = name.as_ref();
            match registry.get(name) {
                Some(example) => {
                    self.run_one(example)?;
                    report.ran.push(name.to_string());
                }
                None => {
                    writeln!(self.out, "Warning: example '{name}' not found, skipping")?;
                    report.skipped.push(name.to_string());
                }
            }
        }
        Ok(report)
    }

    pub fn run_lesson(&mut self, lesson: &Lesson) -> Result<()> {
        let registry = self.registry;
        let examples = resolve::examples_for(registry, lesson);
        info!(lesson = lesson.number, count = examples.len(), "running lesson");
        self.print_lesson_header(lesson)?;
        for example in examples {
            self.run_one(example)?;
        }
        Ok(())
    }

    /// Print the curriculum: every lesson with its examples, then a total.
    pub fn list_examples(&mut self) -> Result<()> {
        let registry = self.registry;
        let curriculum = self.curriculum;
        for lesson in curriculum.lessons() {
            writeln!(self.out, "Lesson {}: {}", lesson.number, lesson.title)?;
            writeln!(self.out, "  {}", lesson.goal)?;
            if let Some(url) = &lesson.doc_url {
                writeln!(self.out, "  Docs: {url}")?;
            }
            for example in resolve::examples_for(registry, lesson) {
                writeln!(self.out, "    {:<24} {}", example.name, example.description)?;
            }
            writeln!(self.out)?;
        }

        let unassigned: Vec<&ExampleInfo> = resolve::placements(registry, curriculum)
            .into_iter()
            .filter(|p| p.lesson.is_none())
            .map(|p| p.example)
            .collect();
        if !unassigned.is_empty() {
            writeln!(self.out, "Additional examples")?;
            for example in unassigned {
                writeln!(
                    self.out,
                    "    {:<24} {} [{}]",
                    example.name, example.description, example.category
                )?;
            }
            writeln!(self.out)?;
        }

        writeln!(
            self.out,
            "{} examples across {} lessons",
            registry.len(),
            curriculum.lessons().len()
        )?;
        Ok(())
    }

    fn run_one(&mut self, example: &ExampleInfo) -> Result<()> {
        self.print_example_header(example)?;
        if example.needs_output_dir() {
            self.ensure_output_dir()?;
        }
        // banners must reach the terminal before the example prints anything
        self.out.flush()?;
        debug!(
            example = %example.name,
            action = ?example.action,
            "invoking example"
        );
        example
            .action
            .invoke(&self.output_dir)
            .with_context(|| format!("example `{}` failed", example.name))
    }

    fn ensure_output_dir(&mut self) -> Result<()> {
        if self.output_dir_ready {
            return Ok(());
        }
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "failed to create output directory {}",
                self.output_dir.display()
            )
        })?;
        debug!(dir = %self.output_dir.display(), "output directory ready");
        self.output_dir_ready = true;
        Ok(())
    }

    fn print_lesson_header(&mut self, lesson: &Lesson) -> Result<()> {
        let rule = "=".repeat(BANNER_WIDTH);
        writeln!(self.out)?;
        writeln!(self.out, "{rule}")?;
        writeln!(self.out, "Lesson {}: {}", lesson.number, lesson.title)?;
        writeln!(self.out, "{}", lesson.goal)?;
        if let Some(url) = &lesson.doc_url {
            writeln!(self.out, "Docs: {url}")?;
        }
        writeln!(self.out, "{rule}")?;
        Ok(())
    }

    fn print_example_header(&mut self, example: &ExampleInfo) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- {}: {} ---", example.name, example.description)?;
        if let Some(url) = &example.doc_url {
            writeln!(self.out, "Docs: {url}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Action;
    use crate::sample::SampleData;
    use anyhow::bail;
    use std::cell::RefCell;
    use std::path::Path;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    fn recording(registry: &mut Registry, log: &Log, name: &str, category: &str) -> Result<()> {
        let sink = Rc::clone(log);
        let label = name.to_string();
        registry.register(ExampleInfo::new(
            name,
            category,
            format!("{name} description"),
            Action::plain(move || {
                sink.borrow_mut().push(label.clone());
                Ok(())
            }),
        ))?;
        Ok(())
    }

    fn curriculum() -> Curriculum {
        Curriculum::new(vec![
            Lesson::new(1, "Data Structures", "collections", ["Data Structures"]),
            Lesson::new(2, "Strings & Control Flow", "loops", ["Loops"]),
        ])
    }

    fn captured(runner: Runner<'_, Vec<u8>>) -> String {
        String::from_utf8(runner.into_inner()).expect("utf-8 output")
    }

    #[test]
    fn run_all_prints_lesson_banner_only_on_change() -> Result<()> {
        let log = Log::default();
        let mut registry = Registry::new();
        recording(&mut registry, &log, "list_iterate", "Data Structures")?;
        recording(&mut registry, &log, "list_modify", "Data Structures")?;
        recording(&mut registry, &log, "loop_range", "Loops")?;
        recording(&mut registry, &log, "orphan", "Nowhere")?;
        let curriculum = curriculum();

        let dir = tempfile::tempdir()?;
        let mut runner = Runner::new(&registry, &curriculum, dir.path(), Vec::new());
        runner.run_all()?;
        let text = captured(runner);

        assert_eq!(
            *log.borrow(),
            vec!["list_iterate", "list_modify", "loop_range", "orphan"]
        );
        assert_eq!(text.matches("Lesson 1: Data Structures").count(), 1);
        assert_eq!(text.matches("Lesson 2: Strings & Control Flow").count(), 1);
        assert_eq!(text.matches("Lesson ").count(), 2);

        let banner_1 = text.find("Lesson 1:").expect("lesson 1 banner");
        let first = text.find("--- list_iterate:").expect("first example");
        let second = text.find("--- list_modify:").expect("second example");
        let banner_2 = text.find("Lesson 2:").expect("lesson 2 banner");
        let third = text.find("--- loop_range:").expect("third example");
        let orphan = text.find("--- orphan:").expect("orphan example");
        assert!(banner_1 < first && first < second && second < banner_2);
        assert!(banner_2 < third && third < orphan);
        Ok(())
    }

    #[test]
    fn run_selected_skips_unknown_names_with_warning() -> Result<()> {
        let log = Log::default();
        let mut registry = Registry::new();
        recording(&mut registry, &log, "loop_range", "Loops")?;
        let curriculum = curriculum();

        let dir = tempfile::tempdir()?;
        let mut runner = Runner::new(&registry, &curriculum, dir.path(), Vec::new());
        let report = runner.run_selected(&["no_such_example", "loop_range", "loop_range"])?;
        let text = captured(runner);

        assert_eq!(report.ran, vec!["loop_range", "loop_range"]);
        assert_eq!(report.skipped, vec!["no_such_example"]);
        assert_eq!(*log.borrow(), vec!["loop_range", "loop_range"]);
        assert!(text.contains("Warning: example 'no_such_example' not found, skipping"));
        assert!(!text.contains("Lesson "));
        Ok(())
    }

    #[test]
    fn run_lesson_prints_one_banner_then_its_examples() -> Result<()> {
        let log = Log::default();
        let mut registry = Registry::new();
        recording(&mut registry, &log, "loop_range", "Loops")?;
        recording(&mut registry, &log, "list_iterate", "Data Structures")?;
        let curriculum = curriculum();
        let lesson = curriculum.lesson(2).expect("lesson 2");

        let dir = tempfile::tempdir()?;
        let mut runner = Runner::new(&registry, &curriculum, dir.path(), Vec::new());
        runner.run_lesson(lesson)?;
        let text = captured(runner);

        assert_eq!(*log.borrow(), vec!["loop_range"]);
        assert_eq!(text.matches("Lesson 2: Strings & Control Flow").count(), 1);
        assert!(text.contains("--- loop_range: loop_range description ---"));
        Ok(())
    }

    #[test]
    fn test_data_is_fresh_per_invocation() -> Result<()> {
        let lists: Rc<RefCell<Vec<Vec<String>>>> = Rc::default();
        let sink = Rc::clone(&lists);
        let mut registry = Registry::new();
        registry.register(ExampleInfo::new(
            "list_modify",
            "Data Structures",
            "append to the list",
            Action::with_test_data(move |mut data: SampleData| {
                data.testlist.push("four".to_string());
                sink.borrow_mut().push(data.testlist);
                Ok(())
            }),
        ))?;
        let curriculum = curriculum();
        let dir = tempfile::tempdir()?;
        let out_dir = dir.path().join("never-created");
        let mut runner = Runner::new(&registry, &curriculum, &out_dir, Vec::new());
        runner.run_selected(&["list_modify", "list_modify"])?;

        let lists = lists.borrow();
        assert_eq!(lists.len(), 2);
        for list in lists.iter() {
            assert_eq!(list, &vec!["apple", "banana", "cherry", "four"]);
        }
        // no output-dir capability, so the directory is left alone
        assert!(!out_dir.exists());
        Ok(())
    }

    #[test]
    fn output_dir_is_created_before_first_writer() -> Result<()> {
        let mut registry = Registry::new();
        registry.register(ExampleInfo::new(
            "file_write",
            "File Operations",
            "write a file",
            Action::with_output_dir(|dir: &Path| {
                fs::write(dir.join("hello.txt"), "hello")?;
                Ok(())
            }),
        ))?;
        let curriculum = curriculum();
        let dir = tempfile::tempdir()?;
        let out_dir = dir.path().join("nested").join("output");
        let mut runner = Runner::new(&registry, &curriculum, &out_dir, Vec::new());
        runner.run_selected(&["file_write"])?;
        assert_eq!(fs::read_to_string(out_dir.join("hello.txt"))?, "hello");
        Ok(())
    }

    #[test]
    fn example_failure_aborts_the_run() -> Result<()> {
        let log = Log::default();
        let mut registry = Registry::new();
        recording(&mut registry, &log, "list_iterate", "Data Structures")?;
        registry.register(ExampleInfo::new(
            "broken",
            "Data Structures",
            "always fails",
            Action::plain(|| bail!("boom")),
        ))?;
        recording(&mut registry, &log, "loop_range", "Loops")?;
        let curriculum = curriculum();

        let dir = tempfile::tempdir()?;
        let mut runner = Runner::new(&registry, &curriculum, dir.path(), Vec::new());
        let err = runner.run_all().unwrap_err();
        assert!(format!("{err:#}").contains("example `broken` failed: boom"));
        assert_eq!(*log.borrow(), vec!["list_iterate"]);
        Ok(())
    }

    #[test]
    fn list_examples_shows_lessons_and_total() -> Result<()> {
        let log = Log::default();
        let mut registry = Registry::new();
        recording(&mut registry, &log, "list_iterate", "Data Structures")?;
        recording(&mut registry, &log, "loop_range", "Loops")?;
        recording(&mut registry, &log, "orphan", "Nowhere")?;
        let curriculum = curriculum();

        let mut runner = Runner::new(&registry, &curriculum, "unused", Vec::new());
        runner.list_examples()?;
        let text = captured(runner);

        assert!(text.contains("Lesson 1: Data Structures"));
        assert!(text.contains("list_iterate"));
        assert!(text.contains("orphan"));
        assert!(text.trim_end().ends_with("3 examples across 2 lessons"));
        assert!(log.borrow().is_empty());
        Ok(())
    }
}
