//! Projections of a registry through a curriculum.

use std::collections::HashSet;

use crate::lesson::{Curriculum, Lesson};
use crate::registry::{ExampleInfo, Registry};

/// An example in the flattened run order, with the lesson that emitted it.
#[derive(Clone, Copy, Debug)]
pub struct Placement<'a> {
    pub lesson: Option<&'a Lesson>,
    pub example: &'a ExampleInfo,
}

/// Examples of one lesson: its categories in lesson order, each category's
/// examples in registration order. A repeated category contributes once.
pub fn examples_for<'a>(registry: &'a Registry, lesson: &Lesson) -> Vec<&'a ExampleInfo> {
    let by_category = registry.by_category();
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for category in &lesson.categories {
        let Some(members) = by_category.get(category.as_str()) else {
            continue;
        };
        for info in members {
            if seen.insert(info.name.as_str()) {
                out.push(*info);
            }
        }
    }
    out
}

/// Every registered example exactly once: lesson by lesson, then the examples
/// no lesson claims, in registry order.
pub fn placements<'a>(registry: &'a Registry, curriculum: &'a Curriculum) -> Vec<Placement<'a>> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::with_capacity(registry.len());
    for lesson in curriculum.lessons() {
        for example in examples_for(registry, lesson) {
            if seen.insert(example.name.as_str()) {
                out.push(Placement {
                    lesson: Some(lesson),
                    example,
                });
            }
        }
    }
    for example in registry.all() {
        if !seen.contains(example.name.as_str()) {
            out.push(Placement {
                lesson: None,
                example,
            });
        }
    }
    out
}

/// Canonical run-everything order.
pub fn examples_in_lesson_order<'a>(
    registry: &'a Registry,
    curriculum: &'a Curriculum,
) -> Vec<&'a ExampleInfo> {
    placements(registry, curriculum)
        .into_iter()
        .map(|p| p.example)
        .collect()
}

/// Lesson categories for which nothing is registered, as `(lesson number, category)`.
pub fn missing_categories<'a>(
    registry: &Registry,
    curriculum: &'a Curriculum,
) -> Vec<(u32, &'a str)> {
    let by_category = registry.by_category();
    curriculum
        .lessons()
        .iter()
        .flat_map(|lesson| {
            lesson
                .categories
                .iter()
                .map(move |category| (lesson.number, category.as_str()))
        })
        .filter(|(_, category)| !by_category.contains_key(category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Action;
    use anyhow::Result;

    fn add(registry: &mut Registry, name: &str, category: &str) -> Result<()> {
        registry.register(ExampleInfo::new(
            name,
            category,
            "test example",
            Action::plain(|| Ok(())),
        ))?;
        Ok(())
    }

    fn names(examples: &[&ExampleInfo]) -> Vec<String> {
        examples.iter().map(|e| e.name.clone()).collect()
    }

    fn two_lessons() -> Curriculum {
        Curriculum::new(vec![
            Lesson::new(1, "Data Structures", "", ["Data Structures"]),
            Lesson::new(2, "Strings & Control Flow", "", ["Loops"]),
        ])
    }

    #[test]
    fn end_to_end_lesson_order() -> Result<()> {
        let mut registry = Registry::new();
        add(&mut registry, "loop_range", "Loops")?;
        add(&mut registry, "list_iterate", "Data Structures")?;
        add(&mut registry, "list_modify", "Data Structures")?;

        let curriculum = two_lessons();
        let ordered = examples_in_lesson_order(&registry, &curriculum);
        assert_eq!(
            names(&ordered),
            vec!["list_iterate", "list_modify", "loop_range"]
        );
        Ok(())
    }

    #[test]
    fn unassigned_examples_come_last_in_registration_order() -> Result<()> {
        let mut registry = Registry::new();
        add(&mut registry, "spawn_threads", "Concurrency")?;
        add(&mut registry, "loop_range", "Loops")?;
        add(&mut registry, "generic_fn", "Type System")?;
        add(&mut registry, "list_iterate", "Data Structures")?;

        let curriculum = two_lessons();
        let placed = placements(&registry, &curriculum);
        let order: Vec<_> = placed.iter().map(|p| p.example.name.as_str()).collect();
        assert_eq!(
            order,
            vec!["list_iterate", "loop_range", "spawn_threads", "generic_fn"]
        );
        assert_eq!(placed[0].lesson.map(|l| l.number), Some(1));
        assert_eq!(placed[1].lesson.map(|l| l.number), Some(2));
        assert!(placed[2].lesson.is_none());
        assert!(placed[3].lesson.is_none());
        Ok(())
    }

    #[test]
    fn every_name_appears_exactly_once() -> Result<()> {
        let mut registry = Registry::new();
        for (name, category) in [
            ("a", "Loops"),
            ("b", "Data Structures"),
            ("c", "Elsewhere"),
            ("d", "Loops"),
        ] {
            add(&mut registry, name, category)?;
        }
        // A category claimed by two lessons must still emit each example once.
        let curriculum = Curriculum::new(vec![
            Lesson::new(1, "One", "", ["Data Structures", "Loops"]),
            Lesson::new(2, "Two", "", ["Loops"]),
        ]);
        let ordered = names(&examples_in_lesson_order(&registry, &curriculum));
        let unique: HashSet<_> = ordered.iter().collect();
        assert_eq!(unique.len(), ordered.len());
        assert_eq!(ordered.len(), registry.len());
        assert_eq!(ordered, vec!["b", "a", "d", "c"]);
        Ok(())
    }

    #[test]
    fn repeated_category_in_one_lesson_is_deduplicated() -> Result<()> {
        let mut registry = Registry::new();
        add(&mut registry, "loop_range", "Loops")?;
        let lesson = Lesson::new(1, "Loops twice", "", ["Loops", "Loops"]);
        assert_eq!(names(&examples_for(&registry, &lesson)), vec!["loop_range"]);
        Ok(())
    }

    #[test]
    fn missing_categories_are_reported() -> Result<()> {
        let mut registry = Registry::new();
        add(&mut registry, "list_iterate", "Data Structures")?;
        let curriculum = two_lessons();
        assert_eq!(missing_categories(&registry, &curriculum), vec![(2, "Loops")]);
        assert!(examples_for(&registry, &curriculum.lessons()[1]).is_empty());
        Ok(())
    }
}
