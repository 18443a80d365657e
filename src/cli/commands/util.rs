use anyhow::{Result, bail};

use quickref::suggest::{self, DEFAULT_CUTOFF, DEFAULT_LIMIT};
use quickref::{Curriculum, Lesson, Registry};

/// One report line per unknown name, with suggestions when any are close.
pub(crate) fn unknown_name_messages<S: AsRef<str>>(
    registry: &Registry,
    names: &[S],
) -> Vec<String> {
    let mut messages = Vec::new();
    for name in names {
        let name = name.as_ref();
        if registry.get(name).is_some() {
            continue;
        }
        messages.push(format!("Unknown example '{name}'"));
        let matches =
            suggest::close_matches(name, registry.names(), DEFAULT_LIMIT, DEFAULT_CUTOFF);
        if !matches.is_empty() {
            messages.push(format!("Did you mean: {}?", matches.join(", ")));
        }
    }
    messages
}

/// Fail before anything runs when a requested name is not registered.
pub(crate) fn require_known_names<S: AsRef<str>>(registry: &Registry, names: &[S]) -> Result<()> {
    let messages = unknown_name_messages(registry, names);
    if messages.is_empty() {
        return Ok(());
    }
    for line in &messages {
        eprintln!("{line}");
    }
    bail!("no examples were run");
}

pub(crate) fn lookup_lesson(curriculum: &Curriculum, number: u32) -> Result<&Lesson> {
    match curriculum.lesson(number) {
        Some(lesson) => Ok(lesson),
        None => match curriculum.number_range() {
            Some((first, last)) => bail!("unknown lesson {number} (valid: {first}-{last})"),
            None => bail!("unknown lesson {number} (no lessons defined)"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickref::{Action, ExampleInfo};

    fn registry() -> Result<Registry> {
        let mut registry = Registry::new();
        for name in ["list_iterate", "list_modify", "loop_range"] {
            registry.register(ExampleInfo::new(
                name,
                "Data Structures",
                "test",
                Action::plain(|| Ok(())),
            ))?;
        }
        Ok(registry)
    }

    #[test]
    fn unknown_names_get_suggestions() -> Result<()> {
        let registry = registry()?;
        let messages =
            unknown_name_messages(&registry, &["list_iterat", "loop_range", "zzzzzz"]);
        assert_eq!(messages[0], "Unknown example 'list_iterat'");
        assert!(messages[1].starts_with("Did you mean: list_iterate"));
        assert_eq!(messages[2], "Unknown example 'zzzzzz'");
        assert_eq!(messages.len(), 3);
        Ok(())
    }

    #[test]
    fn known_names_pass() -> Result<()> {
        let registry = registry()?;
        require_known_names(&registry, &["loop_range", "list_modify"])?;
        assert!(require_known_names(&registry, &["nope"]).is_err());
        Ok(())
    }

    #[test]
    fn lesson_lookup_reports_valid_range() {
        let curriculum = Curriculum::standard();
        assert_eq!(lookup_lesson(curriculum, 1).map(|l| l.number).ok(), Some(1));
        let err = lookup_lesson(curriculum, 99).unwrap_err();
        assert_eq!(err.to_string(), "unknown lesson 99 (valid: 1-11)");
        let empty = Curriculum::default();
        assert!(lookup_lesson(&empty, 1).is_err());
    }
}
