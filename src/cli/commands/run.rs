use std::io;
use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use super::util::require_known_names;
use quickref::{Curriculum, Registry, Runner};

pub(crate) fn cmd_run_all(
    registry: &Registry,
    curriculum: &Curriculum,
    output_dir: PathBuf,
) -> Result<()> {
    let mut runner = Runner::new(registry, curriculum, output_dir, io::stdout());
    runner.run_all()
}

/// Names typed on the command line: all must exist before any example runs.
pub(crate) fn cmd_run_named(
    registry: &Registry,
    curriculum: &Curriculum,
    names: &[String],
    output_dir: PathBuf,
) -> Result<()> {
    require_known_names(registry, names)?;
    cmd_run_selected(registry, curriculum, names, output_dir)
}

/// Names from a config file: unknown entries are reported and skipped.
pub(crate) fn cmd_run_selected(
    registry: &Registry,
    curriculum: &Curriculum,
    names: &[String],
    output_dir: PathBuf,
) -> Result<()> {
    let mut runner = Runner::new(registry, curriculum, output_dir, io::stdout());
    let report = runner.run_selected(names)?;
    info!(
        ran = report.ran.len(),
        skipped = report.skipped.len(),
        "selected run finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickref::standard_registry;

    #[test]
    fn config_names_skip_unknown_entries() -> Result<()> {
        let registry = standard_registry()?;
        let dir = tempfile::tempdir()?;
        let names = vec!["no_such_example".to_string()];
        cmd_run_selected(&registry, Curriculum::standard(), &names, dir.path().join("data"))?;
        Ok(())
    }

    #[test]
    fn command_line_names_must_all_exist() -> Result<()> {
        let registry = standard_registry()?;
        let dir = tempfile::tempdir()?;
        let names = vec!["basic_types".to_string(), "no_such_example".to_string()];
        let err = cmd_run_named(&registry, Curriculum::standard(), &names, dir.path().join("data"))
            .unwrap_err();
        assert!(err.to_string().contains("no examples were run"));
        Ok(())
    }
}
