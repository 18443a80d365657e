use std::io;
use std::path::PathBuf;

use anyhow::Result;

use super::util::lookup_lesson;
use quickref::{Curriculum, Registry, Runner};

pub(crate) fn cmd_lesson(
    registry: &Registry,
    curriculum: &Curriculum,
    number: u32,
    output_dir: PathBuf,
) -> Result<()> {
    let lesson = lookup_lesson(curriculum, number)?;
    let mut runner = Runner::new(registry, curriculum, output_dir, io::stdout());
    runner.run_lesson(lesson)
}
