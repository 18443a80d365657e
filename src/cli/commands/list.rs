use std::io;
use std::path::PathBuf;

use anyhow::Result;

use quickref::{Curriculum, Registry, Runner};

pub(crate) fn cmd_list(
    registry: &Registry,
    curriculum: &Curriculum,
    output_dir: PathBuf,
) -> Result<()> {
    let mut runner = Runner::new(registry, curriculum, output_dir, io::stdout());
    runner.list_examples()
}
