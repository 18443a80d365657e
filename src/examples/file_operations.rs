//! Reading and writing files under the run's output directory.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::lesson::FILE_OPERATIONS;
use crate::registry::{Action, ExampleInfo, Registry, RegistryError};
use crate::sample::SampleData;
use crate::show::{output_path, show, show_result};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        ExampleInfo::new(
            "file_write",
            FILE_OPERATIONS,
            "fs::write, fs::read_to_string and appending with OpenOptions",
            Action::with_output_dir(file_write),
        )
        .doc_url("https://doc.rust-lang.org/std/fs/index.html"),
    )?;
    registry.register(
        ExampleInfo::new(
            "buffered_lines",
            FILE_OPERATIONS,
            "BufWriter for writing, BufReader::lines for streaming reads",
            Action::with_test_data_and_output_dir(buffered_lines),
        )
        .doc_url("https://doc.rust-lang.org/std/io/trait.BufRead.html#method.lines"),
    )?;
    registry.register(
        ExampleInfo::new(
            "scoped_resources",
            FILE_OPERATIONS,
            "RAII: files close on drop and Drop guards clean up temporary files",
            Action::with_output_dir(scoped_resources),
        )
        .doc_url("https://doc.rust-lang.org/std/ops/trait.Drop.html"),
    )?;
    Ok(())
}

fn file_write(dir: &Path) -> Result<()> {
    let path = output_path(dir, "notes.txt");
    show("fs::write(&path, \"first line\\n\")?;");
    fs::write(&path, "first line\n").with_context(|| format!("failed to write {}", path.display()))?;

    show("let mut file = OpenOptions::new().append(true).open(&path)?;\nwriteln!(file, \"second line\")?;");
    let mut file = OpenOptions::new()
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    writeln!(file, "second line")?;
    drop(file);

    let contents = fs::read_to_string(&path)?;
    show_result("fs::read_to_string(&path)?", format!("{contents:?}"));

    let meta = fs::metadata(&path)?;
    println!("{} is {} bytes", path.display(), meta.len());
    Ok(())
}

fn buffered_lines(data: SampleData, dir: &Path) -> Result<()> {
    let path = output_path(dir, "fruits.txt");
    show("let mut writer = BufWriter::new(File::create(&path)?);\nfor item in &data.testlist { writeln!(writer, \"{item}\")?; }");
    let mut writer = BufWriter::new(
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?,
    );
    for (i, item) in data.testlist.iter().enumerate() {
        writeln!(writer, "{i},{item}")?;
    }
    writer.flush()?;

    show("for line in BufReader::new(File::open(&path)?).lines() { let line = line?; .. }");
    let reader = BufReader::new(File::open(&path)?);
    for line in reader.lines() {
        let line = line?;
        if let Some((index, fruit)) = line.split_once(',') {
            println!("row {index}: {fruit}");
        }
    }
    Ok(())
}

/// Removes the file at `path` when dropped.
struct TempFile {
    path: PathBuf,
}

impl TempFile {
    fn create(path: PathBuf, contents: &str) -> Result<Self> {
        fs::write(&path, contents)?;
        Ok(Self { path })
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

fn scoped_resources(dir: &Path) -> Result<()> {
    show("struct TempFile { path: PathBuf }\nimpl Drop for TempFile { fn drop(&mut self) { let _ = fs::remove_file(&self.path); } }");
    let path = output_path(dir, "scratch.tmp");
    {
        let temp = TempFile::create(path.clone(), "scratch")?;
        println!("inside scope, exists: {}", temp.path.exists());
    }
    println!("after scope, exists:  {}", path.exists());

    show("{ let file = File::create(..)?; } // closed here");
    {
        let mut file = File::create(output_path(dir, "closed.txt"))?;
        file.write_all(b"closed on drop")?;
    }
    println!("{}", fs::read_to_string(output_path(dir, "closed.txt"))?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_file_is_removed_on_drop() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("guard.tmp");
        {
            let _guard = TempFile::create(path.clone(), "x")?;
            assert!(path.exists());
        }
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn file_write_appends() -> Result<()> {
        let dir = tempfile::tempdir()?;
        file_write(dir.path())?;
        let contents = fs::read_to_string(dir.path().join("notes.txt"))?;
        assert_eq!(contents, "first line\nsecond line\n");
        Ok(())
    }
}
