//! Output helpers shared by the example bodies.

use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Render a snippet as an indented, copy-pasteable block.
pub fn format_snippet(code: &str) -> String {
    let mut out = String::from("\n");
    for line in code.trim().lines() {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Print a code snippet followed by a blank line.
pub fn show(code: &str) {
    println!("{}", format_snippet(code));
}

/// Print a code snippet and the value it produces.
pub fn show_result(code: &str, result: impl Display) {
    show(code);
    println!("{result}");
}

pub fn output_path(dir: &Path, file_name: &str) -> PathBuf {
    dir.join(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_lines_are_indented_and_trimmed() {
        let rendered = format_snippet("\nlet x = 1;\nlet y = x + 1;\n\n");
        assert_eq!(rendered, "\n    let x = 1;\n    let y = x + 1;\n");
    }

    #[test]
    fn output_path_joins_under_dir() {
        assert_eq!(
            output_path(Path::new("data"), "out.txt"),
            PathBuf::from("data/out.txt")
        );
    }
}
