mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::warn;

use quickref::logging::{self, LogLevel};
use quickref::{Config, Curriculum, resolve, standard_registry};

const DEFAULT_OUTPUT_DIR: &str = "data";

#[derive(Parser)]
#[command(
    name = "quickref",
    version,
    about = "Runnable quick reference of Rust idioms, organised into lessons"
)]
struct Cli {
    /// Examples to run, in order. Unknown names abort before anything runs
    #[arg(value_name = "EXAMPLE")]
    examples: Vec<String>,

    /// Same as the positional names
    #[arg(long = "functions", value_name = "EXAMPLE", num_args = 1..)]
    functions: Vec<String>,

    /// Run a single lesson by number
    #[arg(long, value_name = "N")]
    lesson: Option<u32>,

    /// List lessons and their examples instead of running them
    #[arg(long)]
    list: bool,

    /// Directory for files written by examples [default: data]
    #[arg(long = "output-dir", value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// YAML file providing defaults for functions, output_dir, log_level and lesson
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Diagnostic verbosity; RUST_LOG overrides it when set [default: info]
    #[arg(long = "log-level", value_enum, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    /// Suppress diagnostics on stderr
    #[arg(long)]
    quiet: bool,

    /// Also append diagnostics to this file
    #[arg(long = "log-file", value_name = "FILE")]
    log_file: Option<PathBuf>,
}

/// What a single invocation will do.
#[derive(Debug, PartialEq, Eq)]
enum Plan {
    List,
    Lesson(u32),
    /// Command-line names; every one must be known.
    Named(Vec<String>),
    /// Config names; unknown entries are skipped with a warning.
    Selected(Vec<String>),
    All,
}

#[derive(Debug)]
struct Settings {
    level: LogLevel,
    quiet: bool,
    log_file: Option<PathBuf>,
    output_dir: PathBuf,
    plan: Plan,
}

/// Merge flags over config. Flags win for every field they set.
fn settle(cli: Cli, config: Config) -> Settings {
    let mut names = cli.examples;
    names.extend(cli.functions);

    let plan = if cli.list {
        Plan::List
    } else if let Some(number) = cli.lesson {
        Plan::Lesson(number)
    } else if !names.is_empty() {
        Plan::Named(names)
    } else if let Some(number) = config.lesson {
        Plan::Lesson(number)
    } else if let Some(functions) = config.functions {
        Plan::Selected(functions)
    } else {
        Plan::All
    };

    Settings {
        level: cli.log_level.or(config.log_level).unwrap_or_default(),
        quiet: cli.quiet,
        log_file: cli.log_file,
        output_dir: cli
            .output_dir
            .or(config.output_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        plan,
    }
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let settings = settle(cli, config);

    logging::init(settings.level, settings.quiet, settings.log_file.as_deref())?;

    let registry = standard_registry()?;
    let curriculum = Curriculum::standard();
    for (lesson, category) in resolve::missing_categories(&registry, curriculum) {
        warn!(lesson, category, "lesson category has no registered examples");
    }

    let output_dir = settings.output_dir;
    match settings.plan {
        Plan::List => commands::cmd_list(&registry, curriculum, output_dir),
        Plan::Lesson(number) => commands::cmd_lesson(&registry, curriculum, number, output_dir),
        Plan::Named(names) => commands::cmd_run_named(&registry, curriculum, &names, output_dir),
        Plan::Selected(names) => {
            commands::cmd_run_selected(&registry, curriculum, &names, output_dir)
        }
        Plan::All => commands::cmd_run_all(&registry, curriculum, output_dir),
    }
}
