//! Runnable quick reference: a registry of small Rust examples, a curriculum
//! that orders them into lessons, and a runner that executes them.

pub mod config;
pub mod examples;
pub mod lesson;
pub mod logging;
pub mod registry;
pub mod resolve;
pub mod runner;
pub mod sample;
pub mod show;
pub mod suggest;

pub type Result<T> = anyhow::Result<T>;

pub use config::Config;
pub use examples::{register_all, standard_registry};
pub use lesson::{Curriculum, Lesson};
pub use logging::LogLevel;
pub use registry::{Action, ExampleInfo, Registry, RegistryError};
pub use resolve::{Placement, examples_for, examples_in_lesson_order, placements};
pub use runner::{RunReport, Runner};
pub use sample::SampleData;
