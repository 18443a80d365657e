mod lesson;
mod list;
mod run;
mod util;

pub(crate) use lesson::cmd_lesson;
pub(crate) use list::cmd_list;
pub(crate) use run::{cmd_run_all, cmd_run_named, cmd_run_selected};
