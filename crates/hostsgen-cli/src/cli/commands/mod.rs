//! CLI command handlers, one per file.

mod add;
pub(super) mod generate;
mod list;
mod remove;

pub use add::run_add;
pub use generate::run_generate;
pub use list::run_list;
pub use remove::run_remove;
