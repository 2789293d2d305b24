//! CLI command handlers. Each command is in its own file.

mod checksum;
mod release;
mod update;

pub use checksum::run_checksum;
pub use release::run_release;
pub use update::run_update;
#[cfg(test)]
pub(crate) use update::effective_settings;
