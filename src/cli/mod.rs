//! CLI subcommand implementations for the Slate binary.

pub mod render_cmd;
pub mod templates_cmd;
