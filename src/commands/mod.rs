//! One module per CLI subcommand. Each takes an already-built client and
//! does its own console reporting.

pub mod add_hosts;
pub mod export_group;
pub mod export_profiles;
