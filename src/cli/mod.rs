//! Command implementations behind the `depgraph` binary.

pub mod commands;
