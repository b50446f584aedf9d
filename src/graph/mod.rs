//! The dependency graph model and its builder.

pub mod builder;
pub mod dependency_graph;

pub use builder::GraphBuilder;
pub use dependency_graph::DependencyGraph;
