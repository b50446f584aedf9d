//! Depth-first construction of a dependency graph from a root artifact.

use std::collections::HashSet;
use std::path::Path;

use crate::resolve::{DependencyRef, DependencySource};
use crate::types::{library_name, DepGraphError, DepGraphResult, Edge, LibraryName, Node};

use super::DependencyGraph;

/// Builds dependency graphs by walking a [`DependencySource`].
///
/// The builder itself holds no traversal state; every call to
/// [`GraphBuilder::build`] starts from an empty visited set and an order
/// counter of zero, so one builder can serve any number of runs.
pub struct GraphBuilder<S> {
    source: S,
}

impl<S: DependencySource> GraphBuilder<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The strategy this builder traverses with.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Build the graph rooted at `root_path`.
    ///
    /// Fails only when the root itself cannot be used: it is missing or
    /// unreadable, or the source rejects it for a reason other than the
    /// external tool being unavailable. Problems below the root are logged
    /// and absorbed.
    pub fn build(&self, root_path: &Path) -> DepGraphResult<DependencyGraph> {
        if !root_path.is_file() {
            return Err(DepGraphError::RootNotFound(root_path.to_path_buf()));
        }
        std::fs::File::open(root_path)?;

        let root = library_name(root_path);
        log::info!("Building dependency graph for {}", root_path.display());

        let direct = match self.source.direct_dependencies(root_path) {
            Ok(direct) => direct,
            Err(e @ DepGraphError::ToolUnavailable { .. }) => {
                log::warn!("{e}; {root} will have no dependencies");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let mut run = Traversal::new(&self.source, Node::resolved(root.clone(), root_path));
        run.walk(root, direct)?;

        let graph = run.graph;
        graph.validate()?;
        log::info!(
            "Found {} libraries and {} dependencies",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }
}

/// A library whose direct dependencies are still being walked.
struct Frame {
    source: LibraryName,
    pending: std::vec::IntoIter<DependencyRef>,
}

/// Per-run traversal state.
struct Traversal<'s, S: ?Sized> {
    source: &'s S,
    /// Libraries whose dependencies have been (or are being) expanded.
    visited: HashSet<LibraryName>,
    /// Last order value handed out.
    order: u64,
    graph: DependencyGraph,
    stack: Vec<Frame>,
}

impl<'s, S: DependencySource + ?Sized> Traversal<'s, S> {
    fn new(source: &'s S, root: Node) -> Self {
        let mut visited = HashSet::new();
        visited.insert(root.name.clone());
        Self {
            source,
            visited,
            order: 0,
            graph: DependencyGraph::new(root),
            stack: Vec::new(),
        }
    }

    /// Pre-order depth-first walk with an explicit stack. Each edge is
    /// recorded before its target is visited, and a target already visited
    /// is never expanded again.
    fn walk(&mut self, root: LibraryName, direct: Vec<DependencyRef>) -> DepGraphResult<()> {
        self.stack.push(Frame {
            source: root,
            pending: direct.into_iter(),
        });

        loop {
            let Some(frame) = self.stack.last_mut() else {
                break;
            };
            let Some(dependency) = frame.pending.next() else {
                self.stack.pop();
                continue;
            };
            let source = frame.source.clone();

            self.order += 1;
            self.graph
                .push_edge(Edge::new(source, dependency.name.clone(), self.order))?;
            self.visit(dependency)?;
        }

        Ok(())
    }

    fn visit(&mut self, dependency: DependencyRef) -> DepGraphResult<()> {
        if !self.visited.insert(dependency.name.clone()) {
            log::debug!("{} already visited", dependency.name);
            return Ok(());
        }

        let Some(path) = self.source.locate(&dependency) else {
            log::warn!("Library {} not found", dependency.name);
            return self.graph.add_node(Node::unresolved(dependency.name));
        };

        log::debug!("{} -> {}", dependency.name, path.display());
        self.graph
            .add_node(Node::resolved(dependency.name.clone(), path.clone()))?;

        let pending = match self.source.direct_dependencies(&path) {
            Ok(deps) => deps,
            Err(e) => {
                log::warn!(
                    "Cannot read dependencies of {} ({}): {e}",
                    dependency.name,
                    path.display()
                );
                Vec::new()
            }
        };
        self.stack.push(Frame {
            source: dependency.name,
            pending: pending.into_iter(),
        });
        Ok(())
    }
}
