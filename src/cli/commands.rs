//! CLI command implementations.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::format::{DotWriter, MappedElf};
use crate::graph::{DependencyGraph, GraphBuilder};
use crate::resolve::Strategy;
use crate::types::{library_name, DepGraphError, DepGraphResult};

/// Everything a `graph` run produced.
#[derive(Debug)]
pub struct GraphRun {
    pub graph: DependencyGraph,
    /// Rendered dot text, as written to `output_path`.
    pub dot: String,
    pub output_path: PathBuf,
}

/// Name of the dot file for `root` under `strategy`, e.g.
/// `dependency_graph_app_elf.dot`.
pub fn output_file_name(root: &Path, strategy: Strategy) -> String {
    format!("dependency_graph_{}_{}.dot", file_stem(root), strategy.name())
}

fn file_stem(root: &Path) -> String {
    let name = library_name(root);
    Path::new(&name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or(name)
}

/// Build the graph for `root`, render it and write the dot file.
pub fn run_graph(root: &Path, strategy: Strategy, config: &Config) -> DepGraphResult<GraphRun> {
    let builder = GraphBuilder::new(strategy.source(config));
    let graph = builder.build(root)?;

    let title = format!("Dependency Graph for {}", library_name(root));
    let dot = DotWriter::with_graph_name(strategy.graph_name()).render(&graph, &title);

    let output_path = config.output_dir.join(output_file_name(root, strategy));
    std::fs::write(&output_path, &dot)?;

    Ok(GraphRun {
        graph,
        dot,
        output_path,
    })
}

/// Build, write and summarise the dependency graph of `root`.
pub fn cmd_graph(root: &Path, strategy: Strategy, config: &Config, json: bool) -> DepGraphResult<()> {
    if !json {
        println!("Analyzing dependencies for: {}", root.display());
        match strategy {
            Strategy::Elf => {
                println!("Using ELF parsing to analyze shared library dependencies...")
            }
            Strategy::Ldd => println!("Using ldd to parse shared library dependencies..."),
        }
    }

    let run = run_graph(root, strategy, config)?;
    let graph = &run.graph;

    if json {
        let libraries: Vec<_> = graph
            .nodes()
            .map(|n| {
                serde_json::json!({
                    "name": n.name,
                    "status": n.resolution.name(),
                    "path": n.resolution.path().map(|p| p.display().to_string()),
                })
            })
            .collect();
        let info = serde_json::json!({
            "root": graph.root(),
            "strategy": strategy.name(),
            "output": run.output_path.display().to_string(),
            "libraries_count": graph.node_count(),
            "dependencies_count": graph.edge_count(),
            "libraries": libraries,
            "dependencies": graph.edges(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&info).unwrap_or_default()
        );
        return Ok(());
    }

    println!();
    println!("Dependency graph saved to {}", run.output_path.display());
    println!(
        "Found {} libraries and {} dependencies",
        graph.node_count(),
        graph.edge_count()
    );

    println!();
    println!("Libraries found:");
    for node in graph.nodes() {
        if node.is_resolved() {
            println!("  - {}", node.name);
        } else {
            println!("  - {} (not found)", node.name);
        }
    }

    println!();
    println!("DOT content preview:");
    println!("{}", run.dot);

    let image_base = config
        .output_dir
        .join(format!("dependency_graph_{}", file_stem(root)));
    println!();
    println!("To visualize the graph, you can use:");
    println!(
        "  dot -Tpng {} -o {}.png",
        run.output_path.display(),
        image_base.display()
    );
    println!(
        "  dot -Tsvg {} -o {}.svg",
        run.output_path.display(),
        image_base.display()
    );
    Ok(())
}

/// Print the direct needed libraries of one ELF artifact.
pub fn cmd_needed(path: &Path, json: bool) -> DepGraphResult<()> {
    if !path.is_file() {
        return Err(DepGraphError::RootNotFound(path.to_path_buf()));
    }
    let mapped = MappedElf::open(path)?;
    let elf = mapped.elf()?;
    let needed = elf.needed_libraries()?;
    let soname = elf.soname()?;

    if json {
        let info = serde_json::json!({
            "file": path.display().to_string(),
            "soname": soname,
            "needed": needed,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&info).unwrap_or_default()
        );
    } else {
        println!("File: {}", path.display());
        if let Some(soname) = soname {
            println!("Soname: {}", soname);
        }
        println!("Needed ({}):", needed.len());
        for name in &needed {
            println!("  - {}", name);
        }
    }
    Ok(())
}

/// Show where the static resolver finds `name`.
pub fn cmd_resolve(name: &str, config: &Config, json: bool) -> DepGraphResult<()> {
    let search_path = config.search_path();
    let found = search_path.resolve(name);

    if json {
        let info = serde_json::json!({
            "name": name,
            "path": found.as_ref().map(|p| p.display().to_string()),
            "searched": search_path
                .dirs()
                .iter()
                .map(|d| d.display().to_string())
                .collect::<Vec<_>>(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&info).unwrap_or_default()
        );
    } else {
        match &found {
            Some(path) => println!("{} => {}", name, path.display()),
            None => {
                println!("{} => not found", name);
                println!("Searched:");
                for dir in search_path.dirs() {
                    println!("  {}", dir.display());
                }
            }
        }
    }
    Ok(())
}

/// Write the default configuration to `path`.
pub fn cmd_init_config(path: &Path) -> DepGraphResult<()> {
    Config::default().save(path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
