use clap::{Parser, Subcommand};
use codemap_common::config::ScanConfig;
use codemap_graph::{builder::GraphBuilder, model::NodeKind, snapshot, CodeGraph};
use codemap_walk::VisitedFile;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "codemap")]
#[command(about = "Multi-language code knowledge graph indexer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk a project, extract symbols and calls, and write a graph snapshot.
    Scan {
        /// Project root to scan.
        path: PathBuf,
    },
    /// Print node/edge counts from a saved snapshot.
    Stats {
        /// Project root (reads .codemap/graph.bin).
        path: PathBuf,
    },
    /// Shortest path between two node names.
    Path {
        path: PathBuf,
        from: String,
        to: String,
        #[arg(long, default_value_t = 10)]
        max_depth: usize,
    },
    /// Forward dependency tree rooted at a node name.
    Deps {
        path: PathBuf,
        root: String,
        #[arg(long, default_value_t = 3)]
        max_depth: usize,
    },
    /// Reverse dependency tree (callers/importers) rooted at a node name.
    Rdeps {
        path: PathBuf,
        root: String,
        #[arg(long, default_value_t = 3)]
        max_depth: usize,
    },
    /// Substring search over node names and paths.
    Search {
        path: PathBuf,
        pattern: String,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("no .env loaded: {e}");
    }
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Scan { path } => cmd_scan(path)?,
        Commands::Stats { path } => cmd_stats(path)?,
        Commands::Path { path, from, to, max_depth } => cmd_path(path, from, to, *max_depth)?,
        Commands::Deps { path, root, max_depth } => cmd_deps(path, root, *max_depth)?,
        Commands::Rdeps { path, root, max_depth } => cmd_rdeps(path, root, *max_depth)?,
        Commands::Search { path, pattern } => cmd_search(path, pattern)?,
    }

    Ok(())
}

fn snapshot_path(root: &Path) -> PathBuf {
    root.join(".codemap").join("graph.bin")
}

/// One file's extraction outcome. Symbol and call extraction each own a
/// transient parser/cursor for the file and release them on every exit
/// path, including errors — they never cross the rayon worker boundary.
struct Extracted {
    relative: String,
    symbols: Option<codemap_symbols::FileAnalysis>,
    calls: Option<codemap_calls::CallAnalysis>,
}

fn extract_one(file: &VisitedFile, detail: codemap_common::config::DetailLevel) -> Extracted {
    let symbols = match codemap_symbols::analyze_file(&file.absolute, &file.relative, file.language, detail) {
        Ok(a) => Some(a),
        Err(e) => {
            tracing::warn!(path = %file.relative, error = %e, "symbol extraction failed");
            None
        }
    };
    let calls = match codemap_calls::analyze_file(&file.absolute, &file.relative, file.language) {
        Ok(c) => Some(c),
        Err(e) => {
            tracing::warn!(path = %file.relative, error = %e, "call extraction failed");
            None
        }
    };
    Extracted {
        relative: file.relative.clone(),
        symbols,
        calls,
    }
}

fn cmd_scan(project_root: &Path) -> anyhow::Result<()> {
    let config = ScanConfig::load(project_root);

    let files = codemap_walk::collect(&config.root, &config.ignore, config.language_filter)?;
    tracing::info!(count = files.len(), "discovered files");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .build()
        .map_err(|e| anyhow::anyhow!("failed to start worker pool: {e}"))?;
    let extracted: Vec<Extracted> = pool.install(|| files.par_iter().map(|f| extract_one(f, config.detail)).collect());

    let mut builder = GraphBuilder::new(config.root.display().to_string());
    let mut scanned = 0usize;
    let mut errored = 0usize;

    for item in extracted {
        match item.symbols {
            Some(analysis) => {
                builder.ingest_symbols(&analysis);
                scanned += 1;
            }
            None => errored += 1,
        }
        if let Some(calls) = item.calls {
            builder.ingest_calls(&item.relative, calls);
        }
    }

    let graph = builder.finish();
    let stats = graph.stats();

    let out_path = snapshot_path(&config.root);
    std::fs::create_dir_all(out_path.parent().unwrap())?;
    snapshot::save(&graph, &out_path)?;

    println!("scanned {scanned} files ({errored} errored)");
    println!("nodes: {}  edges: {}", stats.total_nodes, stats.total_edges);
    println!("snapshot written to {}", out_path.display());
    Ok(())
}

fn load_graph(project_root: &Path) -> anyhow::Result<CodeGraph> {
    let path = snapshot_path(project_root);
    snapshot::load(&path).map_err(|e| anyhow::anyhow!("{e} (run `codemap scan {}` first)", project_root.display()))
}

fn cmd_stats(project_root: &Path) -> anyhow::Result<()> {
    let graph = load_graph(project_root)?;
    let stats = graph.stats();
    println!("nodes: {}", stats.total_nodes);
    println!("edges: {}", stats.total_edges);
    for (kind, count) in &stats.by_kind {
        println!("  {kind:?}: {count}");
    }
    println!("mean out-degree: {:.2}", stats.mean_out_degree);
    Ok(())
}

fn find_one<'a>(graph: &'a CodeGraph, name: &str) -> Option<&'a codemap_graph::Node> {
    graph.find_nodes_by_pattern(name, None).into_iter().find(|n| n.name == name)
}

fn cmd_path(project_root: &Path, from: &str, to: &str, max_depth: usize) -> anyhow::Result<()> {
    let graph = load_graph(project_root)?;
    let from_id = find_one(&graph, from).ok_or_else(|| anyhow::anyhow!("no node named {from}"))?.id.clone();
    let to_id = find_one(&graph, to).ok_or_else(|| anyhow::anyhow!("no node named {to}"))?.id.clone();

    match graph.find_path(&from_id, &to_id, max_depth) {
        Some(path) => {
            for node in &path.nodes {
                println!("{} ({})", node.name, node.path);
            }
        }
        None => println!("no path found within depth {max_depth}"),
    }
    Ok(())
}

fn cmd_deps(project_root: &Path, root: &str, max_depth: usize) -> anyhow::Result<()> {
    let graph = load_graph(project_root)?;
    let root_id = find_one(&graph, root).ok_or_else(|| anyhow::anyhow!("no node named {root}"))?.id.clone();
    print_tree(graph.dependency_tree(&root_id, max_depth));
    Ok(())
}

fn cmd_rdeps(project_root: &Path, root: &str, max_depth: usize) -> anyhow::Result<()> {
    let graph = load_graph(project_root)?;
    let root_id = find_one(&graph, root).ok_or_else(|| anyhow::anyhow!("no node named {root}"))?.id.clone();
    print_tree(graph.reverse_tree(&root_id, max_depth));
    Ok(())
}

fn print_tree(levels: std::collections::HashMap<u32, Vec<codemap_graph::Node>>) {
    let mut depths: Vec<&u32> = levels.keys().collect();
    depths.sort();
    for depth in depths {
        for node in &levels[depth] {
            println!("{}{}", "  ".repeat(*depth as usize), node.name);
        }
    }
}

fn cmd_search(project_root: &Path, pattern: &str) -> anyhow::Result<()> {
    let graph = load_graph(project_root)?;
    let matches = graph.find_nodes_by_pattern(pattern, Some(&[NodeKind::Function, NodeKind::Method, NodeKind::Type]));
    for node in matches {
        println!("{:?} {} ({})", node.kind, node.name, node.path);
    }
    Ok(())
}
