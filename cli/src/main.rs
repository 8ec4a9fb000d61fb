//! pathq - run path queries over labeled graphs from the shell.

mod output;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use pathq_core::NodeId;
use pathq_grammar::{Grammar, Variable};
use pathq_graph::LabeledGraph;
use pathq_query::{CfpqAlgorithm, QueryConfig, QueryEngine, QueryResult, ReachabilityMode};

use crate::output::Report;

#[derive(Parser, Debug)]
#[command(name = "pathq")]
#[command(about = "Regular and context-free path queries over labeled graphs")]
#[command(version)]
struct Args {
    /// Log query sizes and convergence at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Node pairs connected by a path matching a regular expression
    Rpq {
        /// Edge-list file (`from to label` per line)
        #[arg(long)]
        graph: PathBuf,

        /// Pattern over edge labels, e.g. "a (b | c)*"
        #[arg(long)]
        regex: String,

        /// Start nodes (default: every node)
        #[arg(long, value_delimiter = ',')]
        starts: Vec<u64>,

        /// Final nodes (default: every node)
        #[arg(long, value_delimiter = ',')]
        finals: Vec<u64>,

        /// Use the frontier sweep and report reachable nodes
        #[arg(long)]
        bfs: bool,

        /// With --bfs, group reachable nodes by source
        #[arg(long, requires = "bfs")]
        per_source: bool,
    },

    /// Node pairs connected by a path spelling a word of a context-free grammar
    Cfpq {
        /// Edge-list file (`from to label` per line)
        #[arg(long)]
        graph: PathBuf,

        /// Grammar file (`Head -> body | body` per line)
        #[arg(long)]
        grammar: PathBuf,

        /// Variable whose derivations are reported
        #[arg(long, default_value = "S")]
        start_var: String,

        #[arg(long, default_value_t = CfpqAlgorithm::Worklist)]
        algorithm: CfpqAlgorithm,

        /// Start nodes (default: every node)
        #[arg(long, value_delimiter = ',')]
        starts: Vec<u64>,

        /// Final nodes (default: every node)
        #[arg(long, value_delimiter = ',')]
        finals: Vec<u64>,
    },

    /// Node, edge and label counts of a graph
    Info {
        #[arg(long)]
        graph: PathBuf,
    },

    /// Render a graph in GraphViz DOT format
    Dot {
        #[arg(long)]
        graph: PathBuf,
    },
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let report = match run(args.command) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    if args.json {
        match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                process::exit(1);
            }
        }
    } else {
        print!("{}", report.to_text());
    }
}

fn run(command: Command) -> QueryResult<Report> {
    match command {
        Command::Rpq {
            graph,
            regex,
            starts,
            finals,
            bfs,
            per_source,
        } => {
            let graph = load_graph(&graph)?;
            let starts = node_set(&starts, &graph);
            let finals = node_set(&finals, &graph);
            if bfs {
                let mode = if per_source {
                    ReachabilityMode::PerSource
                } else {
                    ReachabilityMode::AnySource
                };
                let engine = QueryEngine::with_config(QueryConfig::new().with_reachability(mode));
                Ok(engine.query_reachability(&regex, &graph, &starts, &finals)?.into())
            } else {
                let pairs = QueryEngine::new().query_regular(&regex, &graph, &starts, &finals)?;
                Ok(Report::Pairs(pairs))
            }
        }
        Command::Cfpq {
            graph,
            grammar,
            start_var,
            algorithm,
            starts,
            finals,
        } => {
            let graph = load_graph(&graph)?;
            let grammar = Grammar::from_file(&grammar)?;
            let starts = node_set(&starts, &graph);
            let finals = node_set(&finals, &graph);
            let engine = QueryEngine::with_config(QueryConfig::new().with_cfpq_algorithm(algorithm));
            let result =
                engine.query_context_free(&grammar, &graph, &Variable::new(start_var), &starts, &finals);
            Ok(Report::PerSource(result))
        }
        Command::Info { graph } => Ok(Report::Info(load_graph(&graph)?.info())),
        Command::Dot { graph } => Ok(Report::Dot(load_graph(&graph)?.to_dot())),
    }
}

fn load_graph(path: &Path) -> QueryResult<LabeledGraph> {
    let graph = LabeledGraph::load(path)?;
    log::debug!(
        "loaded {}: {} nodes, {} edges",
        path.display(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// The given nodes, or every graph node when none are given.
fn node_set(ids: &[u64], graph: &LabeledGraph) -> BTreeSet<NodeId> {
    if ids.is_empty() {
        graph.node_ids().collect()
    } else {
        ids.iter().copied().map(NodeId).collect()
    }
}
