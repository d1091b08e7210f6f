use anyhow::Context;
use clap::{Parser, Subcommand};
use protista_core::{identity_digest, to_dot, EngineConfig, PoolReport, TreeLogic, TreePool};
use protista_data::{MetricSet, ProtistAction, ProtistCondition, ProtistTree};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the canonical identity of a saved tree
    Identity { path: String },
    /// Summarize the trees held by a saved pool
    Report {
        path: String,
        /// Only show the most populated trees
        #[arg(short, long, default_value_t = 10)]
        top: usize,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Render a saved tree as Graphviz DOT
    Dot { path: String },
    /// Write a small example tree built with the configured metric kinds
    Sample { path: String },
}

pub fn load_tree<P: AsRef<Path>>(path: P) -> anyhow::Result<ProtistTree> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let tree = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing tree {}", path.display()))?;
    Ok(tree)
}

/// Warns when a saved tree was built with different metric kinds than configured.
fn check_metric_domain(tree: &ProtistTree, metrics: &MetricSet) {
    let configured: Vec<&str> = metrics.kinds().iter().map(|k| k.as_str()).collect();
    let mut found: Vec<&str> = tree.metrics_total.keys().map(|k| k.as_str()).collect();
    let mut expected = configured.clone();
    found.sort_unstable();
    expected.sort_unstable();
    if found != expected {
        tracing::warn!(
            configured = ?configured,
            found = ?found,
            "Tree metric kinds differ from configuration"
        );
    }
}

/// Shelter when cold, otherwise eat unless well fed.
pub fn sample_tree(metrics: &MetricSet) -> ProtistTree {
    ProtistTree::from_condition(
        ProtistCondition::IsCold,
        ProtistTree::from_action(ProtistAction::Cover, metrics),
        ProtistTree::from_condition(
            ProtistCondition::FoodAbove(80),
            ProtistTree::from_action(ProtistAction::Uncover, metrics),
            ProtistTree::from_action(ProtistAction::Eat, metrics),
            metrics,
        ),
        metrics,
    )
}

/// Runs one command and returns what should be printed.
pub fn execute(command: &Command, config: &EngineConfig) -> anyhow::Result<String> {
    match command {
        Command::Identity { path } => {
            let mut tree = load_tree(path)?;
            check_metric_domain(&tree, &config.metric_set());
            let identity = tree.fresh_identity().to_owned();
            Ok(format!("{} {}", identity_digest(&identity), identity))
        }
        Command::Report { path, top, json } => {
            let pool: TreePool<ProtistAction, ProtistCondition> = TreePool::load(path)?;
            let report = PoolReport::from_pool(&pool).top(*top);
            if *json {
                Ok(serde_json::to_string_pretty(&report)?)
            } else {
                Ok(report.to_string())
            }
        }
        Command::Dot { path } => {
            let mut tree = load_tree(path)?;
            tree.fresh_identity();
            Ok(to_dot(&tree))
        }
        Command::Sample { path } => {
            let tree = sample_tree(&config.metric_set());
            let file = File::create(path).with_context(|| format!("creating {path}"))?;
            serde_json::to_writer_pretty(BufWriter::new(file), &tree)?;
            tracing::info!(path = %path, identity = %tree.identity, "Wrote sample tree");
            Ok(tree.identity)
        }
    }
}
