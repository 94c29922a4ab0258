//! monoseq CLI - run scripts across a monorepo in dependency order
//!
//! Entry point for the monoseq command-line application.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use monoseq::config::{self, WorkspaceConfig};
use monoseq::export::{self, ExportData, ExportFormat};
use monoseq::graph::{GraphBuilder, ProjectGraph};
use monoseq::order::OrderOptions;
use monoseq::runner::{self, PlanOptions, Selection, Task};

#[derive(Parser)]
#[command(name = "monoseq")]
#[command(version)]
#[command(about = "Run scripts across monorepo projects in dependency order", long_about = None)]
struct Cli {
    /// Path to monoseq.toml (searched upward from the current directory by default)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List workspace projects and their links
    List {
        /// Output format: text, json, markdown
        #[arg(short, long, default_value = "text")]
        format: ExportFormat,
    },
    /// Pull in-graph dependencies and push each project, in order
    Pushpull {
        /// `<modifier> <project>` or a list of projects (default: all)
        targets: Vec<String>,

        #[command(flatten)]
        flags: RunFlags,
    },
    /// Run a script in each project, in order
    Run {
        /// Script name
        script: String,

        /// `<modifier> <project>` or a list of projects (default: all)
        targets: Vec<String>,

        #[command(flatten)]
        flags: RunFlags,

        /// Pull dependencies before and push after the script
        #[arg(long)]
        pushpull: bool,
    },
}

#[derive(clap::Args)]
struct RunFlags {
    /// Install packages in each project first
    #[arg(long)]
    install: bool,

    /// Print commands without running them
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_env("MONOSEQ_LOG").unwrap_or_else(|_| {
        EnvFilter::new(match (quiet, verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "monoseq=info,warn",
            (false, _) => "monoseq=debug,info",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config)?;
    let graph = GraphBuilder::from_config(&config)
        .context("Failed to read project manifests")?
        .build();

    match cli.command {
        Commands::List { format } => list(&graph, format),
        Commands::Pushpull { targets, flags } => execute(
            &graph,
            &config,
            &targets,
            &Task::PushPull,
            PlanOptions {
                install: flags.install,
                pushpull: true,
            },
            flags.dry_run,
        ),
        Commands::Run {
            script,
            targets,
            flags,
            pushpull,
        } => execute(
            &graph,
            &config,
            &targets,
            &Task::Run { script },
            PlanOptions {
                install: flags.install,
                pushpull,
            },
            flags.dry_run,
        ),
    }
}

fn load_config(explicit: Option<PathBuf>) -> Result<WorkspaceConfig> {
    let path = match explicit {
        Some(path) => path,
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            config::discover(&cwd)?
        }
    };
    Ok(config::load(&path)?)
}

fn list(graph: &ProjectGraph, format: ExportFormat) -> Result<()> {
    let data = ExportData::from_graph(graph);
    for cycle in &data.cycles {
        tracing::warn!("Circular dependency: {}", cycle.cycle_path());
    }

    let stdout = io::stdout();
    export::export(format, &data, &mut stdout.lock()).context("Failed to write listing")
}

fn execute(
    graph: &ProjectGraph,
    config: &WorkspaceConfig,
    targets: &[String],
    task: &Task,
    options: PlanOptions,
    dry_run: bool,
) -> Result<()> {
    let selection = Selection::parse(targets)?;
    let order_options = OrderOptions::with_safety_limit(config.ordering.safety_limit);
    let order = selection.resolve(graph, &order_options)?;
    tracing::info!("Build order: {}", graph.aliases(&order).join(", "));

    let plan = runner::build_plan(graph, &order, &config.tools, task, options);
    if plan.is_empty() {
        tracing::warn!("Nothing to do");
        return Ok(());
    }

    let summary = runner::execute(&plan, dry_run)?;
    tracing::info!(
        "Ran {} step(s), skipped {} project(s)",
        summary.executed,
        summary.skipped_projects
    );
    Ok(())
}
