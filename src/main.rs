use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use curriculum_graph::curriculum::progression;
use curriculum_graph::engine::{DEFAULT_GRADE, SearchHit, search, trace};
use curriculum_graph::render::{Palette, present};
use curriculum_graph::{GraphQuery, GraphView, load_repository};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Curriculum JSON: a `grades` tree or a flat concept list.
    #[arg(long)]
    data: PathBuf,

    #[arg(short, long)]
    verbose: bool,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Emit the renderer payload for the given inputs.
    Graph {
        #[arg(long = "grade", default_values_t = [DEFAULT_GRADE])]
        grades: Vec<u32>,
        #[arg(long)]
        focus: Option<String>,
        #[arg(long)]
        clustered: bool,
    },
    /// Print the upstream and downstream closure of a concept.
    Trace { id: String },
    /// Search concept titles.
    Search { query: String },
    /// List the same concept across grades.
    Progression { id: String },
}

#[derive(Serialize)]
struct TraceReport {
    focus: String,
    upstream: Vec<String>,
    downstream: Vec<String>,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("failed to serialize output")?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}").context("failed to write output")
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let repository = load_repository(&args.data)?;

    match args.command {
        Command::Graph {
            grades,
            focus,
            clustered,
        } => {
            if let Some(focus) = &focus
                && !repository.contains(focus)
            {
                return Err(anyhow!("unknown concept id: {focus}"));
            }

            let mut view = GraphView::with_query(
                repository,
                GraphQuery {
                    selected_grades: grades.into_iter().collect(),
                    focus_id: focus,
                    clustered,
                },
            );
            let payload = present(view.output(), &Palette::default());
            emit(&payload, args.pretty)
        }
        Command::Trace { id } => {
            if !repository.contains(&id) {
                return Err(anyhow!("unknown concept id: {id}"));
            }

            let state = trace(repository.concepts(), &id);
            let mut upstream = state.upstream.into_iter().collect::<Vec<_>>();
            let mut downstream = state.downstream.into_iter().collect::<Vec<_>>();
            upstream.sort();
            downstream.sort();

            emit(
                &TraceReport {
                    focus: state.focus,
                    upstream,
                    downstream,
                },
                args.pretty,
            )
        }
        Command::Search { query } => {
            let hits = search(repository.concepts(), &query)
                .into_iter()
                .map(SearchHit::from)
                .collect::<Vec<_>>();
            emit(&hits, args.pretty)
        }
        Command::Progression { id } => emit(&progression(&repository, &id), args.pretty),
    }
}
