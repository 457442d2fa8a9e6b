#![warn(clippy::all, clippy::pedantic)]
use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use csv::Writer;
use itertools::Itertools;
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use flownet::{Algorithm, EdgeRecord, MaxFlow, Network, RelabelToFront};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Algo {
    EdmondsKarp,
    PushRelabel,
    RelabelToFront,
    /// Run every solver and compare the results
    All,
}

/// Solve a maximum flow problem given as a CSV edge list (`src,dst,capacity`).
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Input CSV file
    input: PathBuf,

    /// Number of nodes; defaults to the largest node index in the input plus one
    #[arg(short, long)]
    nodes: Option<usize>,

    /// Source node
    #[arg(short, long, default_value_t = 0)]
    source: usize,

    /// Sink node; defaults to the last node
    #[arg(short = 't', long)]
    sink: Option<usize>,

    /// Solver to use
    #[arg(short, long, value_enum, default_value_t = Algo::RelabelToFront)]
    algo: Algo,

    /// Discharges between two gap scans of relabel-to-front (default n^2)
    #[arg(long)]
    gap_interval: Option<usize>,

    /// Disable the gap heuristic of relabel-to-front
    #[arg(long)]
    no_gap: bool,

    /// Write the resulting flow to this CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verify the flow invariants after solving
    #[arg(long)]
    check: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

// Function to read the edge list from a CSV file
fn read_edges_csv(filepath: &Path) -> Result<Vec<EdgeRecord<i64>>, Box<dyn Error>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(filepath)?;
    let rows: Result<Vec<_>, _> = rdr.deserialize().collect();
    Ok(rows?)
}

// Function to write the flow on every edge
fn write_csv(network: &Network<i64>, filepath: &Path) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(filepath)?;
    for edge in network.edges() {
        wtr.serialize(edge)?;
    }
    wtr.flush()?;
    Ok(())
}

fn solve(network: &mut Network<i64>, algo: Algorithm, cli: &Cli) -> Result<i64, flownet::Error> {
    match algo {
        Algorithm::RelabelToFront => {
            let mut rtf: RelabelToFront<i64> = if cli.no_gap {
                RelabelToFront::without_gap()
            } else {
                cli.gap_interval
                    .map_or_else(RelabelToFront::default, RelabelToFront::with_gap_interval)
            };
            let value = rtf.max_flow(network)?;
            log::info!(
                "relabel-to-front: {} discharges, {} gap lifts",
                rtf.cnt_discharge,
                rtf.cnt_gap_lift
            );
            Ok(value)
        }
        algo => network.run(algo),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        level,
        ConfigBuilder::new().set_time_level(LevelFilter::Off).build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let edges = read_edges_csv(&cli.input)?;
    let size = cli.nodes.unwrap_or_else(|| {
        edges
            .iter()
            .map(|e| e.src().max(e.dst()) + 1)
            .max()
            .unwrap_or(0)
            .max(cli.source + 1)
    });
    let sink = cli.sink.unwrap_or_else(|| size.saturating_sub(1));
    let mut network = Network::from_records(size, cli.source, sink, &edges)?;
    log::info!(
        "{} nodes, {} edges, source {}, sink {}",
        network.num_nodes(),
        network.num_edges(),
        network.source(),
        network.sink()
    );

    let algos: Vec<Algorithm> = match cli.algo {
        Algo::EdmondsKarp => vec![Algorithm::EdmondsKarp],
        Algo::PushRelabel => vec![Algorithm::PushRelabel],
        Algo::RelabelToFront => vec![Algorithm::RelabelToFront],
        Algo::All => Algorithm::ALL.to_vec(),
    };

    let mut values = Vec::with_capacity(algos.len());
    for algo in algos {
        let value = solve(&mut network, algo, &cli)?;
        log::info!("{algo:?}: max flow = {value}");
        if cli.check {
            network.check()?;
        }
        values.push(value);
    }
    if !values.iter().all_equal() {
        return Err(format!("solvers disagree: {}", values.iter().join(", ")).into());
    }

    log::info!(
        "min cut source side: {{{}}}",
        network.min_cut().iter().join(", ")
    );
    if let Some(value) = values.first() {
        println!("{value}");
    }

    if let Some(output) = &cli.output {
        write_csv(&network, output)?;
    }
    Ok(())
}
