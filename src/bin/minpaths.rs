//! `minpaths` command line driver.
//!
//! `check` runs every case of a fixture file and prints a verdict per case;
//! `solve` answers a single instance given on the command line.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use minpaths::fixture::{render_paths, CaseOutcome, Fixture, Verdict};
use minpaths::{Graph, GraphStatistics, NodeId, Solver, SolverConfig, SolveResult, Weight};

#[derive(Parser)]
#[command(name = "minpaths")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Exact minimum connecting paths between terminal nodes", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every case of a fixture file
    Check {
        /// Fixture file
        file: PathBuf,

        /// Solver configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print a JSON report instead of text
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Also print the tied shortest paths of every terminal pair
        #[arg(long, default_value_t = false)]
        pairs: bool,
    },

    /// Solve one instance given on the command line
    Solve {
        /// Edge as `from,to,weight`; repeatable
        #[arg(long = "edge", value_parser = parse_edge, required = true)]
        edges: Vec<(String, String, Weight)>,

        /// Terminal node name; repeatable
        #[arg(long = "terminal")]
        terminals: Vec<String>,

        /// Solver configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the solution as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn parse_edge(raw: &str) -> Result<(String, String, Weight), String> {
    let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [from, to, weight] = fields.as_slice() else {
        return Err(format!("expected `from,to,weight`, got `{raw}`"));
    };
    let weight = weight
        .parse::<Weight>()
        .map_err(|err| format!("invalid weight `{weight}`: {err}"))?;
    Ok(((*from).to_owned(), (*to).to_owned(), weight))
}

fn load_config(path: Option<&Path>) -> Result<SolverConfig> {
    let Some(path) = path else {
        return Ok(SolverConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    SolverConfig::from_json_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

#[derive(Serialize)]
struct PairReport {
    source: String,
    destination: String,
    weight: Option<Weight>,
    paths: Vec<String>,
}

#[derive(Serialize)]
struct CaseReport {
    case: usize,
    line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    graph: Option<GraphStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pairs: Option<Vec<PairReport>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<CaseOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl CaseReport {
    fn passed(&self) -> bool {
        self.outcome.as_ref().is_some_and(|o| o.verdict.is_pass())
    }
}

#[derive(Serialize)]
struct Report {
    file: String,
    passed: usize,
    failed: usize,
    cases: Vec<CaseReport>,
}

fn pair_reports(graph: &Graph<String>, terminals: &[NodeId], config: &SolverConfig) -> SolveResult<Vec<PairReport>> {
    let groups = Solver::new(graph)
        .with_config(config.clone())
        .pairwise_groups(terminals)?;
    Ok(groups
        .iter()
        .map(|group| PairReport {
            source: graph.payload(group.source()).clone(),
            destination: graph.payload(group.destination()).clone(),
            weight: group.weight(),
            paths: group.paths().iter().map(|p| p.display(graph).to_string()).collect(),
        })
        .collect())
}

fn check(file: &Path, config: &SolverConfig, json: bool, pairs: bool) -> Result<bool> {
    let text = fs::read_to_string(file).with_context(|| format!("reading fixture {}", file.display()))?;
    let fixture = Fixture::parse(&text).with_context(|| format!("parsing fixture {}", file.display()))?;
    tracing::info!(cases = fixture.cases.len(), file = %file.display(), "loaded fixture");

    let mut reports = Vec::with_capacity(fixture.cases.len());
    for (index, case) in fixture.cases.iter().enumerate() {
        let number = index + 1;
        let mut report = CaseReport {
            case: number,
            line: case.line,
            graph: None,
            pairs: None,
            outcome: None,
            error: None,
        };

        if !json {
            println!();
            println!("//==================================================");
            println!("// Case {number} (line {})", case.line);
            println!("//==================================================");
            println!("Nodes: {}", case.nodes.join(" "));
            println!("Edges:");
            for edge in &case.edges {
                println!("   {} {} {}", edge.from, edge.to, edge.weight);
            }
            println!("Terminals: {}", case.terminals.join(" "));
        }

        match case.build() {
            Err(err) => report.error = Some(err.to_string()),
            Ok((graph, terminals)) => {
                report.graph = Some(graph.statistics());
                let outcome = match pairs.then(|| pair_reports(&graph, &terminals, config)).transpose() {
                    Ok(listed) => {
                        report.pairs = listed;
                        case.evaluate(&graph, &terminals, config)
                    }
                    Err(err) => Err(err.into()),
                };
                match outcome {
                    Ok(outcome) => report.outcome = Some(outcome),
                    Err(err) => report.error = Some(err.to_string()),
                }
            }
        }

        if !json {
            print_case(&report);
        }
        reports.push(report);
    }

    let passed = reports.iter().filter(|r| r.passed()).count();
    let failed = reports.len() - passed;

    if json {
        let report = Report {
            file: file.display().to_string(),
            passed,
            failed,
            cases: reports,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        println!("==================================================");
        println!("Cases run    : {}", passed + failed);
        println!("   passed    : {passed}");
        println!("   failed    : {failed}");
        println!("==================================================");
    }

    Ok(failed == 0)
}

fn print_case(report: &CaseReport) {
    if let Some(stats) = &report.graph {
        println!(
            "Graph: {} nodes, {} edges, degree min {} / median {} / max {} / avg {:.2}",
            stats.node_count,
            stats.edge_count,
            stats.min_degree,
            stats.median_degree,
            stats.max_degree,
            stats.average_degree
        );
    }
    if let Some(pairs) = &report.pairs {
        println!();
        println!("Pairwise shortest paths:");
        for pair in pairs {
            for path in &pair.paths {
                println!("{path}");
            }
            println!("---");
        }
    }
    if let Some(outcome) = &report.outcome {
        println!();
        println!("Connecting paths:");
        for path in &outcome.paths {
            println!("{path}");
        }
        println!(
            "(weight {}, found in {:.3} ms, {} cover iterations)",
            outcome.weight, outcome.elapsed_ms, outcome.stats.cover_iterations
        );
    }
    match (&report.error, report.outcome.as_ref().map(|o| &o.verdict)) {
        (Some(err), _) => println!("FAILED: {err}"),
        (None, Some(Verdict::Failed { reason })) => println!("FAILED: {reason}"),
        _ => println!("PASSED"),
    }
}

fn solve(edges: &[(String, String, Weight)], names: &[String], config: SolverConfig, json: bool) -> Result<()> {
    let mut graph: Graph<String> = Graph::new();
    for (from, to, weight) in edges {
        graph.connect(from.clone(), to.clone(), *weight);
    }
    let mut terminals = Vec::with_capacity(names.len());
    for name in names {
        match graph.find(name.as_str()) {
            Some(id) => terminals.push(id),
            None => bail!("terminal `{name}` does not appear in any edge"),
        }
    }

    let solution = Solver::new(&graph)
        .with_config(config)
        .solve(&terminals)
        .context("solving")?;

    if json {
        #[derive(Serialize)]
        struct Named<'a> {
            paths: Vec<Vec<String>>,
            weight: Weight,
            stats: &'a minpaths::SearchStats,
        }
        let named = Named {
            paths: solution.paths.iter().map(|p| p.names(&graph)).collect(),
            weight: solution.weight,
            stats: &solution.stats,
        };
        println!("{}", serde_json::to_string_pretty(&named)?);
    } else {
        print!("{}", render_paths(&graph, &solution.paths));
        println!("weight {}", solution.weight);
    }
    Ok(())
}

fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Check {
            file,
            config,
            json,
            pairs,
        } => {
            let config = load_config(config.as_deref())?;
            check(&file, &config, json, pairs)
        }
        Commands::Solve {
            edges,
            terminals,
            config,
            json,
        } => {
            let config = load_config(config.as_deref())?;
            solve(&edges, &terminals, config, json)?;
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("minpaths={level},warn").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
