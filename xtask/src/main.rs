use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "minpaths workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the solver benchmark and summarise the estimates
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },

    /// Check every fixture file under fixtures/ with the minpaths binary
    Fixtures {
        /// Directory holding fixture files
        #[arg(long, default_value = "fixtures")]
        dir: PathBuf,
    },
}

const BENCH: &str = "solver_benchmark";

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench { quick, report_only } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report()?;
        }
        Commands::Fixtures { dir } => run_fixtures(&dir)?,
    }

    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!("Running {BENCH}...");
    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.env("CARGO_INCREMENTAL", "0")
        .arg("bench")
        .arg("--bench")
        .arg(BENCH);

    // Args for the test runner (Criterion) go after --
    cmd.arg("--");
    if quick {
        cmd.arg("--measurement-time").arg("0.1");
        cmd.arg("--noplot");
        cmd.arg("--sample-size").arg("10");
    }

    let status = cmd.status().context("failed to launch cargo bench")?;
    if !status.success() {
        anyhow::bail!("benchmark {BENCH} failed");
    }
    println!("Finished {BENCH} in {:.2?}", start.elapsed());
    Ok(())
}

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");
    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results = BTreeMap::new();
    collect_results(criterion_dir, &mut results);

    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }

    use std::io::Write;
    let mut file = fs::File::create(report_path)?;

    writeln!(file, "# Solver Benchmark Report")?;
    writeln!(file)?;
    writeln!(file, "| Benchmark | Mean |")?;
    writeln!(file, "|---|---|")?;
    for (name, time_ns) in &results {
        writeln!(file, "| {} | {} |", name, format_time(*time_ns))?;
    }

    println!("Report written to {} ({} benchmarks)", report_path.display(), results.len());
    Ok(())
}

fn format_time(ns: f64) -> String {
    if ns > 1_000_000.0 {
        format!("{:.2} ms", ns / 1_000_000.0)
    } else if ns > 1_000.0 {
        format!("{:.2} µs", ns / 1_000.0)
    } else {
        format!("{:.0} ns", ns)
    }
}

/// Walks criterion's output for `new/estimates.json` files.
///
/// Layout: `target/criterion/<group>/<bench>/new/estimates.json`; the
/// benchmark name is the path between the criterion root and `new`.
fn collect_results(dir: &Path, results: &mut BTreeMap<String, f64>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if path.file_name().and_then(|s| s.to_str()) == Some("report") {
                continue;
            }
            collect_results(&path, results);
            continue;
        }
        if path.file_name().and_then(|s| s.to_str()) != Some("estimates.json") {
            continue;
        }
        let Some(run_dir) = path.parent() else { continue };
        if run_dir.file_name().and_then(|s| s.to_str()) != Some("new") {
            continue;
        }
        let Some(bench_dir) = run_dir.parent() else { continue };
        let name = bench_dir
            .strip_prefix("target/criterion")
            .unwrap_or(bench_dir)
            .display()
            .to_string();

        let Ok(content) = fs::read_to_string(&path) else { continue };
        let Ok(json) = serde_json::from_str::<serde_json::Value>(&content) else { continue };
        if let Some(time_ns) = json
            .get("mean")
            .and_then(|m| m.get("point_estimate"))
            .and_then(serde_json::Value::as_f64)
        {
            results.insert(name, time_ns);
        }
    }
}

fn run_fixtures(dir: &Path) -> Result<()> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("reading {}", dir.display()))?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    let mut failed = Vec::new();
    for file in &files {
        println!("\n>>> Checking {}", file.display());
        let status = Command::new("cargo")
            .args(["run", "--quiet", "--bin", "minpaths", "--", "check"])
            .arg(file)
            .status()
            .with_context(|| format!("failed to run minpaths on {}", file.display()))?;
        if !status.success() {
            failed.push(file.display().to_string());
        }
    }

    println!("\n{} fixture files, {} failed", files.len(), failed.len());
    if !failed.is_empty() {
        anyhow::bail!("failing fixture files: {}", failed.join(", "));
    }
    Ok(())
}
