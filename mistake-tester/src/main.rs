mod reports;
mod runner;
mod scenario;
mod snapshot;
mod util;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use mistake_core::Preset;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use runner::{LogicRunner, ScenarioResult};
use scenario::{get_scenario, list_scenarios};
use snapshot::{ScoredSnapshot, score_snapshot, write_exports};
use util::{export_date, export_timestamp, split_csv};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "mistake-tester", version)]
#[command(about = "Headless QA for the mistake deduction engine: logic scenarios and snapshot scoring")]
struct Args {
    /// Scenarios to run (comma-separated, or "all")
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Score a saved snapshot file instead of running scenarios
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Scoring preset (standard, amount-focused, proportional, or "all" for scenarios)
    #[arg(long, default_value = "all")]
    preset: String,

    /// Base seed for generated sweep inputs
    #[arg(long, default_value_t = 1337)]
    seed: u64,

    /// Iterations per scenario and preset
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write workbook, CSV and JSON exports of the scored snapshot here
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    if let Some(path) = args.snapshot.clone() {
        return run_snapshot(&args, &path);
    }

    announce_banner(&args);
    let start_time = Instant::now();
    let presets = resolve_presets(&args.preset)?;
    let scenarios = expand_scenarios(&args.scenarios);
    let results = run_logic_scenarios(&args, &scenarios, &presets);

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:25} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner(args: &Args) {
    // Machine-readable reports on stdout must stay parseable.
    if args.report != ReportFormat::Console && args.output.is_none() {
        return;
    }
    println!("{}", "🧮 Mistake Engine Tester".bright_cyan().bold());
    println!("{}", "========================".cyan());
}

fn resolve_presets(label: &str) -> Result<Vec<Preset>> {
    if label.trim().eq_ignore_ascii_case("all") {
        return Ok(Preset::ALL.to_vec());
    }
    split_csv(label)
        .iter()
        .map(|key| Preset::parse(key).with_context(|| format!("unknown preset '{key}'")))
        .collect()
}

fn single_preset(label: &str) -> Result<Preset> {
    match resolve_presets(label)?.as_slice() {
        [preset] => Ok(*preset),
        _ if label.trim().eq_ignore_ascii_case("all") => Ok(Preset::default()),
        _ => bail!("snapshot scoring takes exactly one preset, got '{label}'"),
    }
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s.eq_ignore_ascii_case("all")) {
        scenarios.retain(|s| !s.eq_ignore_ascii_case("all"));
        for (key, _) in list_scenarios() {
            if !scenarios.iter().any(|s| s == key) {
                scenarios.push(key.to_string());
            }
        }
    }
    scenarios
}

fn run_logic_scenarios(args: &Args, scenarios: &[String], presets: &[Preset]) -> Vec<ScenarioResult> {
    let runner = LogicRunner::new(args.verbose);
    let mut results = Vec::new();
    for scenario_name in scenarios {
        if let Some(scenario) = get_scenario(scenario_name) {
            results.extend(runner.run_scenario(&scenario, presets, args.seed, args.iterations));
        } else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
        }
    }
    results
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report {
        ReportFormat::Json => reports::generate_json_report(&mut output_target, results)?,
        ReportFormat::Markdown => reports::generate_markdown_report(&mut output_target, results)?,
        ReportFormat::Csv => reports::generate_csv_report(&mut output_target, results)?,
        ReportFormat::Console => {
            if results.is_empty() {
                writeln!(&mut output_target, "No logic scenarios executed.")?;
            } else {
                reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }
    output_target.flush_inner()?;
    Ok(())
}

fn run_snapshot(args: &Args, path: &std::path::Path) -> Result<()> {
    let preset = single_preset(&args.preset)?;
    let scored = score_snapshot(path, preset)?;
    write_snapshot_report(args, &scored)?;

    if let Some(dir) = args.export_dir.as_ref() {
        let written = write_exports(dir, &scored, &export_date(), &export_timestamp())?;
        for file in written {
            log::info!("wrote {}", file.display());
            if args.verbose {
                eprintln!("📄 {}", file.display().to_string().green());
            }
        }
    }
    Ok(())
}

fn write_snapshot_report(args: &Args, scored: &ScoredSnapshot) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report {
        ReportFormat::Console => reports::snapshot_console_report(&mut output_target, scored)?,
        ReportFormat::Json => {
            reports::snapshot_json_report(&mut output_target, scored, &export_timestamp())?;
        }
        ReportFormat::Markdown => reports::snapshot_markdown_report(&mut output_target, scored)?,
        ReportFormat::Csv => reports::snapshot_csv_report(&mut output_target, scored)?,
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
