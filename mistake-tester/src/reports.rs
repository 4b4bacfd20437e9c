use anyhow::{Context, Result};
use colored::Colorize;
use mistake_core::export::DECISIONS_SHEET;
use mistake_core::{ExportReport, format_rupiah, sheet_to_csv};
use std::io::Write;
use std::time::Duration;

use crate::runner::ScenarioResult;
use crate::snapshot::ScoredSnapshot;

#[allow(clippy::cast_precision_loss)]
fn success_rate(results: &[ScenarioResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let passed = results.iter().filter(|r| r.passed).count();
    (passed as f64 / results.len() as f64) * 100.0
}

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Logic Scenario Results".bright_cyan().bold())?;
    writeln!(out, "{}", "=========================".cyan())?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out, "Total runs: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", success_rate(results))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(
            out,
            "{} {} [{}]",
            status,
            result.scenario_name.bold(),
            result.preset
        )?;
        writeln!(
            out,
            "   Iterations: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "   Average time: {:?}", result.average_duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }

    let fastest = results.iter().min_by_key(|r| r.average_duration);
    let slowest = results.iter().max_by_key(|r| r.average_duration);
    if let (Some(fastest), Some(slowest)) = (fastest, slowest) {
        writeln!(out, "{}", "⚡ Performance Summary".bright_yellow().bold())?;
        writeln!(out, "{}", "=====================".yellow())?;
        writeln!(
            out,
            "Fastest: {} [{}] ({:?})",
            fastest.scenario_name.green(),
            fastest.preset,
            fastest.average_duration
        )?;
        writeln!(
            out,
            "Slowest: {} [{}] ({:?})",
            slowest.scenario_name.yellow(),
            slowest.preset,
            slowest.average_duration
        )?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, results).context("serializing scenario results")?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(out, "# Mistake Engine Scenario Results\n")?;
    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total runs**: {total}")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}", total - passed)?;
    writeln!(out, "- **Success rate**: {:.1}%\n", success_rate(results))?;

    writeln!(out, "## Detailed Results\n")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(out, "### {} {} ({})\n", status, result.scenario_name, result.preset)?;
        writeln!(
            out,
            "- **Iterations**: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "- **Average time**: {:?}", result.average_duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_csv_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([
        "scenario",
        "preset",
        "passed",
        "iterations",
        "successful",
        "avg_micros",
    ])?;
    for result in results {
        writer.write_record([
            result.scenario_name.clone(),
            result.preset.to_string(),
            result.passed.to_string(),
            result.iterations_run.to_string(),
            result.successful_iterations.to_string(),
            result.average_duration.as_micros().to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn snapshot_console_report(out: &mut dyn Write, scored: &ScoredSnapshot) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{} {}",
        "📁 Snapshot".bright_cyan().bold(),
        scored.source.display()
    )?;
    writeln!(out, "Preset: {}", scored.preset.to_string().bold())?;
    writeln!(out, "{}", "-".repeat(72).cyan())?;
    writeln!(
        out,
        "{:<20} {:>5} {:>14} {:>5} {:>5} {:>9} {:>16}",
        "Name", "Count", "Amount", "C", "A", "Policy", "Final"
    )?;
    for record in &scored.records {
        writeln!(
            out,
            "{:<20} {:>5} {:>14} {:>5.2} {:>5.2} {:>9} {:>16}",
            record.display_name(),
            record.mistake_count,
            format_rupiah(record.mistake_amount),
            record.count_score,
            record.amount_score,
            record.decision_policy.key(),
            format_rupiah(record.final_amount).bright_white()
        )?;
    }
    writeln!(out, "{}", "-".repeat(72).cyan())?;
    writeln!(out, "Staff: {}", scored.summary.count)?;
    writeln!(
        out,
        "Total deductions: {}",
        format_rupiah(scored.summary.total).green()
    )?;
    writeln!(out, "Average deduction: {}", format_rupiah(scored.summary.average))?;
    Ok(())
}

pub fn snapshot_json_report(
    out: &mut dyn Write,
    scored: &ScoredSnapshot,
    timestamp: &str,
) -> Result<()> {
    let json = ExportReport::new(timestamp, &scored.records)
        .to_json_pretty()
        .context("serializing snapshot report")?;
    writeln!(out, "{json}")?;
    Ok(())
}

pub fn snapshot_markdown_report(out: &mut dyn Write, scored: &ScoredSnapshot) -> Result<()> {
    writeln!(out, "# Snapshot: {}\n", scored.source.display())?;
    writeln!(out, "Preset: `{}`\n", scored.preset)?;
    writeln!(out, "| Name | Count | Amount | Policy | Final |")?;
    writeln!(out, "|---|---:|---:|---|---:|")?;
    for record in &scored.records {
        writeln!(
            out,
            "| {} | {} | {} | {} | {} |",
            record.display_name(),
            record.mistake_count,
            format_rupiah(record.mistake_amount),
            record.decision_policy,
            format_rupiah(record.final_amount)
        )?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "**Total**: {} across {} staff (average {})",
        format_rupiah(scored.summary.total),
        scored.summary.count,
        format_rupiah(scored.summary.average)
    )?;
    Ok(())
}

pub fn snapshot_csv_report(out: &mut dyn Write, scored: &ScoredSnapshot) -> Result<()> {
    let workbook = scored.workbook();
    let sheet = workbook
        .sheet(DECISIONS_SHEET)
        .context("workbook has no decisions sheet")?;
    out.write_all(sheet_to_csv(sheet)?.as_bytes())?;
    Ok(())
}
