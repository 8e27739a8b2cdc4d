use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use xeme_core::numbers::ratio_to_percent;

use crate::evaluation::{EvaluationResult, WeightSummary};

fn pct(value: f64) -> String {
    format!("{:.2}%", ratio_to_percent(value, 2))
}

fn weight_line(weights: &WeightSummary) -> String {
    let mut line = format!("default {}", weights.default_weight);
    for (display, weight) in &weights.overrides {
        line.push_str(&format!(", {display} → {weight}"));
    }
    line
}

pub fn generate_console_report<W: Write>(out: &mut W, results: &[EvaluationResult]) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Expected Value Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "=========================".cyan())?;

    for result in results {
        let status = if result.passed {
            "✅".green()
        } else {
            "❌".red()
        };
        writeln!(
            out,
            "{} {} [{}] bound {} · base {} · mode {}",
            status,
            result.name.bold(),
            result.status.yellow(),
            result.bound,
            result.base,
            result.mode
        )?;
        writeln!(out, "   Weights: {}", weight_line(&result.weights))?;

        if let Some(error) = &result.error {
            writeln!(out, "   Computation failed: {}", error.red())?;
        } else if let Some(ev) = result.ev {
            writeln!(out, "   EV: {ev:.6} ({})", pct(ev))?;
            writeln!(out, "   {:>8}  {:>9}  {:>9}", "Rounds", "RTP", "Edge")?;
            for report in &result.reports {
                let edge = pct(report.edge);
                let edge = if report.edge > 0.0 {
                    edge.red()
                } else {
                    edge.green()
                };
                writeln!(
                    out,
                    "   {:>8}  {:>9}  {:>9}",
                    report.rounds,
                    pct(report.rtp),
                    edge
                )?;
            }
        }

        if let Some(rows) = &result.tiers {
            writeln!(out, "   {:>4}  {:<16}  {:<16}", "Rank", "Player", "House")?;
            for row in rows {
                writeln!(
                    out,
                    "   {:>4}  {:<16}  {:<16}",
                    row.rank,
                    row.player.as_deref().unwrap_or("-"),
                    row.house.as_deref().unwrap_or("-")
                )?;
            }
        }

        if let Some(config) = &result.configuration {
            writeln!(out, "   Configuration: {}", config.to_json()?)?;
        }
        writeln!(out)?;
    }

    let failed = results.iter().filter(|r| !r.passed).count();
    writeln!(
        out,
        "Evaluated: {}  Failed: {}",
        results.len(),
        if failed == 0 {
            failed.to_string().green()
        } else {
            failed.to_string().red()
        }
    )?;
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    results: &'a [EvaluationResult],
}

pub fn generate_json_report<W: Write>(out: &mut W, results: &[EvaluationResult]) -> Result<()> {
    let report = JsonReport {
        generated_at: Utc::now().to_rfc3339(),
        results,
    };
    let json_output = serde_json::to_string_pretty(&report)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report<W: Write>(
    out: &mut W,
    results: &[EvaluationResult],
) -> Result<()> {
    writeln!(out, "# Xeme EV Report\n")?;
    writeln!(out, "_Generated {}_\n", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"))?;

    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(out, "## {} {} ({})\n", status, result.name, result.status)?;
        writeln!(
            out,
            "- **Bound / base / mode**: {} / {} / {}",
            result.bound, result.base, result.mode
        )?;
        writeln!(out, "- **Weights**: {}", weight_line(&result.weights))?;

        if let Some(error) = &result.error {
            writeln!(out, "- **Computation failed**: {error}\n")?;
            continue;
        }
        if let Some(ev) = result.ev {
            writeln!(out, "- **EV**: {ev:.6} ({})\n", pct(ev))?;
        }
        writeln!(out, "| Rounds | RTP | Edge |")?;
        writeln!(out, "|---:|---:|---:|")?;
        for report in &result.reports {
            writeln!(
                out,
                "| {} | {} | {} |",
                report.rounds,
                pct(report.rtp),
                pct(report.edge)
            )?;
        }
        writeln!(out)?;

        if let Some(rows) = &result.tiers {
            writeln!(out, "| Rank | Player | House |")?;
            writeln!(out, "|---:|---|---|")?;
            for row in rows {
                writeln!(
                    out,
                    "| {} | {} | {} |",
                    row.rank,
                    row.player.as_deref().unwrap_or("-"),
                    row.house.as_deref().unwrap_or("-")
                )?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}
