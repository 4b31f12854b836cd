use anyhow::Result;
use colored::Colorize;
use montyhall_game::{ExperimentReport, StrategyOutcome};
use std::io::Write;
use std::time::Duration;

use crate::util::format_pct;

pub fn generate_console_report(
    out: &mut dyn Write,
    reports: &[ExperimentReport],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Monty Hall Results".bright_cyan().bold())?;
    writeln!(out, "{}", "=====================".cyan())?;

    for report in reports {
        writeln!(
            out,
            "{} {} (seed {}, {} trials per strategy)",
            "🎲".bold(),
            report.style.label().bold(),
            report.seed,
            report.trial_count
        )?;
        for outcome in &report.outcomes {
            write_console_outcome(out, outcome)?;
        }
        writeln!(
            out,
            "   Finished at {} in {:.3} ms ({} random draws)",
            report.finished_at.format("%Y-%m-%d %H:%M:%S%.3f UTC"),
            report.elapsed_ms,
            report.draws
        )?;
        writeln!(out)?;
    }

    writeln!(out, "Experiments run: {}", reports.len())?;
    writeln!(out, "Total time: {total_duration:?}")?;
    Ok(())
}

fn write_console_outcome(out: &mut dyn Write, outcome: &StrategyOutcome) -> Result<()> {
    let label = capitalize(outcome.strategy.label());
    writeln!(out, "   {label} Wins: {}", outcome.wins.to_string().green())?;
    writeln!(out, "   {label} Losses: {}", outcome.losses.to_string().red())?;
    writeln!(
        out,
        "   {label} Win %: {}",
        format_pct(outcome.win_pct).bright_white()
    )?;
    writeln!(
        out,
        "   {label} pass: {:.3} ms, {} random draws",
        outcome.elapsed_ms, outcome.draws
    )?;
    Ok(())
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_ascii_uppercase().to_string() + chars.as_str()
    })
}

pub fn generate_json_report(out: &mut dyn Write, reports: &[ExperimentReport]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(reports)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, reports: &[ExperimentReport]) -> Result<()> {
    writeln!(out, "# Monty Hall Results\n")?;

    for report in reports {
        writeln!(
            out,
            "## {} run, seed {}\n",
            capitalize(report.style.label()),
            report.seed
        )?;
        writeln!(out, "- **Trials per strategy**: {}", report.trial_count)?;
        writeln!(out, "- **Elapsed**: {:.3} ms", report.elapsed_ms)?;
        writeln!(out, "- **Finished at**: {}\n", report.finished_at.to_rfc3339())?;
        writeln!(
            out,
            "| Strategy | Wins | Losses | Total | Win % | Draws | Elapsed (ms) |"
        )?;
        writeln!(out, "|---|---:|---:|---:|---:|---:|---:|")?;
        for outcome in &report.outcomes {
            writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} | {:.3} |",
                outcome.strategy,
                outcome.wins,
                outcome.losses,
                outcome.total,
                format_pct(outcome.win_pct),
                outcome.draws,
                outcome.elapsed_ms
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_csv_report(out: &mut dyn Write, reports: &[ExperimentReport]) -> Result<()> {
    writeln!(
        out,
        "seed,style,strategy,wins,losses,total,win_pct,draws,elapsed_ms"
    )?;
    for report in reports {
        for outcome in &report.outcomes {
            let win_pct = outcome
                .win_pct
                .map_or_else(String::new, |pct| format!("{pct:.4}"));
            writeln!(
                out,
                "{},{},{},{},{},{},{},{},{:.3}",
                report.seed,
                report.style,
                outcome.strategy,
                outcome.wins,
                outcome.losses,
                outcome.total,
                win_pct,
                outcome.draws,
                outcome.elapsed_ms
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use montyhall_game::{ExperimentConfig, ExperimentStyle, run_experiment};

    fn sample_reports() -> Vec<ExperimentReport> {
        [ExperimentStyle::Interleaved, ExperimentStyle::Declarative]
            .into_iter()
            .map(|style| {
                let config = ExperimentConfig {
                    trial_count: 200,
                    ..ExperimentConfig::default()
                }
                .with_seed(42)
                .with_style(style);
                run_experiment(&config).unwrap()
            })
            .collect()
    }

    fn render(write: impl Fn(&mut dyn Write) -> Result<()>) -> String {
        let mut buffer: Vec<u8> = Vec::new();
        write(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn console_report_lists_wins_losses_and_percentages() {
        let reports = sample_reports();
        let text = render(|out| generate_console_report(out, &reports, Duration::from_millis(5)));
        assert!(text.contains("Switch Wins"));
        assert!(text.contains("Keep Losses"));
        assert!(text.contains("Switch Win %"));
        assert!(text.contains("seed 42"));
        assert!(text.contains("Experiments run: 2"));
        assert!(text.contains("Keep pass: "));
    }

    #[test]
    fn json_report_round_trips() {
        let reports = sample_reports();
        let text = render(|out| generate_json_report(out, &reports));
        let parsed: Vec<ExperimentReport> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), reports.len());
        for (parsed, original) in parsed.iter().zip(&reports) {
            assert_eq!(parsed.seed, original.seed);
            assert_eq!(parsed.style, original.style);
            for (left, right) in parsed.outcomes.iter().zip(&original.outcomes) {
                assert_eq!(left.strategy, right.strategy);
                assert_eq!((left.wins, left.total), (right.wins, right.total));
            }
        }
    }

    #[test]
    fn markdown_report_has_a_table_per_run() {
        let reports = sample_reports();
        let text = render(|out| generate_markdown_report(out, &reports));
        assert!(text.starts_with("# Monty Hall Results"));
        assert_eq!(text.matches("| Strategy | Wins |").count(), 2);
        assert!(text.contains("| Draws | Elapsed (ms) |"));
        assert!(text.contains("## Interleaved run, seed 42"));
    }

    #[test]
    fn csv_report_has_one_row_per_strategy() {
        let reports = sample_reports();
        let text = render(|out| generate_csv_report(out, &reports));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + 2 * 2);
        assert!(lines[0].starts_with("seed,style,strategy"));
        assert!(lines[1].starts_with("42,interleaved,switch,"));
        let header: Vec<&str> = lines[0].split(',').collect();
        assert_eq!(header.len(), 9);
        let draws_column = header.iter().position(|h| *h == "draws").unwrap();
        for line in lines.iter().skip(1) {
            let fields: Vec<&str> = line.split(',').collect();
            assert_eq!(fields.len(), header.len());
            assert!(fields[draws_column].parse::<u64>().unwrap() > 0);
        }
    }

    #[test]
    fn capitalize_handles_empty_labels() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("keep"), "Keep");
    }
}
