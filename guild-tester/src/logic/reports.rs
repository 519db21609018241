use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use guild_game::numbers::ratio;

use super::CampaignReport;

fn summary_counts(reports: &[CampaignReport]) -> (usize, usize, usize) {
    let total = reports.len();
    let passed = reports.iter().filter(|r| r.passed()).count();
    (total, passed, total - passed)
}

fn outcome_label(report: &CampaignReport) -> String {
    report
        .defeat_message
        .clone()
        .unwrap_or_else(|| "Guild still standing".to_string())
}

pub fn generate_console_report<W: Write>(
    out: &mut W,
    reports: &[CampaignReport],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Campaign Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "===========================".cyan())?;

    let (total, passed, failed) = summary_counts(reports);
    writeln!(out, "Total campaigns: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", failed.to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", ratio(passed, total) * 100.0)?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for report in reports {
        let status = if report.passed() {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(
            out,
            "{} {} (seed {})",
            status,
            report.strategy.bold(),
            report.seed
        )?;
        writeln!(
            out,
            "   Days survived: {} - {}",
            report.days_survived,
            outcome_label(report)
        )?;
        writeln!(
            out,
            "   Missions: {}/{} won ({:.0}%)",
            report.missions_won,
            report.missions_total(),
            ratio(report.missions_won, report.missions_total()) * 100.0
        )?;
        writeln!(
            out,
            "   Heroes: {}/{} alive, {} rare items",
            report.heroes_alive, report.heroes_total, report.rare_items
        )?;
        let res = &report.final_resources;
        writeln!(
            out,
            "   Ledger: Gold {}, Food {}, Medicine {}, Equipment {}, Debt {}",
            res.money, res.food, res.medicine, res.equipment, report.debt
        )?;
        if report.prosperous {
            writeln!(out, "   {}", "Prosperous".bright_green())?;
        }
        if !report.violations.is_empty() {
            writeln!(out, "   Violations:")?;
            for violation in &report.violations {
                writeln!(out, "     • {}", violation.red())?;
            }
        }
        for line in &report.log {
            writeln!(out, "     {}", line.dimmed())?;
        }
        writeln!(out)?;
    }

    let longest = reports.iter().max_by_key(|r| r.days_survived);
    let shortest = reports.iter().min_by_key(|r| r.days_survived);
    if let (Some(longest), Some(shortest)) = (longest, shortest) {
        writeln!(out, "{}", "⏳ Survival Summary".bright_yellow().bold())?;
        writeln!(out, "{}", "==================".yellow())?;
        writeln!(
            out,
            "Longest: {} seed {} ({} days)",
            longest.strategy.green(),
            longest.seed,
            longest.days_survived
        )?;
        writeln!(
            out,
            "Shortest: {} seed {} ({} days)",
            shortest.strategy.yellow(),
            shortest.seed,
            shortest.days_survived
        )?;
    }
    Ok(())
}

pub fn generate_json_report<W: Write>(out: &mut W, reports: &[CampaignReport]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(reports)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report<W: Write>(out: &mut W, reports: &[CampaignReport]) -> Result<()> {
    writeln!(out, "# Guild Campaign Results\n")?;

    let (total, passed, failed) = summary_counts(reports);
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total campaigns**: {total}")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {failed}")?;
    writeln!(
        out,
        "- **Success rate**: {:.1}%\n",
        ratio(passed, total) * 100.0
    )?;

    writeln!(out, "## Campaigns\n")?;
    writeln!(
        out,
        "| Status | Strategy | Seed | Days | Missions won | Heroes alive | Outcome |"
    )?;
    writeln!(out, "|---|---|---|---|---|---|---|")?;
    for report in reports {
        let status = if report.passed() { "✅" } else { "❌" };
        writeln!(
            out,
            "| {status} | {} | {} | {} | {}/{} | {}/{} | {} |",
            report.strategy,
            report.seed,
            report.days_survived,
            report.missions_won,
            report.missions_total(),
            report.heroes_alive,
            report.heroes_total,
            outcome_label(report)
        )?;
    }

    let failing: Vec<&CampaignReport> = reports.iter().filter(|r| !r.passed()).collect();
    if !failing.is_empty() {
        writeln!(out, "\n## Violations\n")?;
        for report in failing {
            writeln!(out, "### {} seed {}\n", report.strategy, report.seed)?;
            for violation in &report.violations {
                writeln!(out, "- {violation}")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use guild_game::{DefeatReason, ResourceStock};

    fn report(seed: u64, violations: Vec<String>) -> CampaignReport {
        CampaignReport {
            strategy: "Balanced".to_string(),
            seed,
            days_survived: 9,
            defeat: Some(DefeatReason::AllHeroesLost),
            defeat_message: Some(DefeatReason::AllHeroesLost.message().to_string()),
            missions_won: 3,
            missions_lost: 1,
            heroes_alive: 0,
            heroes_total: 3,
            rare_items: 2,
            final_resources: ResourceStock::default(),
            debt: 0,
            prosperous: false,
            rng_draws: 120,
            violations,
            log: Vec::new(),
        }
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).expect("report renders");
        String::from_utf8(buf).expect("utf8 report")
    }

    #[test]
    fn json_report_is_an_array() {
        let reports = vec![report(1, Vec::new()), report(2, Vec::new())];
        let text = render(|out| generate_json_report(out, &reports));
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        let array = value.as_array().expect("array");
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["seed"], 1);
        assert!(array[0].get("log").is_none());
    }

    #[test]
    fn markdown_lists_violations() {
        let reports = vec![
            report(1, Vec::new()),
            report(2, vec!["hunger 130 out of range".to_string()]),
        ];
        let text = render(|out| generate_markdown_report(out, &reports));
        assert!(text.contains("- **Failed**: 1"));
        assert!(text.contains("| ✅ | Balanced | 1 | 9 | 3/4 | 0/3 |"));
        assert!(text.contains("### Balanced seed 2"));
        assert!(text.contains("- hunger 130 out of range"));
    }

    #[test]
    fn console_report_handles_empty_input() {
        let text = render(|out| generate_console_report(out, &[], Duration::from_millis(5)));
        assert!(text.contains("Total campaigns: 0"));
        assert!(!text.contains("Survival Summary"));
    }

    #[test]
    fn console_report_names_extremes() {
        let mut long = report(7, Vec::new());
        long.days_survived = 30;
        long.defeat = None;
        long.defeat_message = None;
        let reports = vec![report(3, Vec::new()), long];
        let text = render(|out| generate_console_report(out, &reports, Duration::ZERO));
        assert!(text.contains("Guild still standing"));
        assert!(text.contains("Missions: 3/4 won (75%)"));
        assert!(text.contains("(30 days)"));
    }
}
