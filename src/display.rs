//! Plain-text rendering of summaries, trends and regimen checklists for the terminal.

use std::fmt::Write;

use crate::formatting::{format_amount, format_date, to_fixed};
use crate::insights::{Insight, InsightType};
use crate::nutrient_aggregator::AggregatedNutrient;
use crate::regimen::RegimenChecklist;
use crate::trends::TrendReport;

const BAR_WIDTH: usize = 20;

fn percent_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn insight_marker(insight_type: InsightType) -> &'static str {
    match insight_type {
        InsightType::Warning => "!",
        InsightType::Info => "i",
        InsightType::Success => "+",
    }
}

pub fn render_nutrients(nutrients: &[AggregatedNutrient]) -> String {
    if nutrients.is_empty() {
        return "No nutrients logged.\n".to_string();
    }
    let name_width = nutrients.iter().map(|n| n.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for nutrient in nutrients {
        let amount = format_amount(nutrient.total_amount, &nutrient.unit);
        let _ = match nutrient.rdi_percent {
            Some(percent) => writeln!(
                out,
                "{:<width$}  {:>12}  {} {:>5}% DV",
                nutrient.name,
                amount,
                percent_bar(percent),
                to_fixed(percent, 0),
                width = name_width
            ),
            None => writeln!(out, "{:<width$}  {:>12}", nutrient.name, amount, width = name_width),
        };
        if nutrient.sources.len() > 1 {
            for source in &nutrient.sources {
                let _ = writeln!(
                    out,
                    "{:<width$}    - {} ({})",
                    "",
                    source.product_name,
                    format_amount(source.amount, &nutrient.unit),
                    width = name_width
                );
            }
        }
    }
    out
}

pub fn render_insights(insights: &[Insight]) -> String {
    let mut out = String::new();
    for insight in insights {
        let _ = writeln!(out, "[{}] {}", insight_marker(insight.insight_type), insight.message);
        if let Some(details) = &insight.details {
            let _ = writeln!(out, "    {}", details);
        }
    }
    out
}

pub fn render_trends(report: &TrendReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}-day trend, {} to {}",
        report.period,
        format_date(report.start_date),
        format_date(report.end_date)
    );
    for point in &report.data {
        let logged = if point.nutrients.is_empty() {
            "-".to_string()
        } else {
            point
                .nutrients
                .iter()
                .map(|n| match n.rdi_percent {
                    Some(percent) => format!("{} {}%", n.name, to_fixed(percent, 0)),
                    None => format!("{} {}", n.name, format_amount(n.amount, &n.unit)),
                })
                .collect::<Vec<_>>()
                .join(", ")
        };
        let _ = writeln!(out, "  {}  {}", format_date(point.date), logged);
    }
    if !report.summary.is_empty() {
        let _ = writeln!(out, "\nSummary (days with intake):");
    }
    for stat in &report.summary {
        let average_dv = stat
            .average_rdi_percent
            .map(|p| format!(" ({}% DV)", to_fixed(p, 0)))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {}: avg {}{}, min {}, max {}, {} day(s)",
            stat.name,
            format_amount(stat.average, &stat.unit),
            average_dv,
            format_amount(stat.min, &stat.unit),
            format_amount(stat.max, &stat.unit),
            stat.days_with_intake
        );
    }
    out
}

pub fn render_checklist(checklist: &RegimenChecklist) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Regimen for {}: {}/{} taken",
        format_date(checklist.date),
        checklist.completed_count,
        checklist.total_count
    );
    for item in &checklist.completed {
        let _ = writeln!(out, "  [x] {} x{}", item.product_name, item.quantity);
    }
    for item in &checklist.pending {
        let _ = writeln!(out, "  [ ] {} x{}", item.product_name, item.quantity);
    }
    out
}
