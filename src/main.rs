use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use supplement_insights::cli::{parse_args, Command, OutputFormat};
use supplement_insights::display::{render_checklist, render_insights, render_nutrients, render_trends};
use supplement_insights::insights::{generate_insights, Insight};
use supplement_insights::intake_loader::{load_intake_log, load_regimen};
use supplement_insights::nutrient_aggregator::{aggregate, average_per_day, AggregatedNutrient, DatedIntake};
use supplement_insights::regimen::{checklist, planned_intake, RegimenChecklist};
use supplement_insights::schedule::{
    day_of_week, format_schedule_days, is_scheduled_for_day, parse_schedule_days, schedule_label, FULL_DAY_NAMES,
};
use supplement_insights::trends::build_trends;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryOutput<'a> {
    start_date: NaiveDate,
    end_date: NaiveDate,
    intake_count: usize,
    nutrients: &'a [AggregatedNutrient],
    insights: &'a [Insight],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegimenOutput<'a> {
    checklist: &'a RegimenChecklist,
    planned_nutrients: &'a [AggregatedNutrient],
    insights: &'a [Insight],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleOutput {
    days: String,
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scheduled: Option<bool>,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

async fn read_intake_log(path: &Path) -> Result<Vec<DatedIntake>> {
    let intakes = load_intake_log(path)
        .await
        .with_context(|| format!("Failed to load intake file '{}'", path.display()))?;
    info!(intakes = intakes.len(), path = %path.display(), "loaded intake log");
    Ok(intakes)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

async fn run_summary(
    intake_file: &Path,
    window: (NaiveDate, NaiveDate),
    format: OutputFormat,
) -> Result<()> {
    let (start_date, end_date) = window;
    if start_date > end_date {
        bail!("Start date {} is after end date {}", start_date, end_date);
    }

    let intakes = read_intake_log(intake_file).await?;
    let in_window: Vec<&DatedIntake> = intakes
        .iter()
        .filter(|intake| intake.date >= start_date && intake.date <= end_date)
        .collect();
    if in_window.is_empty() {
        warn!(%start_date, %end_date, "no intakes logged in the requested window");
    }

    let nutrients = aggregate(in_window.iter().map(|intake| &intake.record)).into_sorted_by_name();
    let days = (end_date - start_date).num_days() as u32 + 1;
    debug!(nutrients = nutrients.len(), days, "aggregated intake window");

    // Insights judge daily intake, so multi-day windows are averaged first.
    let insights = if days > 1 {
        generate_insights(&average_per_day(&nutrients, days))
    } else {
        generate_insights(&nutrients)
    };

    match format {
        OutputFormat::Json => print_json(&SummaryOutput {
            start_date,
            end_date,
            intake_count: in_window.len(),
            nutrients: &nutrients,
            insights: &insights,
        }),
        OutputFormat::Text => {
            if start_date == end_date {
                println!("Nutrients for {} ({} intakes)\n", start_date, in_window.len());
            } else {
                println!(
                    "Nutrients for {} to {} ({} intakes)\n",
                    start_date,
                    end_date,
                    in_window.len()
                );
            }
            print!("{}", render_nutrients(&nutrients));
            println!("\nInsights:");
            print!("{}", render_insights(&insights));
            Ok(())
        }
    }
}

async fn run_regimen(
    regimen_file: &Path,
    intake_file: Option<&Path>,
    date: NaiveDate,
    format: OutputFormat,
) -> Result<()> {
    let items = load_regimen(regimen_file)
        .await
        .with_context(|| format!("Failed to load regimen file '{}'", regimen_file.display()))?;
    info!(items = items.len(), path = %regimen_file.display(), "loaded regimen");

    let logged = match intake_file {
        Some(path) => read_intake_log(path).await?,
        None => Vec::new(),
    };

    let day_checklist = checklist(&items, &logged, date);
    let planned = planned_intake(&items, date);
    let planned_nutrients = aggregate(&planned).into_sorted_by_name();
    let insights = generate_insights(&planned_nutrients);

    match format {
        OutputFormat::Json => print_json(&RegimenOutput {
            checklist: &day_checklist,
            planned_nutrients: &planned_nutrients,
            insights: &insights,
        }),
        OutputFormat::Text => {
            print!("{}", render_checklist(&day_checklist));
            println!("\nPlanned nutrients:");
            print!("{}", render_nutrients(&planned_nutrients));
            println!("\nInsights:");
            print!("{}", render_insights(&insights));
            Ok(())
        }
    }
}

fn run_schedule(days: &str, date: Option<NaiveDate>, format: OutputFormat) -> Result<()> {
    let output = ScheduleOutput {
        days: format_schedule_days(&parse_schedule_days(days)),
        label: schedule_label(days),
        date,
        scheduled: date.map(|d| is_scheduled_for_day(days, day_of_week(d))),
    };

    match format {
        OutputFormat::Json => print_json(&output),
        OutputFormat::Text => {
            println!("{} ({})", output.label, output.days);
            if let (Some(d), Some(scheduled)) = (output.date, output.scheduled) {
                let weekday = FULL_DAY_NAMES[day_of_week(d) as usize];
                let verdict = if scheduled { "scheduled" } else { "not scheduled" };
                println!("{} ({}) is {}", d, weekday, verdict);
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok(); // Load .env for default file paths and RUST_LOG

    let cli = parse_args();
    init_tracing(cli.verbose);
    debug!(?cli, "parsed arguments");

    match cli.command {
        Command::Summary {
            intake_file,
            date,
            from,
            to,
        } => {
            let window = match (date, from, to) {
                (Some(day), _, _) => (day, day),
                (None, Some(from), Some(to)) => (from, to),
                _ => bail!("Either --date or --from/--to is required"),
            };
            run_summary(&intake_file, window, cli.format).await
        }
        Command::Trends {
            intake_file,
            period,
            end_date,
        } => {
            let intakes = read_intake_log(&intake_file).await?;
            let report = build_trends(&intakes, period, end_date.unwrap_or_else(today));
            match cli.format {
                OutputFormat::Json => print_json(&report),
                OutputFormat::Text => {
                    print!("{}", render_trends(&report));
                    Ok(())
                }
            }
        }
        Command::Regimen {
            regimen_file,
            intake_file,
            date,
        } => {
            run_regimen(
                &regimen_file,
                intake_file.as_deref(),
                date.unwrap_or_else(today),
                cli.format,
            )
            .await
        }
        Command::Schedule { days, date } => run_schedule(&days, date, cli.format),
    }
}
