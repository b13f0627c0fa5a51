use chrono::NaiveDate;
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::trends::TrendPeriod;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Aggregate nutrients for a day or date range and report insights
    #[command(group(ArgGroup::new("window").required(true).args(["date", "from"])))]
    Summary {
        /// Path to the intake log (.json or .csv)
        #[arg(short, long, env = "SUPPLEMENT_INTAKE_FILE")]
        intake_file: PathBuf,

        /// Single day to summarize (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// First day of the range (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,

        /// Last day of the range, inclusive (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
    },

    /// Daily nutrient series and per-nutrient statistics over 7, 30 or 90 days
    Trends {
        /// Path to the intake log (.json or .csv)
        #[arg(short, long, env = "SUPPLEMENT_INTAKE_FILE")]
        intake_file: PathBuf,

        /// Window length in days: 7, 30 or 90
        #[arg(short, long, default_value = "7")]
        period: TrendPeriod,

        /// Last day of the window (defaults to today)
        #[arg(long)]
        end_date: Option<NaiveDate>,
    },

    /// Regimen checklist for a day, with a preview of the planned intake
    Regimen {
        /// Path to the regimen (.json)
        #[arg(short, long, env = "SUPPLEMENT_REGIMEN_FILE")]
        regimen_file: PathBuf,

        /// Intake log used to tick off items already taken
        #[arg(short, long, env = "SUPPLEMENT_INTAKE_FILE")]
        intake_file: Option<PathBuf>,

        /// Day to check (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Describe a day-of-week schedule such as "1,3,5"
    Schedule {
        /// Comma-separated day numbers, 0 = Sunday
        days: String,

        /// Also report whether this day is scheduled
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_requires_a_window() {
        let result = Cli::try_parse_from(["supplement-insights", "summary", "--intake-file", "log.json"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "supplement-insights",
            "summary",
            "--intake-file",
            "log.json",
            "--from",
            "2024-05-01",
            "--to",
            "2024-05-07",
        ])
        .unwrap();
        match cli.command {
            Command::Summary { from, to, date, .. } => {
                assert_eq!(from, NaiveDate::from_ymd_opt(2024, 5, 1));
                assert_eq!(to, NaiveDate::from_ymd_opt(2024, 5, 7));
                assert_eq!(date, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_trends_period_validation() {
        let cli = Cli::try_parse_from([
            "supplement-insights",
            "--format",
            "json",
            "trends",
            "-i",
            "log.csv",
            "--period",
            "30",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Command::Trends { period: TrendPeriod::Month, .. }));

        let bad = Cli::try_parse_from(["supplement-insights", "trends", "-i", "log.csv", "--period", "14"]);
        assert!(bad.is_err());
    }
}
