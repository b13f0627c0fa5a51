use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::nutrient_aggregator::DatedIntake;
use crate::rdi_calculator::rdi_percent;
use crate::rdi_table::normalize_nutrient_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u32")]
pub enum TrendPeriod {
    Week,
    Month,
    Quarter,
}

impl TrendPeriod {
    pub fn days(self) -> u32 {
        match self {
            TrendPeriod::Week => 7,
            TrendPeriod::Month => 30,
            TrendPeriod::Quarter => 90,
        }
    }
}

impl From<TrendPeriod> for u32 {
    fn from(period: TrendPeriod) -> u32 {
        period.days()
    }
}

impl TryFrom<u32> for TrendPeriod {
    type Error = String;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        match days {
            7 => Ok(TrendPeriod::Week),
            30 => Ok(TrendPeriod::Month),
            90 => Ok(TrendPeriod::Quarter),
            other => Err(format!("period must be 7, 30, or 90 (got {})", other)),
        }
    }
}

impl FromStr for TrendPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let days: u32 = s
            .trim()
            .parse()
            .map_err(|_| format!("period must be 7, 30, or 90 (got '{}')", s))?;
        TrendPeriod::try_from(days)
    }
}

impl fmt::Display for TrendPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.days())
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyNutrient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rdi_percent: Option<f64>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub nutrients: Vec<DailyNutrient>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NutrientTrendSummary {
    pub name: String,
    pub unit: String,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub days_with_intake: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rdi_percent: Option<f64>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub period: TrendPeriod,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub data: Vec<TrendPoint>,
    pub summary: Vec<NutrientTrendSummary>,
}

/// Nutrient amounts for one day, in first-seen order.
#[derive(Default)]
struct DayTotals {
    entries: Vec<(String, f64, String)>,
    index: HashMap<String, usize>,
}

impl DayTotals {
    fn add(&mut self, name: String, amount: f64, unit: &str) {
        match self.index.get(&name) {
            Some(&i) => self.entries[i].1 += amount,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, amount, unit.to_string()));
            }
        }
    }
}

/// A zero percentage carries no information for a chart, so it is dropped.
fn nonzero_rdi_percent(name: &str, amount: f64, unit: &str) -> Option<f64> {
    rdi_percent(name, amount, unit).filter(|p| *p != 0.0)
}

/// Builds the daily series and per-nutrient summary for the `period` days
/// ending on `end_date`. Intakes outside the window are ignored.
pub fn build_trends(intakes: &[DatedIntake], period: TrendPeriod, end_date: NaiveDate) -> TrendReport {
    let start_date = end_date
        .checked_sub_days(Days::new(u64::from(period.days()) - 1))
        .unwrap_or(NaiveDate::MIN);

    let mut by_date: BTreeMap<NaiveDate, DayTotals> = start_date
        .iter_days()
        .take_while(|date| *date <= end_date)
        .map(|date| (date, DayTotals::default()))
        .collect();

    for intake in intakes {
        let Some(day) = by_date.get_mut(&intake.date) else {
            continue;
        };
        for nutrient in &intake.record.nutrients {
            let name = normalize_nutrient_name(&nutrient.name);
            day.add(name, nutrient.amount * intake.record.quantity, &nutrient.unit);
        }
    }

    let data: Vec<TrendPoint> = by_date
        .iter()
        .map(|(date, day)| TrendPoint {
            date: *date,
            nutrients: day
                .entries
                .iter()
                .map(|(name, amount, unit)| DailyNutrient {
                    name: name.clone(),
                    amount: *amount,
                    unit: unit.clone(),
                    rdi_percent: nonzero_rdi_percent(name, *amount, unit),
                })
                .collect(),
        })
        .collect();

    // Amounts per nutrient across days, in first-seen order; unit from the first day seen.
    let mut stats: Vec<(String, String, Vec<f64>)> = Vec::new();
    let mut stats_index: HashMap<String, usize> = HashMap::new();
    for day in by_date.values() {
        for (name, amount, unit) in &day.entries {
            match stats_index.get(name) {
                Some(&i) => stats[i].2.push(*amount),
                None => {
                    stats_index.insert(name.clone(), stats.len());
                    stats.push((name.clone(), unit.clone(), vec![*amount]));
                }
            }
        }
    }

    let mut summary: Vec<NutrientTrendSummary> = stats
        .into_iter()
        .map(|(name, unit, amounts)| {
            let nonzero: Vec<f64> = amounts.into_iter().filter(|a| *a > 0.0).collect();
            let (average, min, max) = if nonzero.is_empty() {
                (0.0, 0.0, 0.0)
            } else {
                let sum: f64 = nonzero.iter().sum();
                (
                    sum / nonzero.len() as f64,
                    nonzero.iter().copied().fold(f64::INFINITY, f64::min),
                    nonzero.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                )
            };
            NutrientTrendSummary {
                average_rdi_percent: nonzero_rdi_percent(&name, average, &unit),
                days_with_intake: nonzero.len(),
                name,
                unit,
                average,
                min,
                max,
            }
        })
        .collect();
    summary.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });

    TrendReport {
        period,
        start_date,
        end_date,
        data,
        summary,
    }
}
