use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tokio::fs;
use tracing::debug;

use crate::error::IntakeError;
use crate::nutrient_aggregator::{DatedIntake, IntakeRecord, NutrientRecord};
use crate::regimen::RegimenItem;
use crate::schedule::is_valid_schedule;

// Expected CSV column headers
const DATE_COL: &str = "date";
const PRODUCT_COL: &str = "product";
const QUANTITY_COL: &str = "quantity";
const NUTRIENT_COL: &str = "nutrient";
const AMOUNT_COL: &str = "amount";
const UNIT_COL: &str = "unit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeFormat {
    Json,
    Csv,
}

impl IntakeFormat {
    pub fn from_path(path: &Path) -> Result<Self, IntakeError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "json" => Ok(IntakeFormat::Json),
            "csv" => Ok(IntakeFormat::Csv),
            _ => Err(IntakeError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

fn default_quantity() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIntake {
    date: String,
    product_name: String,
    #[serde(default = "default_quantity")]
    quantity: f64,
    #[serde(default)]
    nutrients: Vec<NutrientRecord>,
}

/// Parses a strict `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn require_date(row: usize, s: &str) -> Result<NaiveDate, IntakeError> {
    parse_date(s).ok_or_else(|| IntakeError::invalid(row, format!("date '{}' must be YYYY-MM-DD", s)))
}

fn validate_quantity(row: usize, quantity: f64) -> Result<(), IntakeError> {
    if quantity.is_finite() && quantity > 0.0 {
        Ok(())
    } else {
        Err(IntakeError::invalid(row, format!("quantity must be positive (got {})", quantity)))
    }
}

fn validate_product(row: usize, product_name: &str) -> Result<(), IntakeError> {
    if product_name.trim().is_empty() {
        return Err(IntakeError::invalid(row, "product name is required"));
    }
    Ok(())
}

fn validate_nutrient(row: usize, nutrient: &NutrientRecord) -> Result<(), IntakeError> {
    if nutrient.name.trim().is_empty() {
        return Err(IntakeError::invalid(row, "nutrient name is required"));
    }
    if nutrient.unit.trim().is_empty() {
        return Err(IntakeError::invalid(
            row,
            format!("unit is required for nutrient '{}'", nutrient.name),
        ));
    }
    if !nutrient.amount.is_finite() || nutrient.amount < 0.0 {
        return Err(IntakeError::invalid(
            row,
            format!("amount for '{}' must be zero or more (got {})", nutrient.name, nutrient.amount),
        ));
    }
    Ok(())
}

/// Parses a JSON array of dated intake entries. Entries are numbered from 1 in errors.
pub fn parse_intake_json(text: &str) -> Result<Vec<DatedIntake>, IntakeError> {
    let raw: Vec<RawIntake> = serde_json::from_str(text)?;

    let mut intakes = Vec::with_capacity(raw.len());
    for (index, entry) in raw.into_iter().enumerate() {
        let row = index + 1;
        let date = require_date(row, &entry.date)?;
        validate_product(row, &entry.product_name)?;
        validate_quantity(row, entry.quantity)?;
        for nutrient in &entry.nutrients {
            validate_nutrient(row, nutrient)?;
        }
        intakes.push(DatedIntake {
            date,
            record: IntakeRecord {
                product_name: entry.product_name,
                quantity: entry.quantity,
                nutrients: entry.nutrients,
            },
        });
    }

    debug!(intakes = intakes.len(), "parsed JSON intake log");
    Ok(intakes)
}

/// Parses a CSV intake log with one nutrient per row.
///
/// Consecutive rows that share date, product and quantity belong to the same
/// intake. A row whose nutrient, amount and unit are all blank records an
/// intake of a product with no nutrient data.
pub fn parse_intake_csv<R: Read>(reader: R) -> Result<Vec<DatedIntake>, IntakeError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or(IntakeError::MissingColumn(name))
    };
    let date_idx = column(DATE_COL)?;
    let product_idx = column(PRODUCT_COL)?;
    let quantity_idx = column(QUANTITY_COL)?;
    let nutrient_idx = column(NUTRIENT_COL)?;
    let amount_idx = column(AMOUNT_COL)?;
    let unit_idx = column(UNIT_COL)?;

    let mut intakes: Vec<DatedIntake> = Vec::new();
    for (index, result) in rdr.records().enumerate() {
        let row = index + 1;
        let record = result?;
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let date = require_date(row, field(date_idx))?;
        let product_name = field(product_idx);
        validate_product(row, product_name)?;

        let quantity = match field(quantity_idx) {
            "" => default_quantity(),
            raw => raw
                .parse::<f64>()
                .map_err(|_| IntakeError::invalid(row, format!("quantity '{}' is not a number", raw)))?,
        };
        validate_quantity(row, quantity)?;

        let (name, amount, unit) = (field(nutrient_idx), field(amount_idx), field(unit_idx));
        let nutrient = if name.is_empty() && amount.is_empty() && unit.is_empty() {
            None
        } else {
            let amount = amount
                .parse::<f64>()
                .map_err(|_| IntakeError::invalid(row, format!("amount '{}' is not a number", amount)))?;
            let nutrient = NutrientRecord {
                name: name.to_string(),
                amount,
                unit: unit.to_string(),
            };
            validate_nutrient(row, &nutrient)?;
            Some(nutrient)
        };

        let continues_previous = intakes.last().is_some_and(|last| {
            last.date == date && last.record.product_name == product_name && last.record.quantity == quantity
        });
        match (continues_previous, intakes.last_mut()) {
            (true, Some(last)) => last.record.nutrients.extend(nutrient),
            _ => intakes.push(DatedIntake {
                date,
                record: IntakeRecord {
                    product_name: product_name.to_string(),
                    quantity,
                    nutrients: nutrient.into_iter().collect(),
                },
            }),
        }
    }

    debug!(intakes = intakes.len(), "parsed CSV intake log");
    Ok(intakes)
}

pub fn parse_intake_log(text: &str, format: IntakeFormat) -> Result<Vec<DatedIntake>, IntakeError> {
    match format {
        IntakeFormat::Json => parse_intake_json(text),
        IntakeFormat::Csv => parse_intake_csv(text.as_bytes()),
    }
}

async fn read_text(path: &Path) -> Result<String, IntakeError> {
    fs::read_to_string(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => IntakeError::NotFound(path.to_path_buf()),
        _ => IntakeError::Io(e),
    })
}

/// Reads a `.json` or `.csv` intake log, picking the parser from the extension.
pub async fn load_intake_log(path: &Path) -> Result<Vec<DatedIntake>, IntakeError> {
    let format = IntakeFormat::from_path(path)?;
    let text = read_text(path).await?;
    parse_intake_log(&text, format)
}

/// Parses a JSON array of regimen items, checking quantities, schedules and nutrients.
pub fn parse_regimen_json(text: &str) -> Result<Vec<RegimenItem>, IntakeError> {
    let items: Vec<RegimenItem> = serde_json::from_str(text)?;
    for (index, item) in items.iter().enumerate() {
        let row = index + 1;
        validate_product(row, &item.product_name)?;
        validate_quantity(row, item.quantity)?;
        if !is_valid_schedule(&item.schedule_days) {
            return Err(IntakeError::invalid(
                row,
                format!("schedule '{}' must be comma-separated day numbers 0-6", item.schedule_days),
            ));
        }
        for nutrient in &item.nutrients {
            validate_nutrient(row, nutrient)?;
        }
    }
    debug!(items = items.len(), "parsed regimen");
    Ok(items)
}

pub async fn load_regimen(path: &Path) -> Result<Vec<RegimenItem>, IntakeError> {
    let text = read_text(path).await?;
    parse_regimen_json(&text)
}
