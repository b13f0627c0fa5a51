use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::rdi_calculator::rdi_percent;
use crate::rdi_table::{normalize_nutrient_name, rdi_info};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NutrientRecord {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

fn default_quantity() -> f64 {
    1.0
}

/// One product taken `quantity` times, with the nutrients of a single serving.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IntakeRecord {
    pub product_name: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub nutrients: Vec<NutrientRecord>,
}

/// An intake record as logged on a given day.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedIntake {
    pub date: NaiveDate,
    pub record: IntakeRecord,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NutrientSource {
    pub product_name: String,
    pub amount: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedNutrient {
    pub name: String,
    pub total_amount: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rdi_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rdi_percent: Option<f64>,
    pub sources: Vec<NutrientSource>,
}

/// Aggregated nutrients keyed by canonical name, kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NutrientTotals {
    entries: Vec<AggregatedNutrient>,
    index: HashMap<String, usize>,
}

impl NutrientTotals {
    pub fn get(&self, name: &str) -> Option<&AggregatedNutrient> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AggregatedNutrient> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[AggregatedNutrient] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<AggregatedNutrient> {
        self.entries
    }

    /// Entries ordered by name, case-insensitively, for display.
    pub fn into_sorted_by_name(self) -> Vec<AggregatedNutrient> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        entries
    }

    fn add(&mut self, canonical: String, unit: &str, product_name: &str, amount: f64) {
        let source = NutrientSource {
            product_name: product_name.to_string(),
            amount,
        };
        if let Some(&i) = self.index.get(&canonical) {
            // Later records keep the first unit seen; amounts are summed as given.
            let existing = &mut self.entries[i];
            existing.total_amount += amount;
            existing.sources.push(source);
        } else {
            let rdi_amount = rdi_info(&canonical).map(|rdi| rdi.amount);
            self.index.insert(canonical.clone(), self.entries.len());
            self.entries.push(AggregatedNutrient {
                name: canonical,
                total_amount: amount,
                unit: unit.to_string(),
                rdi_amount,
                rdi_percent: None,
                sources: vec![source],
            });
        }
    }
}

/// Sums each nutrient across intake records, scaled by the record's quantity.
///
/// Sources are appended in record order, then in each record's nutrient order.
/// Once everything is summed, `rdi_percent` is attached where the nutrient has
/// an RDI entry and a convertible unit.
pub fn aggregate<'a, I>(records: I) -> NutrientTotals
where
    I: IntoIterator<Item = &'a IntakeRecord>,
{
    let mut totals = NutrientTotals::default();

    for record in records {
        for nutrient in &record.nutrients {
            let scaled_amount = nutrient.amount * record.quantity;
            let canonical = normalize_nutrient_name(&nutrient.name);
            totals.add(canonical, &nutrient.unit, &record.product_name, scaled_amount);
        }
    }

    for entry in &mut totals.entries {
        entry.rdi_percent = rdi_percent(&entry.name, entry.total_amount, &entry.unit);
    }

    totals
}

/// Scales range totals down to a per-day average. Source amounts are scaled
/// with the total so each entry still sums to its sources.
pub fn average_per_day(nutrients: &[AggregatedNutrient], days: u32) -> Vec<AggregatedNutrient> {
    let days = f64::from(days.max(1));
    nutrients
        .iter()
        .map(|n| AggregatedNutrient {
            name: n.name.clone(),
            total_amount: n.total_amount / days,
            unit: n.unit.clone(),
            rdi_amount: n.rdi_amount,
            rdi_percent: n.rdi_percent.map(|p| p / days),
            sources: n
                .sources
                .iter()
                .map(|s| NutrientSource {
                    product_name: s.product_name.clone(),
                    amount: s.amount / days,
                })
                .collect(),
        })
        .collect()
}
