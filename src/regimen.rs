use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::nutrient_aggregator::{DatedIntake, IntakeRecord, NutrientRecord};
use crate::schedule::{day_of_week, is_scheduled_for_day, ALL_DAYS};

fn default_quantity() -> f64 {
    1.0
}

fn default_schedule() -> String {
    ALL_DAYS.to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegimenItem {
    pub product_name: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default = "default_schedule")]
    pub schedule_days: String,
    #[serde(default)]
    pub nutrients: Vec<NutrientRecord>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub product_name: String,
    pub quantity: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegimenChecklist {
    pub date: NaiveDate,
    pub total_count: usize,
    pub pending_count: usize,
    pub completed_count: usize,
    pub pending: Vec<ChecklistItem>,
    pub completed: Vec<ChecklistItem>,
}

pub fn scheduled_items(items: &[RegimenItem], date: NaiveDate) -> Vec<&RegimenItem> {
    let day = day_of_week(date);
    items
        .iter()
        .filter(|item| is_scheduled_for_day(&item.schedule_days, day))
        .collect()
}

/// Splits the items scheduled on `date` into those already logged that day
/// (matched by product name) and those still pending.
pub fn checklist(items: &[RegimenItem], logged: &[DatedIntake], date: NaiveDate) -> RegimenChecklist {
    let logged_products: HashSet<&str> = logged
        .iter()
        .filter(|intake| intake.date == date)
        .map(|intake| intake.record.product_name.as_str())
        .collect();

    let (completed, pending): (Vec<&RegimenItem>, Vec<&RegimenItem>) = scheduled_items(items, date)
        .into_iter()
        .partition(|item| logged_products.contains(item.product_name.as_str()));

    let to_checklist = |items: Vec<&RegimenItem>| -> Vec<ChecklistItem> {
        items
            .into_iter()
            .map(|item| ChecklistItem {
                product_name: item.product_name.clone(),
                quantity: item.quantity,
            })
            .collect()
    };

    RegimenChecklist {
        date,
        total_count: completed.len() + pending.len(),
        pending_count: pending.len(),
        completed_count: completed.len(),
        pending: to_checklist(pending),
        completed: to_checklist(completed),
    }
}

/// The intake records the regimen would produce on `date` if followed.
pub fn planned_intake(items: &[RegimenItem], date: NaiveDate) -> Vec<IntakeRecord> {
    scheduled_items(items, date)
        .into_iter()
        .map(|item| IntakeRecord {
            product_name: item.product_name.clone(),
            quantity: item.quantity,
            nutrients: item.nutrients.clone(),
        })
        .collect()
}
