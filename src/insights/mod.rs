//! Human-readable findings derived from aggregated nutrient totals.
//!
//! Rules are evaluated in a fixed order (excess, redundancy, deficiency,
//! coverage, interactions) and the first three walk the nutrients in the order
//! they were given, so the output is stable for a given input.

pub mod interactions;

use serde::Serialize;

use crate::formatting::{format_amount, to_fixed};
use crate::nutrient_aggregator::AggregatedNutrient;
use crate::rdi_calculator::is_above_upper_limit;
use crate::rdi_table::rdi_info;

pub use interactions::{check_interactions, InteractionKind, InteractionRule, INTERACTION_RULES};

/// Nutrients reported as missing or low when they are not well covered.
pub const KEY_NUTRIENTS: [&str; 6] = ["Vitamin D", "Vitamin B12", "Iron", "Calcium", "Magnesium", "Omega-3"];

const HIGH_INTAKE_PERCENT: f64 = 200.0;
const LOW_INTAKE_PERCENT: f64 = 25.0;
const WELL_COVERED_PERCENT: std::ops::RangeInclusive<f64> = 50.0..=150.0;
const WELL_COVERED_MIN_COUNT: usize = 5;
const REDUNDANT_SOURCE_COUNT: usize = 3;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    Warning,
    Info,
    Success,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Excess,
    Deficiency,
    Redundancy,
    Good,
    Interaction,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Insight {
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub category: InsightCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrient: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

fn excess_insight(nutrient: &AggregatedNutrient) -> Option<Insight> {
    let rdi = rdi_info(&nutrient.name)?;
    let percent = nutrient.rdi_percent?;

    if is_above_upper_limit(&nutrient.name, nutrient.total_amount, &nutrient.unit) {
        let limit = rdi.upper_limit.map(|limit| format_amount(limit, rdi.unit)).unwrap_or_default();
        Some(Insight {
            insight_type: InsightType::Warning,
            category: InsightCategory::Excess,
            nutrient: Some(nutrient.name.clone()),
            message: format!("{} exceeds upper intake level", nutrient.name),
            details: Some(format!(
                "You're getting {} ({}% DV). The tolerable upper limit is {}.",
                format_amount(nutrient.total_amount, &nutrient.unit),
                to_fixed(percent, 0),
                limit
            )),
        })
    } else if percent > HIGH_INTAKE_PERCENT {
        Some(Insight {
            insight_type: InsightType::Info,
            category: InsightCategory::Excess,
            nutrient: Some(nutrient.name.clone()),
            message: format!("High {} intake", nutrient.name),
            details: Some(format!(
                "You're getting {}% of the daily value. While this is within safe limits, you may want to review your sources.",
                to_fixed(percent, 0)
            )),
        })
    } else {
        None
    }
}

fn redundancy_insight(nutrient: &AggregatedNutrient) -> Option<Insight> {
    if nutrient.sources.len() < REDUNDANT_SOURCE_COUNT {
        return None;
    }
    let products = nutrient
        .sources
        .iter()
        .map(|source| source.product_name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    Some(Insight {
        insight_type: InsightType::Info,
        category: InsightCategory::Redundancy,
        nutrient: Some(nutrient.name.clone()),
        message: format!("{} from multiple sources", nutrient.name),
        details: Some(format!(
            "You're getting {} from {} different supplements: {}.",
            nutrient.name,
            nutrient.sources.len(),
            products
        )),
    })
}

fn deficiency_insight(key: &str, found: Option<&AggregatedNutrient>) -> Option<Insight> {
    let (message, details) = match found {
        None => (
            format!("No {} in your regimen", key),
            format!(
                "Consider whether you need {} supplementation based on your diet and health needs.",
                key
            ),
        ),
        Some(nutrient) => match nutrient.rdi_percent {
            Some(percent) if percent < LOW_INTAKE_PERCENT => (
                format!("Low {} intake", key),
                format!("You're only getting {}% of the daily value for {}.", to_fixed(percent, 0), key),
            ),
            _ => return None,
        },
    };
    Some(Insight {
        insight_type: InsightType::Info,
        category: InsightCategory::Deficiency,
        nutrient: Some(key.to_string()),
        message,
        details: Some(details),
    })
}

fn coverage_insight(nutrients: &[AggregatedNutrient]) -> Option<Insight> {
    let well_covered: Vec<&AggregatedNutrient> = nutrients
        .iter()
        .filter(|n| n.rdi_percent.is_some_and(|p| WELL_COVERED_PERCENT.contains(&p)))
        .collect();
    if well_covered.len() < WELL_COVERED_MIN_COUNT {
        return None;
    }
    let examples = well_covered
        .iter()
        .take(3)
        .map(|n| n.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    Some(Insight {
        insight_type: InsightType::Success,
        category: InsightCategory::Good,
        nutrient: None,
        message: "Good nutrient coverage".to_string(),
        details: Some(format!(
            "You have adequate levels (50-150% DV) of {} nutrients including {}.",
            well_covered.len(),
            examples
        )),
    })
}

fn interaction_insight(rule: &InteractionRule) -> Insight {
    let [first, second] = rule.nutrients;
    Insight {
        insight_type: rule.kind.insight_type(),
        category: InsightCategory::Interaction,
        nutrient: Some(format!("{} + {}", first, second)),
        message: rule.kind.message(first, second),
        details: Some(rule.description.to_string()),
    }
}

/// Derives warnings, info and success findings from aggregated nutrients.
pub fn generate_insights(nutrients: &[AggregatedNutrient]) -> Vec<Insight> {
    let mut insights: Vec<Insight> = Vec::new();

    for nutrient in nutrients {
        insights.extend(excess_insight(nutrient));
        insights.extend(redundancy_insight(nutrient));
    }

    for key in KEY_NUTRIENTS {
        let found = nutrients.iter().find(|n| n.name == key);
        insights.extend(deficiency_insight(key, found));
    }

    insights.extend(coverage_insight(nutrients));

    let names: Vec<&str> = nutrients.iter().map(|n| n.name.as_str()).collect();
    insights.extend(check_interactions(names.as_slice()).into_iter().map(interaction_insight));

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrient_aggregator::NutrientSource;

    fn aggregated(name: &str, total: f64, unit: &str, percent: Option<f64>, products: &[&str]) -> AggregatedNutrient {
        let share = total / products.len().max(1) as f64;
        AggregatedNutrient {
            name: name.to_string(),
            total_amount: total,
            unit: unit.to_string(),
            rdi_amount: rdi_info(name).map(|rdi| rdi.amount),
            rdi_percent: percent,
            sources: products
                .iter()
                .map(|p| NutrientSource { product_name: p.to_string(), amount: share })
                .collect(),
        }
    }

    fn of_category(insights: &[Insight], category: InsightCategory) -> Vec<&Insight> {
        insights.iter().filter(|i| i.category == category).collect()
    }

    #[test]
    fn test_upper_limit_warning_takes_precedence_over_high_intake() {
        let calcium = aggregated("Calcium", 2600.0, "mg", Some(260.0), &["Cal-Mag"]);
        let insights = generate_insights(&[calcium]);
        let excess = of_category(&insights, InsightCategory::Excess);

        assert_eq!(excess.len(), 1);
        assert_eq!(excess[0].insight_type, InsightType::Warning);
        assert_eq!(excess[0].nutrient.as_deref(), Some("Calcium"));
        assert_eq!(excess[0].message, "Calcium exceeds upper intake level");
        assert_eq!(
            excess[0].details.as_deref(),
            Some("You're getting 2.6 g (260% DV). The tolerable upper limit is 2.5 g.")
        );
    }

    #[test]
    fn test_high_intake_info_below_upper_limit() {
        let vitamin_c = aggregated("Vitamin C", 500.0, "mg", Some(500.0 / 90.0 * 100.0), &["C-500"]);
        let insights = generate_insights(&[vitamin_c]);
        let excess = of_category(&insights, InsightCategory::Excess);

        assert_eq!(excess.len(), 1);
        assert_eq!(excess[0].insight_type, InsightType::Info);
        assert_eq!(excess[0].message, "High Vitamin C intake");
        assert!(excess[0].details.as_deref().unwrap().starts_with("You're getting 556% of the daily value."));
    }

    #[test]
    fn test_no_excess_without_percent() {
        let vitamin_k = aggregated("Vitamin K", 90_000.0, "IU", None, &["K2"]);
        let insights = generate_insights(&[vitamin_k]);
        assert!(of_category(&insights, InsightCategory::Excess).is_empty());
    }

    #[test]
    fn test_redundancy_lists_products_in_source_order() {
        let zinc = aggregated("Zinc", 30.0, "mg", Some(30.0 / 11.0 * 100.0), &["Multi", "Zinc Tab", "Immune"]);
        let insights = generate_insights(&[zinc]);
        let redundancy = of_category(&insights, InsightCategory::Redundancy);

        assert_eq!(redundancy.len(), 1);
        assert_eq!(redundancy[0].message, "Zinc from multiple sources");
        assert_eq!(
            redundancy[0].details.as_deref(),
            Some("You're getting Zinc from 3 different supplements: Multi, Zinc Tab, Immune.")
        );
    }

    #[test]
    fn test_missing_key_nutrients_reported_in_watch_list_order() {
        let insights = generate_insights(&[]);
        let deficiency = of_category(&insights, InsightCategory::Deficiency);

        let names: Vec<_> = deficiency.iter().map(|i| i.nutrient.as_deref().unwrap()).collect();
        assert_eq!(names, KEY_NUTRIENTS.to_vec());
        let iron = deficiency.iter().find(|i| i.nutrient.as_deref() == Some("Iron")).unwrap();
        assert!(iron.message.contains("No Iron in your regimen"));
        assert_eq!(iron.insight_type, InsightType::Info);
    }

    #[test]
    fn test_low_key_nutrient() {
        let nutrients = vec![
            aggregated("Vitamin D", 2.0, "mcg", Some(10.0), &["Multi"]),
            aggregated("Vitamin B12", 2.4, "mcg", Some(100.0), &["Multi"]),
            // Present without a percentage: neither missing nor measurably low.
            aggregated("Omega-3", 2.0, "capsule", None, &["Fish Oil"]),
        ];
        let insights = generate_insights(&nutrients);
        let deficiency = of_category(&insights, InsightCategory::Deficiency);

        let vitamin_d = deficiency[0];
        assert_eq!(vitamin_d.message, "Low Vitamin D intake");
        assert_eq!(
            vitamin_d.details.as_deref(),
            Some("You're only getting 10% of the daily value for Vitamin D.")
        );
        let reported: Vec<_> = deficiency.iter().map(|i| i.nutrient.as_deref().unwrap()).collect();
        assert_eq!(reported, vec!["Vitamin D", "Iron", "Calcium", "Magnesium"]);
    }

    #[test]
    fn test_percent_in_details_rounds_half_up() {
        let vitamin_d = aggregated("Vitamin D", 2.5, "mcg", Some(12.5), &["Multi"]);
        let insights = generate_insights(&[vitamin_d]);
        let low = of_category(&insights, InsightCategory::Deficiency)[0];
        assert_eq!(
            low.details.as_deref(),
            Some("You're only getting 13% of the daily value for Vitamin D.")
        );
    }

    #[test]
    fn test_good_coverage_needs_five_nutrients() {
        let names = ["Vitamin A", "Vitamin C", "Vitamin E", "Zinc", "Selenium"];
        let nutrients: Vec<_> = names
            .iter()
            .map(|name| aggregated(name, 1.0, "mg", Some(100.0), &["Multi"]))
            .collect();

        let insights = generate_insights(&nutrients);
        let good = of_category(&insights, InsightCategory::Good);
        assert_eq!(good.len(), 1);
        assert_eq!(good[0].insight_type, InsightType::Success);
        assert_eq!(good[0].nutrient, None);
        assert_eq!(
            good[0].details.as_deref(),
            Some("You have adequate levels (50-150% DV) of 5 nutrients including Vitamin A, Vitamin C, Vitamin E.")
        );

        let insights = generate_insights(&nutrients[..4]);
        assert!(of_category(&insights, InsightCategory::Good).is_empty());
    }

    #[test]
    fn test_interaction_insights() {
        let nutrients = vec![
            aggregated("Iron", 18.0, "mg", Some(100.0), &["Iron"]),
            aggregated("Vitamin C", 90.0, "mg", Some(100.0), &["C"]),
            aggregated("Calcium", 500.0, "mg", Some(50.0), &["Cal"]),
        ];
        let insights = generate_insights(&nutrients);
        let interactions = of_category(&insights, InsightCategory::Interaction);

        assert_eq!(interactions.len(), 2);
        assert_eq!(interactions[0].insight_type, InsightType::Warning);
        assert_eq!(interactions[0].nutrient.as_deref(), Some("Calcium + Iron"));
        assert_eq!(interactions[0].message, "Calcium and Iron may interact");
        assert_eq!(interactions[1].insight_type, InsightType::Info);
        assert_eq!(interactions[1].message, "Vitamin C enhances Iron");
    }

    #[test]
    fn test_rule_order() {
        let nutrients = vec![
            aggregated("Iron", 60.0, "mg", Some(60.0 / 18.0 * 100.0), &["A", "B", "C"]),
            aggregated("Vitamin C", 90.0, "mg", Some(100.0), &["C"]),
        ];
        let categories: Vec<_> = generate_insights(&nutrients).iter().map(|i| i.category).collect();
        assert_eq!(
            categories,
            vec![
                InsightCategory::Excess,
                InsightCategory::Redundancy,
                InsightCategory::Deficiency,
                InsightCategory::Deficiency,
                InsightCategory::Deficiency,
                InsightCategory::Deficiency,
                InsightCategory::Deficiency,
                InsightCategory::Interaction,
            ]
        );
    }

    #[test]
    fn test_insight_serialization() {
        let insights = generate_insights(&[]);
        let value = serde_json::to_value(&insights[0]).unwrap();
        assert_eq!(value["type"], "info");
        assert_eq!(value["category"], "deficiency");
        assert_eq!(value["nutrient"], "Vitamin D");
    }
}
