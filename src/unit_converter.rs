use serde::Serialize;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ConvertedAmount {
    pub amount: f64,
    pub unit: String,
}

/// Multipliers keyed as (target unit, source unit).
const MASS_CONVERSIONS: &[(&str, &str, f64)] = &[
    ("mcg", "mcg", 1.0),
    ("mcg", "mg", 1000.0),
    ("mcg", "g", 1_000_000.0),
    ("mg", "mg", 1.0),
    ("mg", "g", 1000.0),
    ("mg", "mcg", 0.001),
    ("g", "g", 1.0),
    ("g", "mg", 0.001),
    ("g", "mcg", 0.000001),
];

/// IU factors exist only for these vitamins, each with a single mass target.
const IU_CONVERSIONS: &[(&str, f64, &str)] = &[
    ("Vitamin A", 0.3, "mcg"),   // 1 IU = 0.3 mcg retinol
    ("Vitamin D", 0.025, "mcg"), // 1 IU = 0.025 mcg cholecalciferol
    ("Vitamin E", 0.67, "mg"),   // 1 IU = 0.67 mg d-alpha-tocopherol
];

fn normalize_unit(unit: &str) -> String {
    unit.to_lowercase().replace("µg", "mcg").replace("μg", "mcg")
}

fn iu_conversion(nutrient_name: &str) -> Option<(f64, &'static str)> {
    IU_CONVERSIONS
        .iter()
        .find(|(name, _, _)| *name == nutrient_name)
        .map(|(_, factor, unit)| (*factor, *unit))
}

fn mass_factor(to_unit: &str, from_unit: &str) -> Option<f64> {
    MASS_CONVERSIONS
        .iter()
        .find(|(to, from, _)| *to == to_unit && *from == from_unit)
        .map(|(_, _, factor)| *factor)
}

/// Converts `amount` from `from_unit` into `to_unit`.
///
/// IU amounts for vitamins with a known factor always land in that vitamin's
/// mass unit, whatever `to_unit` asks for. When no conversion is known the
/// input amount and unit come back untouched; callers detect that by
/// comparing the returned unit with the one they asked for.
pub fn convert_unit(
    amount: f64,
    from_unit: &str,
    to_unit: &str,
    nutrient_name: Option<&str>,
) -> ConvertedAmount {
    let from = normalize_unit(from_unit);
    let to = normalize_unit(to_unit);

    if from == "iu" {
        if let Some((factor, unit)) = nutrient_name.and_then(iu_conversion) {
            return ConvertedAmount {
                amount: amount * factor,
                unit: unit.to_string(),
            };
        }
    }

    if from == to {
        return ConvertedAmount {
            amount,
            unit: to_unit.to_string(),
        };
    }

    if let Some(factor) = mass_factor(&to, &from) {
        return ConvertedAmount {
            amount: amount * factor,
            unit: to_unit.to_string(),
        };
    }

    ConvertedAmount {
        amount,
        unit: from_unit.to_string(),
    }
}
