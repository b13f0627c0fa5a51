use crate::rdi_table::{normalize_nutrient_name, rdi_info, RdiEntry};
use crate::unit_converter::{convert_unit, ConvertedAmount};

/// Converts an amount into the unit of the nutrient's RDI entry.
/// Returns `None` when the nutrient has no entry or the units cannot be reconciled.
fn to_rdi_unit(name: &str, amount: f64, unit: &str) -> Option<(RdiEntry, ConvertedAmount)> {
    let rdi = rdi_info(name)?;
    let canonical = normalize_nutrient_name(name);
    let converted = convert_unit(amount, unit, rdi.unit, Some(&canonical));
    if converted.unit.to_lowercase() != rdi.unit.to_lowercase() {
        return None;
    }
    Some((rdi, converted))
}

/// Percent of the daily value that `amount` represents. Not clamped: high-dose
/// supplements routinely exceed 100 and can exceed 1000.
pub fn rdi_percent(name: &str, amount: f64, unit: &str) -> Option<f64> {
    to_rdi_unit(name, amount, unit).map(|(rdi, converted)| (converted.amount / rdi.amount) * 100.0)
}

/// True when the converted amount strictly exceeds the tolerable upper limit.
/// Nutrients without a limit, or whose units cannot be converted, never count as above it.
pub fn is_above_upper_limit(name: &str, amount: f64, unit: &str) -> bool {
    match to_rdi_unit(name, amount, unit) {
        Some((rdi, converted)) => rdi
            .upper_limit
            .is_some_and(|limit| converted.amount > limit),
        None => false,
    }
}
