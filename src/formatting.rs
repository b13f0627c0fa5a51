use chrono::NaiveDate;

/// Fixed-point rendering with ties rounded away from zero, so 12.5 reads as
/// "13" and 2.25 as "2.3". Plain `{:.N}` would round those ties to even.
pub fn to_fixed(value: f64, digits: usize) -> String {
    let scale = 10f64.powi(digits as i32);
    let rounded = (value * scale).round() / scale;
    format!("{:.*}", digits, rounded)
}

/// Renders an amount for insight text, switching to a larger or smaller unit
/// when the value is awkward to read.
pub fn format_amount(amount: f64, unit: &str) -> String {
    if amount >= 1000.0 && unit == "mcg" {
        return format!("{} mg", to_fixed(amount / 1000.0, 1));
    }
    if amount >= 1000.0 && unit == "mg" {
        return format!("{} g", to_fixed(amount / 1000.0, 1));
    }
    if amount < 0.01 {
        let scaled_unit = if unit == "mg" { "mcg" } else { unit };
        return format!("{} {}", to_fixed(amount * 1000.0, 1), scaled_unit);
    }
    if amount < 1.0 {
        format!("{} {}", to_fixed(amount, 2), unit)
    } else {
        format!("{} {}", to_fixed(amount, 1), unit)
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
