//! Day-of-week schedules stored as comma-separated day numbers, 0 = Sunday.

use chrono::{Datelike, NaiveDate};

pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
pub const FULL_DAY_NAMES: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

pub const ALL_DAYS: &str = "0,1,2,3,4,5,6";
pub const WEEKDAYS: &str = "1,2,3,4,5";
pub const WEEKENDS: &str = "0,6";

/// Leading integer of `part`, ignoring whatever follows it: "1a" is 1, "a1" is nothing.
fn leading_int(part: &str) -> Option<i64> {
    let trimmed = part.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    rest[..digits_end].parse::<i64>().ok().map(|n| sign * n)
}

/// Parses a schedule string. Blank input means every day. Each entry is read
/// up to its first non-digit; entries that yield no day number 0-6 are dropped.
pub fn parse_schedule_days(csv: &str) -> Vec<u8> {
    if csv.trim().is_empty() {
        return (0..=6).collect();
    }
    let mut days: Vec<u8> = csv
        .split(',')
        .filter_map(leading_int)
        .filter(|day| (0..=6).contains(day))
        .map(|day| day as u8)
        .collect();
    days.sort_unstable();
    days
}

pub fn format_schedule_days(days: &[u8]) -> String {
    let mut valid: Vec<u8> = days.iter().copied().filter(|d| *d <= 6).collect();
    valid.sort_unstable();
    valid
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Strict form accepted when a schedule is written: `^[0-6](,[0-6])*$`.
pub fn is_valid_schedule(csv: &str) -> bool {
    !csv.is_empty()
        && csv
            .split(',')
            .all(|part| part.len() == 1 && matches!(part.as_bytes()[0], b'0'..=b'6'))
}

pub fn is_scheduled_for_day(schedule_days: &str, day: u8) -> bool {
    parse_schedule_days(schedule_days).contains(&day)
}

pub fn schedule_label(schedule_days: &str) -> String {
    let days = parse_schedule_days(schedule_days);

    match days.len() {
        7 => return "Every day".to_string(),
        0 => return "Never".to_string(),
        _ => {}
    }

    let is_weekdays = days.len() == 5 && (1..=5).all(|d| days.contains(&d));
    if is_weekdays {
        return "Weekdays".to_string();
    }

    let is_weekends = days.len() == 2 && days.contains(&0) && days.contains(&6);
    if is_weekends {
        return "Weekends".to_string();
    }

    if days.len() <= 3 {
        return days
            .iter()
            .map(|&d| DAY_NAMES[d as usize])
            .collect::<Vec<_>>()
            .join(", ");
    }

    format!("{} days/week", days.len())
}

pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schedule_days() {
        assert_eq!(parse_schedule_days(""), vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(parse_schedule_days("  "), vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(parse_schedule_days("5, 1,3"), vec![1, 3, 5]);
        assert_eq!(parse_schedule_days("7,x,-1,2"), vec![2]);
    }

    #[test]
    fn test_parse_schedule_days_reads_leading_digits() {
        assert_eq!(parse_schedule_days("1a,3"), vec![1, 3]);
        assert_eq!(parse_schedule_days("2.5, 4 days"), vec![2, 4]);
        assert_eq!(parse_schedule_days("a1,+6"), vec![6]);
        assert_eq!(parse_schedule_days("12,0"), vec![0]);
    }

    #[test]
    fn test_format_schedule_days() {
        assert_eq!(format_schedule_days(&[6, 0, 9, 3]), "0,3,6");
        assert_eq!(format_schedule_days(&[]), "");
    }

    #[test]
    fn test_is_valid_schedule() {
        assert!(is_valid_schedule(ALL_DAYS));
        assert!(is_valid_schedule("3"));
        assert!(!is_valid_schedule(""));
        assert!(!is_valid_schedule("1,,2"));
        assert!(!is_valid_schedule("1, 2"));
        assert!(!is_valid_schedule("7"));
    }

    #[test]
    fn test_schedule_labels() {
        assert_eq!(schedule_label(ALL_DAYS), "Every day");
        assert_eq!(schedule_label(""), "Every day");
        assert_eq!(schedule_label("9"), "Never");
        assert_eq!(schedule_label(WEEKDAYS), "Weekdays");
        assert_eq!(schedule_label("6,0"), "Weekends");
        assert_eq!(schedule_label("1,3,5"), "Mon, Wed, Fri");
        assert_eq!(schedule_label("0,1,2,3"), "4 days/week");
    }

    #[test]
    fn test_day_of_week_starts_on_sunday() {
        let sunday = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        let wednesday = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        assert_eq!(day_of_week(sunday), 0);
        assert_eq!(day_of_week(wednesday), 3);
        assert!(is_scheduled_for_day(WEEKDAYS, day_of_week(wednesday)));
        assert!(!is_scheduled_for_day(WEEKDAYS, day_of_week(sunday)));
    }
}
