//! Heuristics for the free-text durations vendors quote ("3 weeks", "24 months").
//!
//! These are not date parsers. They pick out the first integer in the text and, for
//! lead times scored against a day-based baseline, optionally scale it by the unit that
//! follows.

/// First run of ASCII digits anywhere in `text`.
///
/// Returns `None` for empty or digitless text and for values that overflow `u32`. The unit
/// is ignored, so "2 weeks" and "2 days" both yield 2.
pub fn parse_leading_integer(text: &str) -> Option<u32> {
    leading_digits(text).and_then(|(digits, _)| digits.parse().ok())
}

/// Lead time in days: the leading integer multiplied by the unit that follows it.
///
/// Ranges such as "2-3 weeks" use their lower bound. An unknown or missing unit keeps the
/// integer as a day count.
pub fn parse_duration_days(text: &str) -> Option<u32> {
    let (digits, end) = leading_digits(text)?;
    let value: u32 = digits.parse().ok()?;

    let rest = text[end..]
        .trim_start_matches(|c: char| c.is_ascii_digit() || c.is_whitespace() || is_range(c))
        .trim_start_matches("to ")
        .trim_start_matches(|c: char| c.is_ascii_digit() || c.is_whitespace())
        .to_ascii_lowercase();

    value.checked_mul(unit_multiplier(&rest))
}

fn leading_digits(text: &str) -> Option<(&str, usize)> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let end = text[start..]
        .find(|c: char| !c.is_ascii_digit())
        .map(|offset| start + offset)
        .unwrap_or(text.len());
    Some((&text[start..end], end))
}

fn is_range(c: char) -> bool {
    matches!(c, '-' | '\u{2013}' | '\u{2014}')
}

fn unit_multiplier(rest: &str) -> u32 {
    let rest = rest
        .strip_prefix("business ")
        .or_else(|| rest.strip_prefix("working "))
        .unwrap_or(rest);
    let unit = rest
        .split(|c: char| !c.is_ascii_alphabetic())
        .next()
        .unwrap_or_default();

    match unit {
        "week" | "weeks" | "wk" | "wks" => 7,
        "month" | "months" | "mo" | "mos" => 30,
        "year" | "years" | "yr" | "yrs" => 365,
        _ => 1,
    }
}
