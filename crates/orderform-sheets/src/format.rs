//! Value-rendering primitives for sheet cells

use orderform_domain::TermDate;

/// Sentinel written in place of absent data
pub const NA: &str = "NA";

/// `$` plus two decimals, or `"NA"` when absent
pub fn money(value: Option<f64>) -> String {
    match value {
        Some(amount) => format!("${:.2}", amount),
        None => NA.to_string(),
    }
}

/// `MM/DD/YYYY`, or `""` when absent or not a calendar date
pub fn date(value: Option<&TermDate>) -> String {
    value
        .and_then(TermDate::as_date)
        .map(|d| d.format("%m/%d/%Y").to_string())
        .unwrap_or_default()
}

/// Prefix with `'` so the sheet keeps it as text (leading zeros survive)
pub fn routing_text(value: Option<&str>) -> String {
    match value {
        Some(number) => format!("'{}", number),
        None => NA.to_string(),
    }
}

/// The value, or `default` when absent
pub fn or_else<T>(value: Option<T>, default: T) -> T {
    value.unwrap_or(default)
}

/// Capitalize the first letter of every word and lowercase the rest
///
/// A word is a run of letters; digits and punctuation end it, so
/// `"6 MONTHS"` becomes `"6 Months"` and `"12months"` becomes `"12Months"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}
