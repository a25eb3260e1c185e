/// Formats an amount for display with the given currency symbol.
///
/// Whole amounts (and zero) have no decimals; anything else is shown with
/// two. The integer part is grouped by thousands with `,`. Non-finite values
/// render as zero.
pub fn format_currency(
    value: f64,
    symbol: &str,
) -> String {
    if !value.is_finite() {
        return format!("{symbol}0");
    }

    let magnitude = value.abs();
    let digits = if magnitude == magnitude.round() {
        format!("{magnitude:.0}")
    } else {
        format!("{magnitude:.2}")
    };
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let sign = if value < 0.0 { "-" } else { "" };
    let grouped = group_thousands(integer);
    match fraction {
        Some(fraction) => format!("{sign}{symbol}{grouped}.{fraction}"),
        None => format!("{sign}{symbol}{grouped}"),
    }
}

/// Inserts `,` between groups of three digits.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
