//! Display formatting for pt-BR style numbers. Only used when printing;
//! stored and exported values stay plain `f64`.

use crate::catalog::constants::CURRENCY_SYMBOL;

/// Format `value` with `decimals` places, `.` grouping thousands and `,`
/// as the decimal separator: `1234.5` -> `"1.234,50"`.
pub fn format_number_br(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    // no sign for values that round to zero
    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match frac_part {
        Some(frac) => format!("{}{},{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Currency display: `format_currency(1234.5, "R$")` -> `"R$ 1.234,50"`.
pub fn format_currency(value: f64, symbol: &str) -> String {
    format!("{} {}", symbol, format_number_br(value, 2))
}

/// Reais: `format_brl(1234.56)` -> `"R$ 1.234,56"`.
pub fn format_brl(value: f64) -> String {
    format_currency(value, CURRENCY_SYMBOL)
}

/// Quantity display: whole numbers without decimals, otherwise up to
/// three places with trailing zeros trimmed.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        return format_number_br(value, 0);
    }
    let text = format_number_br(value, 3);
    text.trim_end_matches('0').trim_end_matches(',').to_string()
}
