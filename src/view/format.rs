//! Money formatting for the table and console summary.
//!
//! Negative amounts keep the sign after the dollar (`$-3.46`); negative zero
//! prints as `$0.00`.

/// `$` plus two decimals, as shown in table cells.
pub fn currency(value: f64) -> String {
    format!("${:.2}", value + 0.0)
}

/// Like [`currency`] but with thousands separators (`$1,234.56`).
pub fn currency_grouped(value: f64) -> String {
    let fixed = format!("{:.2}", value + 0.0);
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (whole, cents) = digits.split_once('.').unwrap_or((digits, "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("${sign}{grouped}.{cents}")
}
