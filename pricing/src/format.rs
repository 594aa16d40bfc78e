/// Renders a dollar amount with thousands separators and exactly two decimals.
///
/// ```
/// assert_eq!(pricing::format_usd(83_421.0), "$83,421.00");
/// assert_eq!(pricing::format_usd(-1_234.5), "-$1,234.50");
/// ```
pub fn format_usd(value: f64) -> String {
    if value.is_nan() {
        return "$NaN".into();
    }

    let magnitude = if value.is_infinite() {
        "inf".to_string()
    } else {
        let fixed = format!("{:.2}", value.abs());
        let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        format!("{}.{frac}", group_thousands(int))
    };

    // -0.001 rounds to 0.00, which shouldn't carry a sign.
    let negative = value < 0. && magnitude != "0.00";
    let sign = if negative { "-" } else { "" };

    format!("{sign}${magnitude}")
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}
