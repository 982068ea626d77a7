//! Utility functions and helpers

/// Format the integer digits of a number with thousands separators
pub fn format_number<T: ToString>(n: T) -> String {
    let s = n.to_string();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    let grouped: String = result.chars().rev().collect();
    format!("{}{}", sign, grouped)
}

/// Format a monetary value the way the ledger shows it: shortest decimal
/// form, grouped integer part, symbol in front of the sign-less magnitude.
pub fn format_money(symbol: &str, value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let text = value.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text.clone(), None),
    };
    let grouped = if int_part.chars().all(|c| c.is_ascii_digit()) {
        format_number(&int_part)
    } else {
        int_part
    };
    match frac_part {
        Some(f) => format!("{}{}{}.{}", sign, symbol, grouped, f),
        None => format!("{}{}{}", sign, symbol, grouped),
    }
}

/// Escape text for safe inclusion in HTML bodies and quoted attributes
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
