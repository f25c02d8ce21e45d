//! Number formatting shared by fit labels, tick labels and reports.
//!
//! Plot labels use C-style `%g` formatting so that coefficients print the
//! way analysis notebooks print them (`0.0015`, `1.2e+02`, `3`).

/// Format `v` like C's `%.{precision}g`.
pub fn fmt_g(v: f64, precision: usize) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let p = precision.max(1);

    // Round to `p` significant digits first; the exponent after rounding
    // decides between fixed and scientific notation.
    let sci = format!("{:.*e}", p - 1, v);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= p as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.abs())
    } else {
        let decimals = (p as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{v:.decimals$}"))
    }
}

/// Format a `(min, max)` pair for headers and reports.
pub fn fmt_range(range: (f64, f64)) -> String {
    format!("[{}, {}]", fmt_g(range.0, 6), fmt_g(range.1, 6))
}

fn trim_fraction(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}
