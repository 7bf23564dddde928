// src/market/cap.rs
// "$21.857 T" -> 21_857_000_000_000.0

const TRILLION: f64 = 1e12;
const BILLION: f64 = 1e9;

/// Parse a market-cap cell into USD.
///
/// - `None` / empty / whitespace-only → `None`
/// - `$` and `,` removed, then trimmed
/// - trailing unit: `T` ×10¹², `B` ×10⁹, anything else ×1.
///   `M` is stripped but **not** scaled; see `m_suffix_is_not_scaled` in tests/cap_parse.rs.
/// - the numeral is read like a lenient float prefix; no numeral gives `Some(NaN)`.
///
/// Callers must pass the result through [`usable`] before doing math with it.
pub fn parse_cap(text: Option<&str>) -> Option<f64> {
    let text = text?;
    let clean: String = text.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    let clean = clean.trim();
    if clean.is_empty() {
        return None;
    }

    let multiplier = match clean.chars().last() {
        Some('T') => TRILLION,
        Some('B') => BILLION,
        _ => 1.0,
    };

    let numeral: String = clean.chars().filter(|c| !matches!(c, 'T' | 'B' | 'M')).collect();
    Some(leading_float(&numeral) * multiplier)
}

/// The guard: NaN, infinities and zero count as "no value".
pub fn usable(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite() && *x != 0.0)
}

/// Longest float prefix after leading whitespace, `NaN` if there is none.
/// `"21.857 "` → 21.857, `"1.5e3x"` → 1500, `"abc"` → NaN.
fn leading_float(s: &str) -> f64 {
    let s = s.trim_start();
    let b = s.as_bytes();
    let mut i = 0;

    if matches!(b.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while b.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    let mut digits = i - int_start;

    if b.get(i) == Some(&b'.') {
        let frac_start = i + 1;
        let mut j = frac_start;
        while b.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            i = j;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    // exponent only counts if it has digits
    if matches!(b.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while b.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    s[..i].parse().unwrap_or(f64::NAN)
}
