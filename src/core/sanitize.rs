// src/core/sanitize.rs

/// Decode the handful of entities that show up in table cells.
pub fn normalize_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&#36;", "$")
        .replace("&dollar;", "$")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_decode_amp_last() {
        assert_eq!(normalize_entities("&amp;nbsp;"), "&nbsp;");
        assert_eq!(normalize_entities("&#36;1.2&nbsp;T"), "$1.2 T");
    }

    #[test]
    fn ws_collapses_and_trims() {
        assert_eq!(normalize_ws("  $21.857 \n\t T "), "$21.857 T");
    }
}
