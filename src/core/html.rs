// src/core/html.rs
// Low-level HTML scanning over raw strings.
// No DOM and no nesting awareness beyond "next open / next close".
// Tag names match case-insensitively; offsets always index the original string.

use std::ops::Range;

use super::sanitize::{normalize_entities, normalize_ws};

/// Elements whose bodies are raw text, never markup.
const RAW_TEXT: [&str; 3] = ["script", "style", "template"];

/// A document plus its ASCII-lowercased twin.
/// ASCII lowercasing keeps byte offsets identical, so positions found in `lc`
/// slice `src` directly. Comments and raw-text bodies are blanked in `lc`,
/// so nothing inside them is ever found as a tag.
pub struct Doc<'a> {
    src: &'a str,
    lc: String,
}

/// One element located in a `Doc`.
/// `outer` spans `<tag ...>` through the closing tag (or the implied end);
/// `inner` is everything between the opener's `>` and the close.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub name: &'static str,
    pub outer: Range<usize>,
    pub inner: Range<usize>,
}

impl<'a> Doc<'a> {
    pub fn new(src: &'a str) -> Self {
        let mut bytes = src.to_ascii_lowercase().into_bytes();
        mask_hidden(&mut bytes);
        // blanked ranges start and end on ASCII bytes, so this stays valid UTF-8
        let lc = String::from_utf8(bytes).unwrap_or_else(|_| src.to_ascii_lowercase());
        Self { src, lc }
    }

    pub fn src(&self) -> &'a str {
        self.src
    }

    pub fn len(&self) -> usize {
        self.src.len()
    }

    pub fn is_empty(&self) -> bool {
        self.src.is_empty()
    }

    pub fn slice(&self, r: &Range<usize>) -> &'a str {
        &self.src[r.clone()]
    }

    /// Position of the next `<tag` opener in `range` whose name ends right after `tag`
    /// (so `<th` does not match `<thead`).
    pub fn find_open(&self, tag: &str, range: Range<usize>) -> Option<usize> {
        let hay = self.lc.get(range.clone())?;
        let pat = format!("<{tag}");
        let mut from = 0;
        while let Some(rel) = hay[from..].find(&pat) {
            let at = from + rel;
            let after = hay.as_bytes().get(at + pat.len()).copied();
            match after {
                Some(b'>' | b'/' | b' ' | b'\t' | b'\r' | b'\n') => return Some(range.start + at),
                // `<tr` at the very end of the range: not a usable tag
                None => return None,
                _ => from = at + pat.len(),
            }
        }
        None
    }

    /// Position of the next `</tag` in `range`.
    pub fn find_close(&self, tag: &str, range: Range<usize>) -> Option<usize> {
        let hay = self.lc.get(range.clone())?;
        hay.find(&format!("</{tag}")).map(|rel| range.start + rel)
    }

    /// Next element named `tag` starting inside `range`.
    /// The element ends at its closing tag, or at `stop_at` openers / the range end
    /// when the closing tag is omitted.
    pub fn next_element(
        &self,
        tag: &'static str,
        range: Range<usize>,
        stop_at: &[&str],
    ) -> Option<Element> {
        let start = self.find_open(tag, range.clone())?;
        let open_end = self.src[start..range.end].find('>')? + start + 1;

        // implied end: the next sibling opener, or the end of the enclosing range
        let mut implied = range.end;
        for s in stop_at.iter().copied().chain([tag]) {
            if let Some(p) = self.find_open(s, open_end..range.end) {
                implied = implied.min(p);
            }
        }

        match self.find_close(tag, open_end..implied) {
            Some(close) => {
                let close_end = self.src[close..range.end]
                    .find('>')
                    .map(|e| close + e + 1)
                    .unwrap_or(range.end);
                Some(Element { name: tag, outer: start..close_end, inner: open_end..close })
            }
            None => Some(Element { name: tag, outer: start..implied, inner: open_end..implied }),
        }
    }

    /// All `tag` elements in `range`, in document order.
    pub fn elements(&self, tag: &'static str, range: Range<usize>, stop_at: &[&str]) -> Vec<Element> {
        let mut out = Vec::new();
        let mut from = range.start;
        while let Some(el) = self.next_element(tag, from..range.end, stop_at) {
            from = el.outer.end.max(el.inner.start);
            out.push(el);
        }
        out
    }

    /// Direct cells of a row (`td` and `th`), in order.
    pub fn cells(&self, row: &Element) -> Vec<Element> {
        let mut out = Vec::new();
        let mut from = row.inner.start;
        loop {
            let range = from..row.inner.end;
            let td = self.find_open("td", range.clone());
            let th = self.find_open("th", range.clone());
            let tag = match (td, th) {
                (Some(a), Some(b)) if b < a => "th",
                (Some(_), _) => "td",
                (None, Some(_)) => "th",
                (None, None) => break,
            };
            let Some(cell) = self.next_element(tag, range, &["td", "th"]) else { break };
            from = cell.outer.end.max(cell.inner.start);
            out.push(cell);
        }
        out
    }

    /// Visible text of a range: tags dropped, entities decoded, whitespace collapsed.
    pub fn text(&self, r: &Range<usize>) -> String {
        text_of(self.slice(r))
    }
}

/// Overwrite `<!-- ... -->` (whole) and the bodies of raw-text elements with spaces.
/// An unterminated comment or body runs to the end of the document.
fn mask_hidden(lc: &mut [u8]) {
    let mut i = 0;
    while i < lc.len() {
        if lc[i] != b'<' {
            i += 1;
            continue;
        }
        if lc[i..].starts_with(b"<!--") {
            let end = find_bytes(lc, i + 4, b"-->").map_or(lc.len(), |p| p + 3);
            lc[i..end].fill(b' ');
            i = end;
            continue;
        }
        if let Some(tag) = RAW_TEXT.iter().find(|t| opens_tag(&lc[i..], t)) {
            let body = find_bytes(lc, i, b">").map_or(lc.len(), |p| p + 1);
            let close = find_bytes(lc, body, format!("</{tag}").as_bytes()).unwrap_or(lc.len());
            lc[body..close].fill(b' ');
            i = close.max(i + 1);
            continue;
        }
        i += 1;
    }
}

/// `at` starts with `<tag` followed by a tag-name boundary.
fn opens_tag(at: &[u8], tag: &str) -> bool {
    at.get(1..=tag.len()) == Some(tag.as_bytes())
        && matches!(at.get(tag.len() + 1), Some(b'>' | b'/' | b' ' | b'\t' | b'\r' | b'\n'))
}

fn find_bytes(hay: &[u8], from: usize, pat: &[u8]) -> Option<usize> {
    hay.get(from..)?
        .windows(pat.len())
        .position(|w| w == pat)
        .map(|p| p + from)
}

/// Remove all `<...>` tags, keeping the text between them.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

pub fn text_of(fragment: &str) -> String {
    normalize_ws(&normalize_entities(&strip_tags(fragment)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_open_respects_tag_boundary() {
        let d = Doc::new("<thead><TH class=x>A</th></thead>");
        assert_eq!(d.find_open("th", 0..d.len()), Some(7));
    }

    #[test]
    fn next_element_handles_missing_close() {
        let html = "<tr><td>a<td>b</tr>";
        let d = Doc::new(html);
        let row = d.next_element("tr", 0..d.len(), &[]).unwrap();
        let cells = d.cells(&row);
        let texts: Vec<String> = cells.iter().map(|c| d.text(&c.inner)).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn rows_split_without_closing_tags() {
        let html = "<table><tr><td>1<tr><td>2</table>";
        let d = Doc::new(html);
        let rows = d.elements("tr", 0..d.len(), &["/table"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(d.text(&rows[1].inner), "2");
    }

    #[test]
    fn comments_and_scripts_hide_their_tags() {
        let html = "<!-- <tr><td>x</td></tr> --><script>'<tr>'</script><table><tr><td>1</td></tr></table>";
        let d = Doc::new(html);
        let rows = d.elements("tr", 0..d.len(), &["/table"]);
        assert_eq!(rows.len(), 1);
        assert_eq!(&html[rows[0].outer.start..rows[0].outer.start + 3], "<tr");
        assert!(rows[0].outer.start > html.find("<table").unwrap());
    }

    #[test]
    fn unterminated_comment_hides_the_rest() {
        let d = Doc::new("<table><!-- <tr><td>1</td></tr>");
        assert_eq!(d.find_open("tr", 0..d.len()), None);
        assert_eq!(d.find_open("table", 0..d.len()), Some(0));
    }

    #[test]
    fn text_decodes_and_collapses() {
        assert_eq!(text_of("<b>Gold</b>&nbsp;&amp;\n  Silver"), "Gold & Silver");
    }
}
