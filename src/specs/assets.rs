// src/specs/assets.rs
//! Scraping *spec* for the assets-by-market-cap table.
//!
//! Row shape (per `<tr>`): `rank | name | market cap | price | ...`
//! - name: 2nd cell; anchor text when the cell has an `<a>`, else the whole cell.
//! - cap:  3rd cell, e.g. `$21.857 T`.
//!
//! Header rows (`<th>` cells) never match because both cells must be `<td>`.

use crate::config::consts::{BITCOIN_NEEDLE, GOLD_NEEDLE};
use crate::core::html::{Doc, Element};

const NAME_COL: usize = 1;
const CAP_COL: usize = 2;

/// Raw cap strings as they appear on the page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CapTexts {
    pub gold: Option<String>,
    pub bitcoin: Option<String>,
}

impl CapTexts {
    pub fn is_complete(&self) -> bool {
        self.gold.is_some() && self.bitcoin.is_some()
    }
}

/// Whether the document has any table at all (structural sanity check).
pub fn has_table(doc: &str) -> bool {
    let d = Doc::new(doc);
    d.find_open("table", 0..d.len()).is_some()
}

/// Scan table rows in document order; the first row whose name contains "gold" and
/// has a cap wins gold, likewise "bitcoin". Stops once both are found.
pub fn extract(doc: &str) -> CapTexts {
    let d = Doc::new(doc);
    let mut out = CapTexts::default();

    let mut from = 0;
    while let Some(row) = d.next_element("tr", from..d.len(), &["/table", "/tbody", "/thead"]) {
        from = row.outer.end.max(row.inner.start);

        let Some((name, cap)) = read_row(&d, &row) else { continue };

        if out.gold.is_none() && name.contains(GOLD_NEEDLE) {
            logd!("Extract: gold row '{}' → {:?}", name, cap);
            out.gold = cap.clone();
        }
        if out.bitcoin.is_none() && name.contains(BITCOIN_NEEDLE) {
            logd!("Extract: bitcoin row '{}' → {:?}", name, cap);
            out.bitcoin = cap;
        }
        if out.is_complete() {
            break;
        }
    }
    out
}

/// (lowercased name, cap text) for one row. `None` when the row has no name cell.
/// A matching name with an empty cap cell leaves the slot open for a later row.
fn read_row(d: &Doc, row: &Element) -> Option<(String, Option<String>)> {
    let cells = d.cells(row);
    let name_cell = cells.get(NAME_COL).filter(|c| c.name == "td")?;

    let name_range = d
        .next_element("a", name_cell.inner.clone(), &[])
        .map(|a| a.inner)
        .unwrap_or_else(|| name_cell.inner.clone());
    let name = d.text(&name_range).to_lowercase();
    if name.is_empty() {
        return None;
    }

    let cap = cells
        .get(CAP_COL)
        .filter(|c| c.name == "td")
        .map(|c| d.text(&c.inner))
        .filter(|t| !t.is_empty());

    Some((name, cap))
}
