use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::Serialize;

use super::{cell_text, TD, TR};

static HEADING_OR_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2, h3, table").unwrap());

const NO_SECTION: &str = "Unknown";

#[derive(Debug, Serialize)]
pub struct Item {
    #[serde(rename = "itemType")]
    pub item_type: String,
    #[serde(rename = "itemName")]
    pub item_name: String,
    pub rarity: String,
    pub capacity: String,
    pub value: String,
    #[serde(rename = "howToGet")]
    pub how_to_get: String,
}

/// Extract item records from every table in the document. Each table is
/// labelled with the nearest preceding h2/h3 text, tracked in a single
/// document-order pass.
pub fn extract(html: &str) -> Vec<Item> {
    let doc = Html::parse_document(html);
    let mut items = Vec::new();
    let mut section = NO_SECTION.to_string();

    for el in doc.select(&HEADING_OR_TABLE) {
        if el.value().name() != "table" {
            let text = cell_text(el);
            section = if text.is_empty() { NO_SECTION.to_string() } else { text };
            continue;
        }

        // First row is the column header.
        for row in el.select(&TR).skip(1) {
            let cols: Vec<_> = row.select(&TD).collect();
            if cols.len() < 6 {
                continue;
            }
            items.push(Item {
                item_type: section.clone(),
                item_name: cell_text(cols[1]),
                rarity: cell_text(cols[2]),
                capacity: cell_text(cols[3]).replace('x', "").trim().to_string(),
                value: cell_text(cols[4]),
                how_to_get: cell_text(cols[5]),
            });
        }
    }

    items
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> String {
        let tds: String = cells.iter().map(|c| format!("<td>{}</td>", c)).collect();
        format!("<tr>{}</tr>", tds)
    }

    fn table(rows: &[String]) -> String {
        format!("<table><tr><td>header</td></tr>{}</table>", rows.concat())
    }

    #[test]
    fn labels_from_nearest_heading() {
        let html = format!(
            "<h2>Consumable Items</h2>{}<h3>Ammo</h3>{}",
            table(&[row(&["1", "Potion", "1", "x10", "7z", "Combine Herb"])]),
            table(&[row(&["1", "Normal S Lv1", "1", "x99", "1z", "Shop"])]),
        );
        let items = extract(&html);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].item_type, "Consumable Items");
        assert_eq!(items[0].item_name, "Potion");
        assert_eq!(items[1].item_type, "Ammo");
    }

    #[test]
    fn table_without_heading_gets_placeholder() {
        let html = table(&[row(&["1", "Potion", "1", "x10", "7z", "Combine"])]);
        let items = extract(&html);
        assert_eq!(items[0].item_type, "Unknown");
    }

    #[test]
    fn short_rows_are_dropped() {
        let html = table(&[
            row(&["1", "Potion", "1"]),
            row(&["1", "Mega Potion", "2", "x10", "16z", "Combine"]),
        ]);
        let items = extract(&html);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item_name, "Mega Potion");
    }

    #[test]
    fn capacity_x_stripped() {
        let html = table(&[row(&["1", "Potion", "1", " x10 ", "7z", "Combine"])]);
        assert_eq!(extract(&html)[0].capacity, "10");
    }

    #[test]
    fn how_to_get_whitespace_collapsed() {
        let html = table(&[row(&["1", "Potion", "1", "x10", "7z", "a   b\n c"])]);
        assert_eq!(extract(&html)[0].how_to_get, "a b c");
    }

    #[test]
    fn no_tables_yields_empty() {
        assert!(extract("<h2>Nothing here</h2><p>text</p>").is_empty());
    }

    #[test]
    fn items_fixture() {
        let html = std::fs::read_to_string("tests/fixtures/items.html").unwrap();
        let items = extract(&html);
        assert_eq!(items.len(), 5);
        assert!(items.iter().any(|i| i.item_name == "Potion"));
        let types: Vec<&str> = items.iter().map(|i| i.item_type.as_str()).collect();
        assert!(types.contains(&"Consumable Items"));
        assert!(types.contains(&"Tools"));
    }
}
