use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use super::{cell_text, TD, TR};

static H4_OR_TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h4, table").unwrap());

#[derive(Debug, Serialize)]
pub struct Skill {
    pub skill_type: String,
    pub skill_point: String,
    pub points: String,
    pub skill_name: String,
    pub description: String,
}

/// Rowspan carry-over for the category column: the first cell of a row
/// starts a span covering `remaining` rows, itself included.
#[derive(Default)]
struct CategorySpan {
    name: String,
    remaining: u32,
}

impl CategorySpan {
    fn exhausted(&self) -> bool {
        self.remaining == 0
    }

    fn begin(&mut self, name: String, rows: u32) {
        self.name = name;
        self.remaining = rows;
    }

    fn consume(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

/// Extract skill records from every table following an h4 heading.
/// A heading with no following table is skipped; its label is simply
/// replaced by the next heading.
pub fn extract(html: &str) -> Vec<Skill> {
    let doc = Html::parse_document(html);
    let mut skills = Vec::new();
    let mut pending: Option<String> = None;

    for el in doc.select(&H4_OR_TABLE) {
        if el.value().name() == "h4" {
            pending = Some(cell_text(el).trim_end_matches(':').trim().to_string());
        } else if let Some(skill_type) = pending.take() {
            extract_table(el, &skill_type, &mut skills);
        }
    }

    skills
}

fn extract_table(table: ElementRef, skill_type: &str, out: &mut Vec<Skill>) {
    let mut span = CategorySpan::default();

    for row in table.select(&TR).skip(1) {
        let mut cells: Vec<_> = row.select(&TD).collect();
        if cells.is_empty() {
            continue;
        }

        if span.exhausted() {
            let head = cells.remove(0);
            let rows = head
                .value()
                .attr("rowspan")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(1);
            span.begin(cell_text(head), rows);
        }
        span.consume();

        if cells.len() < 3 {
            continue;
        }
        out.push(Skill {
            skill_type: skill_type.to_string(),
            skill_point: span.name.clone(),
            points: cell_text(cells[0]),
            skill_name: cell_text(cells[1]),
            description: cell_text(cells[2]),
        });
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "<tr><td>Skill</td><td>Points</td><td>Name</td><td>Effect</td></tr>";

    fn skill_table(body: &str) -> String {
        format!("<table>{}{}</table>", HEADER, body)
    }

    #[test]
    fn rowspan_category_carries_over() {
        let body = "<tr><td rowspan=\"3\">Attack</td><td>10</td><td>Attack Up (S)</td><td>Small boost</td></tr>\
                    <tr><td>15</td><td>Attack Up (M)</td><td>Medium boost</td></tr>\
                    <tr><td>20</td><td>Attack Up (L)</td><td>Large boost</td></tr>\
                    <tr><td rowspan=\"1\">Defense</td><td>10</td><td>Defense Up (S)</td><td>Small boost</td></tr>";
        let html = format!("<h4>Melee Skills:</h4>{}", skill_table(body));
        let skills = extract(&html);
        assert_eq!(skills.len(), 4);
        assert!(skills[..3].iter().all(|s| s.skill_point == "Attack"));
        assert_eq!(skills[3].skill_point, "Defense");
        assert_eq!(skills[1].skill_name, "Attack Up (M)");
        assert_eq!(skills[1].points, "15");
    }

    #[test]
    fn missing_rowspan_defaults_to_one() {
        let body = "<tr><td>Hearing</td><td>10</td><td>Earplug</td><td>Blocks roars</td></tr>\
                    <tr><td>Speed</td><td>10</td><td>Eating</td><td>Eat faster</td></tr>";
        let html = format!("<h4>Other</h4>{}", skill_table(body));
        let skills = extract(&html);
        assert_eq!(skills[0].skill_point, "Hearing");
        assert_eq!(skills[1].skill_point, "Speed");
    }

    #[test]
    fn trailing_colon_stripped_from_type() {
        let body = "<tr><td>Attack</td><td>10</td><td>Attack Up (S)</td><td>Boost</td></tr>";
        let html = format!("<h4>Blademaster Skills:</h4>{}", skill_table(body));
        assert_eq!(extract(&html)[0].skill_type, "Blademaster Skills");
    }

    #[test]
    fn heading_without_table_is_skipped() {
        let body = "<tr><td>Attack</td><td>10</td><td>Attack Up (S)</td><td>Boost</td></tr>";
        let html = format!("<h4>Orphan:</h4><h4>Real:</h4>{}", skill_table(body));
        let skills = extract(&html);
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].skill_type, "Real");
    }

    #[test]
    fn table_without_heading_is_ignored() {
        let body = "<tr><td>Attack</td><td>10</td><td>Attack Up (S)</td><td>Boost</td></tr>";
        assert!(extract(&skill_table(body)).is_empty());
    }

    #[test]
    fn skills_fixture() {
        let html = std::fs::read_to_string("tests/fixtures/skills.html").unwrap();
        let skills = extract(&html);
        assert_eq!(skills.len(), 5);
        let attack: Vec<_> = skills.iter().filter(|s| s.skill_point == "Attack").collect();
        assert_eq!(attack.len(), 3);
        assert!(skills.iter().all(|s| s.skill_type == "Battle Skills"));
        assert_eq!(skills[4].skill_name, "Guard Up");
    }
}
