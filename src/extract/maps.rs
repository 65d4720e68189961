use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use super::{cell_text, split_cell_items, split_cell_lines, TD, TR};

static SECTION: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2, h3, table").unwrap());
static AREA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Area\s*(\d+)$").unwrap());

/// Marker class on the per-area tables; other tables between headings are
/// layout noise and skipped.
const AREA_TABLE_CLASS: &str = "ffaq";

#[derive(Debug, Serialize)]
pub struct MapData {
    #[serde(rename = "mapName")]
    pub map_name: String,
    pub areas: Vec<Area>,
}

#[derive(Debug, Serialize)]
pub struct Area {
    #[serde(rename = "areaName")]
    pub area_name: String,
    #[serde(rename = "areaNumber")]
    pub area_number: Option<u32>,
    pub nodes: Vec<Node>,
}

#[derive(Debug, Serialize)]
pub struct Node {
    #[serde(rename = "nodeNumber")]
    pub node_number: String,
    #[serde(rename = "nodeType")]
    pub node_type: String,
    #[serde(rename = "low-rank", skip_serializing_if = "Option::is_none")]
    pub low_rank: Option<RankData>,
    #[serde(rename = "high-rank", skip_serializing_if = "Option::is_none")]
    pub high_rank: Option<RankData>,
    #[serde(rename = "g-rank", skip_serializing_if = "Option::is_none")]
    pub g_rank: Option<RankData>,
    #[serde(rename = "training-school", skip_serializing_if = "Option::is_none")]
    pub training_school: Option<RankData>,
    #[serde(rename = "treasure-hunting", skip_serializing_if = "Option::is_none")]
    pub treasure_hunting: Option<TreasureData>,
}

#[derive(Debug, Serialize)]
pub struct RankData {
    pub items: Vec<RankItem>,
}

#[derive(Debug, Serialize)]
pub struct RankItem {
    #[serde(rename = "itemName")]
    pub item_name: String,
}

#[derive(Debug, Serialize)]
pub struct TreasureData {
    pub items: Vec<TreasureItem>,
}

#[derive(Debug, Serialize)]
pub struct TreasureItem {
    #[serde(rename = "itemName")]
    pub item_name: String,
    pub points: i64,
}

/// Extract one map per h3 heading, collecting the `ffaq` area tables that
/// follow it. An h2 ends collection for the current map; the next h3 both
/// names a new map and resumes collection.
pub fn extract(html: &str) -> Vec<MapData> {
    let doc = Html::parse_document(html);
    let mut maps: Vec<MapData> = Vec::new();
    let mut collecting = false;

    for el in doc.select(&SECTION) {
        match el.value().name() {
            "h3" => {
                maps.push(MapData {
                    map_name: cell_text(el),
                    areas: Vec::new(),
                });
                collecting = true;
            }
            "h2" => collecting = false,
            _ => {
                if collecting && el.value().classes().any(|c| c == AREA_TABLE_CLASS) {
                    if let (Some(area), Some(map)) = (parse_area_table(el), maps.last_mut()) {
                        map.areas.push(area);
                    }
                }
            }
        }
    }

    maps
}

fn parse_area_table(table: ElementRef) -> Option<Area> {
    let rows: Vec<_> = table.select(&TR).collect();
    let header_cells: Vec<_> = rows.first()?.select(&TD).collect();
    let area_name = cell_text(*header_cells.first()?);
    let area_number = AREA_RE
        .captures(&area_name)
        .and_then(|c| c[1].parse().ok());

    // Rows 0 and 1 are the area header and column headers.
    let nodes = rows
        .iter()
        .skip(2)
        .filter_map(|row| {
            let cells: Vec<_> = row.select(&TD).collect();
            parse_node(&cells)
        })
        .collect();

    Some(Area {
        area_name,
        area_number,
        nodes,
    })
}

fn parse_node(cells: &[ElementRef]) -> Option<Node> {
    if cells.len() < 2 {
        return None;
    }
    let node_number = cell_text(cells[0]);
    let node_type = cell_text(cells[1]);

    if cells.len() >= 8 {
        Some(Node {
            node_number,
            node_type,
            low_rank: Some(rank_data(cells[2])),
            high_rank: Some(rank_data(cells[3])),
            g_rank: Some(rank_data(cells[4])),
            training_school: Some(rank_data(cells[5])),
            treasure_hunting: Some(treasure_data(cells[6], cells[7])),
        })
    } else if cells.len() == 4 {
        // Secret Area layout: high rank and g rank only.
        Some(Node {
            node_number,
            node_type,
            low_rank: None,
            high_rank: Some(rank_data(cells[2])),
            g_rank: Some(rank_data(cells[3])),
            training_school: None,
            treasure_hunting: None,
        })
    } else {
        None
    }
}

fn rank_data(cell: ElementRef) -> RankData {
    RankData {
        items: split_cell_items(cell)
            .into_iter()
            .map(|item_name| RankItem { item_name })
            .collect(),
    }
}

/// Zip the treasure item list against the parallel points column by position.
/// The markup carries no alignment key, so a short or non-numeric points
/// entry falls back to 0 rather than shifting later items.
fn treasure_data(items_cell: ElementRef, points_cell: ElementRef) -> TreasureData {
    let points = split_cell_lines(points_cell);
    let items = split_cell_items(items_cell)
        .into_iter()
        .enumerate()
        .map(|(i, item_name)| TreasureItem {
            item_name,
            points: points.get(i).and_then(|p| p.parse().ok()).unwrap_or(0),
        })
        .collect();
    TreasureData { items }
}

// ── Tests ──
