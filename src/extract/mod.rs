pub mod decorations;
pub mod items;
pub mod maps;
pub mod skills;

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

pub(crate) static TR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
pub(crate) static TD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

/// Concatenated descendant text with whitespace runs collapsed to single spaces.
pub(crate) fn cell_text(el: ElementRef) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// One trimmed entry per line of a cell. Lines break at `<br>`/element
/// boundaries (separate text nodes) and at raw newlines inside a text node.
/// Keeps `-` placeholders so positional columns stay aligned.
pub(crate) fn split_cell_lines(el: ElementRef) -> Vec<String> {
    el.text()
        .flat_map(|t| t.split('\n'))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// `split_cell_lines` minus the `-` placeholders used for empty item slots.
pub(crate) fn split_cell_items(el: ElementRef) -> Vec<String> {
    split_cell_lines(el)
        .into_iter()
        .filter(|t| t != "-")
        .collect()
}
