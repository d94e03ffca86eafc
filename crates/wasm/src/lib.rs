#![warn(clippy::pedantic)]

use ccxp2grid_core::{Batch, CellMetrics, DisplayOptions, Grid, Language, LayoutOptions, Placement};
use serde::Serialize;
use wasm_bindgen::prelude::wasm_bindgen;

#[derive(Serialize)]
struct GridLayout {
	columns: usize,
	rows: usize,
	placements: Vec<Placement>,
}

/// The parsed batch as JSON, or `null` when the paste held no table.
#[wasm_bindgen]
#[must_use]
pub fn parse(html: &str) -> String {
	let batch = Batch::from_html(html, LayoutOptions::default());

	serde_json::to_string(&batch).unwrap_or_else(|_| String::from("null"))
}

/// Positioned blocks as JSON for the grid measured by the page, or `null`
/// when the paste held no table. `lang` is `"chinese"` or `"english"`.
#[wasm_bindgen]
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn layout(
	html: &str,
	header_width: f64,
	header_height: f64,
	cell_width: f64,
	cell_height: f64,
	lang: &str,
	show_teachers: bool,
) -> String {
	let Some(batch) = Batch::from_html(html, LayoutOptions::default()) else {
		return String::from("null");
	};

	let metrics = CellMetrics {
		header_width,
		header_height,
		cell_width,
		cell_height,
	};
	let display = DisplayOptions {
		language: lang.parse::<Language>().unwrap_or_default(),
		show_teachers,
	};
	let grid = Grid::for_batch(&batch);

	let layout = GridLayout {
		columns: grid.columns,
		rows: grid.rows(),
		placements: grid.place(&batch, metrics, display),
	};

	serde_json::to_string(&layout).unwrap_or_else(|_| String::from("null"))
}
