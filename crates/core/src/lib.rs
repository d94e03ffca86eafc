#![warn(clippy::pedantic)]

pub mod batch;
pub mod course;
pub mod error;
pub mod grid;
pub mod layout;
pub mod room;
pub mod table;

pub use batch::{parse_from_buf, parse_from_file, Batch, PasteOutcome, SkippedRow, Timetable};
pub use course::{Course, Day, Language};
pub use error::RowError;
pub use grid::{CellMetrics, DisplayOptions, Grid, Placement};
pub use layout::{ColorMode, LayoutOptions, ScheduleBlock, SpanMode};

/// Parses pasted HTML and places its blocks in one go, for callers that
/// don't keep a [`Timetable`] around. Empty when the paste has no table.
#[must_use]
pub fn create_timetable(
	html: &str,
	layout: LayoutOptions,
	metrics: CellMetrics,
	display: DisplayOptions,
) -> Vec<Placement> {
	Batch::from_html(html, layout)
		.map(|batch| Grid::for_batch(&batch).place(&batch, metrics, display))
		.unwrap_or_default()
}
