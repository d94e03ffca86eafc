//! Pixel geometry for laying blocks over the weekly table.
//!
//! The table itself is static: one header row, one label column and a row
//! per period. Blocks are absolutely positioned on top of it from the
//! measured size of the top-left header cell and of one body cell.

use serde::Serialize;

use crate::{
	batch::Batch,
	course::{Day, Language, PERIODS},
	layout::{Color, ScheduleBlock},
};

/// Day columns shown when nobody has a Saturday class.
pub const WEEKDAY_COLUMNS: usize = 5;

static DAYS: [Day; 6] = Day::ALL;

/// Horizontal gap left between neighbouring blocks, in pixels.
pub const DEFAULT_INSET: f64 = 4.0;

/// Measured sizes, in pixels. Re-measure whenever the viewport changes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CellMetrics {
	pub header_width: f64,
	pub header_height: f64,
	pub cell_width: f64,
	pub cell_height: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

/// Render-time toggles. They never touch the parsed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
	pub language: Language,
	pub show_teachers: bool,
}

impl Default for DisplayOptions {
	fn default() -> Self {
		Self {
			language: Language::Chinese,
			show_teachers: true,
		}
	}
}

/// A block ready to draw: where it goes and what it says.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
	#[serde(flatten)]
	pub rect: Rect,
	pub color: Color,
	pub class: String,
	pub code: String,
	pub title: String,
	/// `None` when teachers are hidden.
	pub teachers: Option<String>,
	pub room: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
	pub columns: usize,
	pub inset: f64,
}

impl Default for Grid {
	fn default() -> Self {
		Self {
			columns: WEEKDAY_COLUMNS,
			inset: DEFAULT_INSET,
		}
	}
}

impl Grid {
	/// Five columns, or six when some block falls on a Saturday.
	#[must_use]
	pub fn for_batch(batch: &Batch) -> Self {
		let columns = if batch.has_saturday() {
			Day::ALL.len()
		} else {
			WEEKDAY_COLUMNS
		};

		Self {
			columns,
			..Self::default()
		}
	}

	#[must_use]
	pub fn rows(&self) -> usize {
		PERIODS.len()
	}

	/// The days shown as columns, left to right.
	#[must_use]
	pub fn days(&self) -> &'static [Day] {
		&DAYS[..self.columns.min(DAYS.len())]
	}

	#[must_use]
	pub fn contains(&self, block: &ScheduleBlock) -> bool {
		block.day_index() < self.columns
			&& block.start_period <= block.end_period
			&& block.end_period < self.rows()
	}

	#[must_use]
	#[allow(clippy::cast_precision_loss)]
	pub fn rect(&self, block: &ScheduleBlock, metrics: CellMetrics) -> Rect {
		Rect {
			left: metrics.header_width + block.day_index() as f64 * metrics.cell_width,
			top: metrics.header_height + block.start_period as f64 * metrics.cell_height,
			width: metrics.cell_width - self.inset,
			height: block.period_count() as f64 * metrics.cell_height,
		}
	}

	/// Places every block of `batch` that fits on this grid.
	#[must_use]
	pub fn place(
		&self,
		batch: &Batch,
		metrics: CellMetrics,
		display: DisplayOptions,
	) -> Vec<Placement> {
		let language = display.language;

		batch
			.blocks
			.iter()
			.filter(|block| {
				let fits = self.contains(block);

				if !fits {
					tracing::warn!(
						day = %block.day,
						columns = self.columns,
						"block does not fit the grid"
					);
				}

				fits
			})
			.filter_map(|block| {
				let course = batch.course(block)?;

				let teachers = display.show_teachers.then(|| {
					course
						.teachers
						.iter()
						.map(|t| t.get(language))
						.collect::<Vec<_>>()
						.join(", ")
				});

				Some(Placement {
					rect: self.rect(block, metrics),
					color: block.color,
					class: block.color.css_class(),
					code: course.code.clone(),
					title: course.name.get(language).to_string(),
					teachers,
					room: course.room.label(language),
				})
			})
			.collect()
	}
}
