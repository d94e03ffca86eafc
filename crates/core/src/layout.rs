//! Turns a course's time slots into one block per day (or per run of
//! periods) for placement on the weekly grid.

use std::fmt;

use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::course::{Course, Day};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
	Blue,
	Green,
	Lime,
	Yellow,
	Red,
	Pink,
	Indigo,
	Purple,
	Gray,
}

pub const PALETTE: [Color; 9] = [
	Color::Blue,
	Color::Green,
	Color::Lime,
	Color::Yellow,
	Color::Red,
	Color::Pink,
	Color::Indigo,
	Color::Purple,
	Color::Gray,
];

impl Color {
	#[must_use]
	pub fn name(self) -> &'static str {
		match self {
			Self::Blue => "blue",
			Self::Green => "green",
			Self::Lime => "lime",
			Self::Yellow => "yellow",
			Self::Red => "red",
			Self::Pink => "pink",
			Self::Indigo => "indigo",
			Self::Purple => "purple",
			Self::Gray => "gray",
		}
	}

	/// Tailwind background class used by the web page.
	#[must_use]
	pub fn css_class(self) -> String {
		format!("bg-{}-400", self.name())
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// How periods on the same day are grouped into blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpanMode {
	/// One block from the earliest to the latest period of the day, even if
	/// there are free periods in between.
	#[default]
	Merge,
	/// One block per contiguous run of periods.
	Split,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
	/// Derived from the course code; every block of a course shares a color
	/// and keeps it across pastes.
	#[default]
	Stable,
	/// An independent draw per block.
	Random { seed: u64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutOptions {
	pub spans: SpanMode,
	pub colors: ColorMode,
}

/// One rectangle on the grid. `start_period..=end_period` index into
/// [`PERIODS`](crate::course::PERIODS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleBlock {
	/// Index of the source course in its batch.
	pub course: usize,
	pub day: Day,
	pub start_period: usize,
	pub end_period: usize,
	pub color: Color,
}

impl ScheduleBlock {
	#[must_use]
	pub fn day_index(&self) -> usize {
		self.day.index()
	}

	/// Number of periods covered.
	#[must_use]
	pub fn period_count(&self) -> usize {
		self.end_period - self.start_period + 1
	}
}

/// Hashes the course code onto the palette.
#[must_use]
pub fn stable_color(code: &str) -> Color {
	let digest = Sha256::digest(code.as_bytes());

	PALETTE[usize::from(digest[0]) % PALETTE.len()]
}

pub struct Layout {
	spans: SpanMode,
	rng: Option<SmallRng>,
}

impl Layout {
	#[must_use]
	pub fn new(options: LayoutOptions) -> Self {
		let rng = match options.colors {
			ColorMode::Stable => None,
			ColorMode::Random { seed } => Some(SmallRng::seed_from_u64(seed)),
		};

		Self {
			spans: options.spans,
			rng,
		}
	}

	fn color(&mut self, course: &Course) -> Color {
		match self.rng.as_mut() {
			Some(rng) => PALETTE[rng.gen_range(0..PALETTE.len())],
			None => stable_color(&course.code),
		}
	}

	/// Blocks for `course`, which sits at `index` in its batch. Days come out
	/// in the order they first appear in the course's time code.
	pub fn blocks(&mut self, index: usize, course: &Course) -> Vec<ScheduleBlock> {
		let mut days = Vec::<Day>::new();

		for slot in &course.time {
			if !days.contains(&slot.day) {
				days.push(slot.day);
			}
		}

		let mut blocks = Vec::new();

		for day in days {
			let mut periods = course
				.time
				.iter()
				.filter(|slot| slot.day == day)
				.map(|slot| slot.period)
				.collect::<Vec<_>>();

			periods.sort_unstable();
			periods.dedup();

			for (start_period, end_period) in spans(&periods, self.spans) {
				let block = ScheduleBlock {
					course: index,
					day,
					start_period,
					end_period,
					color: self.color(course),
				};

				tracing::debug!(
					code = %course.code,
					day = %day,
					start_period,
					end_period,
					"placed block"
				);

				blocks.push(block);
			}
		}

		blocks
	}
}

/// `periods` must be sorted and free of duplicates.
fn spans(periods: &[usize], mode: SpanMode) -> Vec<(usize, usize)> {
	let (Some(&first), Some(&last)) = (periods.first(), periods.last()) else {
		return Vec::new();
	};

	match mode {
		SpanMode::Merge => vec![(first, last)],
		SpanMode::Split => {
			let mut runs = Vec::new();
			let mut start = first;

			for pair in periods.windows(2) {
				if pair[1] != pair[0] + 1 {
					runs.push((start, pair[0]));
					start = pair[1];
				}
			}

			runs.push((start, last));
			runs
		}
	}
}
