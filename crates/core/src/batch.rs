use std::{
	fs::File,
	io::{self, Read},
	path::Path,
};

use serde::Serialize;

use crate::{
	course::{Course, Day},
	error::RowError,
	layout::{Layout, LayoutOptions, ScheduleBlock},
	table::{self, Row},
};

/// A table row that didn't make it into the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
	/// Index of the `<tr>` within the table, header rows included.
	pub row: usize,
	pub reason: RowError,
}

/// Everything produced by one paste. Never modified after it is built.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Batch {
	pub courses: Vec<Course>,
	pub blocks: Vec<ScheduleBlock>,
	pub skipped: Vec<SkippedRow>,
}

impl Batch {
	/// Parses pasted clipboard HTML. `None` when it holds no table.
	#[must_use]
	pub fn from_html(html: &str, options: LayoutOptions) -> Option<Self> {
		let Some(rows) = table::extract(html) else {
			tracing::debug!("paste has no table, ignoring");
			return None;
		};

		Some(Self::from_rows(&rows, options))
	}

	/// Builds a batch from extracted rows. Rows without any `<td>` are not
	/// data rows and are passed over silently, as is a leading column header
	/// row written with `<td>` cells. Other rows that fail to parse are
	/// recorded in [`Batch::skipped`].
	#[must_use]
	pub fn from_rows(rows: &[Row], options: LayoutOptions) -> Self {
		let mut layout = Layout::new(options);
		let mut batch = Self::default();
		let mut first = true;

		for (index, row) in rows.iter().enumerate() {
			if row.is_empty() {
				continue;
			}

			let leading = std::mem::replace(&mut first, false);

			match Course::try_from(row.as_slice()) {
				Ok(course) => {
					tracing::debug!(row = index, code = %course.code, "parsed course");

					let blocks = layout.blocks(batch.courses.len(), &course);

					batch.blocks.extend(blocks);
					batch.courses.push(course);
				}
				Err(reason) if leading => {
					tracing::debug!(row = index, %reason, "treating first row as column header");
				}
				Err(reason) => {
					tracing::warn!(row = index, %reason, "skipping row");

					batch.skipped.push(SkippedRow { row: index, reason });
				}
			}
		}

		tracing::info!(
			courses = batch.courses.len(),
			blocks = batch.blocks.len(),
			skipped = batch.skipped.len(),
			"parsed timetable"
		);

		batch
	}

	/// The course a block was laid out from.
	#[must_use]
	pub fn course(&self, block: &ScheduleBlock) -> Option<&Course> {
		self.courses.get(block.course)
	}

	#[must_use]
	pub fn has_saturday(&self) -> bool {
		self.blocks.iter().any(|b| b.day == Day::Sat)
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.courses.is_empty() && self.skipped.is_empty()
	}

	/// Sum of the credits of every parsed course.
	#[must_use]
	pub fn credits(&self) -> u32 {
		self.courses.iter().map(|c| c.credits).sum()
	}
}

/// Reads clipboard HTML from `path`, or from stdin when `path` is `None`.
///
/// # Errors
///
/// Fails only when the input can't be read. Input without a table yields
/// `Ok(None)`.
pub fn parse_from_file<P: AsRef<Path>>(
	path: Option<P>,
	options: LayoutOptions,
) -> io::Result<Option<Batch>> {
	let mut buf = Vec::new();

	if let Some(path) = path {
		File::open(path)?.read_to_end(&mut buf)?;
	} else {
		io::stdin().read_to_end(&mut buf)?;
	}

	Ok(parse_from_buf(&buf, options))
}

/// Same as [`Batch::from_html`], replacing invalid UTF-8.
#[must_use]
pub fn parse_from_buf(buf: &[u8], options: LayoutOptions) -> Option<Batch> {
	Batch::from_html(&String::from_utf8_lossy(buf), options)
}

/// What a paste did to a [`Timetable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteOutcome {
	/// The held batch was replaced.
	Replaced {
		courses: usize,
		blocks: usize,
		skipped: usize,
	},
	/// No table in the paste; the held batch is untouched.
	Ignored,
}

/// Owns the current batch. Each paste either swaps in a whole new batch or
/// leaves the old one in place.
#[derive(Debug, Default)]
pub struct Timetable {
	batch: Batch,
	options: LayoutOptions,
}

impl Timetable {
	#[must_use]
	pub fn new(options: LayoutOptions) -> Self {
		Self {
			batch: Batch::default(),
			options,
		}
	}

	pub fn paste(&mut self, html: &str) -> PasteOutcome {
		match Batch::from_html(html, self.options) {
			Some(batch) => {
				let outcome = PasteOutcome::Replaced {
					courses: batch.courses.len(),
					blocks: batch.blocks.len(),
					skipped: batch.skipped.len(),
				};

				self.batch = batch;
				outcome
			}
			None => PasteOutcome::Ignored,
		}
	}

	#[must_use]
	pub fn batch(&self) -> &Batch {
		&self.batch
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use super::*;

	const TABLE: &str = "<table>\
		<tr><th>科號</th><th>課程名稱</th></tr>\
		<tr><td>CS101</td><td>資料結構<br>Data Structures</td><td>3</td><td>M1M2</td>\
		<td>TSMC台積101</td><td>陳<br>Chen</td><td>50</td></tr>\
		<tr><td>CS102</td><td>演算法<br>Algorithms</td><td>?</td><td>T3</td>\
		<td>EECS資電129</td><td>林<br>Lin</td><td>40</td></tr>\
		<tr><td>CS103</td><td>計算機結構<br>Computer Architecture</td><td>3</td><td>W5W6F5</td>\
		<td>Online</td><td>王<br>Wang</td><td>30</td></tr>\
		</table>";

	#[test]
	fn bad_rows_are_skipped_not_fatal() {
		let batch = Batch::from_html(TABLE, LayoutOptions::default()).unwrap();

		assert_eq!(batch.courses.len(), 2);
		assert_eq!(batch.skipped, vec![SkippedRow {
			row: 2,
			reason: RowError::InvalidNumber {
				column: "credits",
				value: "?".to_string(),
			},
		}]);
		assert_eq!(batch.blocks.len(), 3);
		assert_eq!(batch.credits(), 6);
	}

	#[test]
	fn blocks_point_back_at_their_course() {
		let batch = Batch::from_html(TABLE, LayoutOptions::default()).unwrap();

		let codes = batch
			.blocks
			.iter()
			.map(|b| batch.course(b).unwrap().code.as_str())
			.collect::<Vec<_>>();

		assert_eq!(codes, vec!["CS101", "CS103", "CS103"]);
	}

	#[test]
	fn paste_without_table_keeps_previous_batch() {
		let mut timetable = Timetable::default();

		assert_eq!(timetable.paste("<p>hello</p>"), PasteOutcome::Ignored);
		assert!(timetable.batch().is_empty());

		assert_eq!(timetable.paste(TABLE), PasteOutcome::Replaced {
			courses: 2,
			blocks: 3,
			skipped: 1,
		});
		assert_eq!(timetable.paste("plain text"), PasteOutcome::Ignored);
		assert_eq!(timetable.batch().courses.len(), 2);
	}

	#[test]
	fn new_paste_replaces_everything() {
		let mut timetable = Timetable::default();
		timetable.paste(TABLE);

		let outcome =
			timetable.paste("<table><tr><td>科號</td></tr><tr><td>only</td></tr></table>");

		assert_eq!(outcome, PasteOutcome::Replaced {
			courses: 0,
			blocks: 0,
			skipped: 1,
		});
		assert!(timetable.batch().courses.is_empty());
		assert!(timetable.batch().blocks.is_empty());
	}

	const TD_HEADER: &str = "<table>\
		<tr><td>科號<br>Course No.</td><td>課程名稱<br>Course Title</td><td>學分<br>Credit</td>\
		<td>上課時間<br>Time</td><td>教室<br>Room</td><td>授課教師<br>Instructor</td>\
		<td>人數<br>Enrolled</td></tr>\
		<tr><td>CS101</td><td>資料結構<br>Data Structures</td><td>3</td><td>M1M2</td>\
		<td>TSMC台積101</td><td>陳<br>Chen</td><td>50</td></tr>\
		<tr><td>CS104</td><td>作業系統<br>Operating Systems</td><td>3</td><td>X1X2</td>\
		<td>EECS資電129</td><td>周<br>Chou</td><td>45</td></tr>\
		<tr><td>CS105</td><td>編譯器<br>Compilers</td><td>3</td><td>F7F8</td>\
		<td>EECS資電131</td><td>黃<br>Huang</td><td>20</td></tr>\
		</table>";

	#[test]
	fn td_header_row_is_not_reported() {
		let batch = Batch::from_html(TD_HEADER, LayoutOptions::default()).unwrap();

		assert_eq!(batch.courses.len(), 2);
		assert_eq!(batch.skipped, vec![SkippedRow {
			row: 2,
			reason: RowError::UnknownDay('X'),
		}]);
	}

	#[test]
	fn unknown_day_row_does_not_stop_the_batch() {
		let batch = Batch::from_html(TD_HEADER, LayoutOptions::default()).unwrap();

		let codes = batch.courses.iter().map(|c| c.code.as_str()).collect::<Vec<_>>();

		assert_eq!(codes, vec!["CS101", "CS105"]);
		assert_eq!(batch.blocks.len(), 2);
		assert_eq!(batch.blocks[1].day, Day::Fri);
	}

	#[test]
	fn failing_row_after_a_course_is_reported() {
		let html = "<table><tr><td>CS101</td><td>資料結構</td><td>3</td><td>M1</td>\
			<td>TSMC台積101</td><td>陳</td><td>50</td></tr>\
			<tr><td>科號</td><td>課程名稱</td><td>學分</td><td>M1</td>\
			<td></td><td></td><td>人數</td></tr></table>";
		let batch = Batch::from_html(html, LayoutOptions::default()).unwrap();

		assert_eq!(batch.courses.len(), 1);
		assert_eq!(batch.skipped.len(), 1);
		assert_eq!(batch.skipped[0].row, 1);
	}

	#[test]
	fn reads_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(TABLE.as_bytes()).unwrap();

		let batch = parse_from_file(Some(file.path()), LayoutOptions::default())
			.unwrap()
			.unwrap();

		assert_eq!(batch.courses.len(), 2);
	}

	#[test]
	fn missing_file_is_an_error() {
		let dir = tempfile::tempdir().unwrap();

		assert!(parse_from_file(Some(dir.path().join("nope.html")), LayoutOptions::default()).is_err());
	}

	#[test]
	fn skipped_rows_serialize_their_reason() {
		let batch = Batch::from_html(TABLE, LayoutOptions::default()).unwrap();
		let json = serde_json::to_value(&batch.skipped).unwrap();

		assert_eq!(json[0]["reason"], "column `credits` is not an integer: \"?\"");
	}
}
