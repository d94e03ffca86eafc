use std::fmt::{self, Write};

use ccxp2grid_core::{course::PERIODS, Batch, DisplayOptions, Grid, ScheduleBlock};
use unicode_width::UnicodeWidthChar;

const LABEL_WIDTH: usize = 14;
const DAY_WIDTH: usize = 16;

/// Pads or cuts `s` to exactly `width` terminal columns.
fn fit(s: &str, width: usize) -> String {
	let mut out = String::with_capacity(width);
	let mut used = 0;

	for c in s.chars() {
		let w = c.width().unwrap_or(0);

		if used + w > width {
			break;
		}

		out.push(c);
		used += w;
	}

	out.extend(std::iter::repeat(' ').take(width - used));
	out
}

fn line(grid: &Grid, left: char, joint: char, right: char) -> String {
	let mut s = String::new();

	s.push(left);
	s.push_str(&"─".repeat(LABEL_WIDTH));

	for _ in grid.days() {
		s.push(joint);
		s.push_str(&"─".repeat(DAY_WIDTH));
	}

	s.push(right);
	s
}

/// What a block shows on the `offset`-th period it covers.
fn cell_text(batch: &Batch, block: &ScheduleBlock, offset: usize, display: DisplayOptions) -> String {
	let Some(course) = batch.course(block) else {
		return String::new();
	};
	let language = display.language;

	match offset {
		0 => course.code.clone(),
		1 => course.name.get(language).to_string(),
		2 => course.room.label(language),
		3 if display.show_teachers => course
			.teachers
			.iter()
			.map(|t| t.get(language))
			.collect::<Vec<_>>()
			.join(", "),
		_ => "┆".to_string(),
	}
}

/// Draws the weekly table with box characters, one text row per period.
pub fn grid(batch: &Batch, display: DisplayOptions) -> Result<String, fmt::Error> {
	let grid = Grid::for_batch(batch);
	let mut out = String::new();

	writeln!(out, "{}", line(&grid, '┌', '┬', '┐'))?;

	let mut header = format!("│{}", fit("", LABEL_WIDTH));
	for day in grid.days() {
		write!(header, "│{}", fit(&format!(" {day}"), DAY_WIDTH))?;
	}
	writeln!(out, "{header}│")?;

	for (index, period) in PERIODS.iter().enumerate() {
		writeln!(out, "{}", line(&grid, '├', '┼', '┤'))?;

		let label = format!(
			" {} {}",
			period.label(),
			period.start_time().format("%H:%M")
		);
		let mut row = format!("│{}", fit(&label, LABEL_WIDTH));

		for day in grid.days() {
			let text = batch
				.blocks
				.iter()
				.filter(|b| b.day == *day && (b.start_period..=b.end_period).contains(&index))
				.map(|b| cell_text(batch, b, index - b.start_period, display))
				.collect::<Vec<_>>()
				.join(" / ");

			write!(row, "│{}", fit(&format!(" {text}"), DAY_WIDTH))?;
		}

		writeln!(out, "{row}│")?;
	}

	writeln!(out, "{}", line(&grid, '└', '┴', '┘'))?;

	writeln!(
		out,
		"{} courses, {} credits",
		batch.courses.len(),
		batch.credits()
	)?;

	for skipped in &batch.skipped {
		writeln!(out, "skipped row {}: {}", skipped.row, skipped.reason)?;
	}

	Ok(out)
}

#[cfg(test)]
mod tests {
	use ccxp2grid_core::{Language, LayoutOptions};
	use unicode_width::UnicodeWidthStr;

	use super::*;

	#[test]
	fn fit_counts_wide_characters() {
		assert_eq!(fit("資料結構", 5), "資料 ");
		assert_eq!(fit("CS", 4), "CS  ");
		assert_eq!(fit("", 0), "");
		assert_eq!(fit("資料", 4).width(), 4);
	}

	#[test]
	fn lists_skipped_rows_under_the_grid() {
		let html = "<table><tr><td>CS101</td><td>資料結構</td><td>3</td><td>M1</td>\
			<td>TSMC台積101</td><td>陳</td><td>50</td></tr>\
			<tr><td>CS102</td><td>演算法</td><td>3</td><td>Q1</td>\
			<td>EECS資電129</td><td>林</td><td>40</td></tr></table>";
		let batch = Batch::from_html(html, LayoutOptions::default()).unwrap();

		let text = grid(&batch, DisplayOptions::default()).unwrap();

		assert!(text.contains("skipped row 1: unknown day symbol 'Q'"));
	}

	#[test]
	fn draws_course_in_its_column() {
		let html = "<table><tr><td>CS101</td><td>資料結構<br>Data Structures</td><td>3</td>\
			<td>T3T4</td><td>TSMC台積101</td><td>陳<br>Chen</td><td>50</td></tr></table>";
		let batch = Batch::from_html(html, LayoutOptions::default()).unwrap();

		let text = grid(&batch, DisplayOptions {
			language: Language::English,
			show_teachers: true,
		})
		.unwrap();
		let lines = text.lines().collect::<Vec<_>>();

		// header, then a separator and a row per period
		let third = lines.iter().find(|l| l.contains("第3節")).unwrap();
		let fourth = lines.iter().find(|l| l.contains("第4節")).unwrap();
		let columns = third.split('│').collect::<Vec<_>>();

		assert_eq!(columns[3].trim(), "CS101");
		assert!(fourth.contains("Data Structures"));
		assert!(!lines[1].contains("Sat."));
		assert!(text.contains("1 courses, 3 credits"));
	}
}
