use std::{fmt, str::FromStr};

use chrono::NaiveTime;
use serde::{Serialize, Serializer};

use crate::{
	error::RowError,
	room::{self, Room},
	table::Cell,
};

/// Columns of a course selection row, in order.
pub const COLUMNS: [&str; 7] = [
	"code",
	"course",
	"credits",
	"time",
	"room",
	"teachers",
	"enrollment",
];

/// Which half of a bilingual pair to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
	#[default]
	Chinese,
	English,
}

impl FromStr for Language {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s {
			"chinese" | "zh" => Self::Chinese,
			"english" | "en" => Self::English,
			_ => return Err(()),
		})
	}
}

/// A name as printed by the registration portal: Chinese first, then
/// (usually) English.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Name {
	pub chinese: String,
	pub english: Option<String>,
}

impl Name {
	/// Falls back to the Chinese name when no English one was given.
	#[must_use]
	pub fn get(&self, language: Language) -> &str {
		match language {
			Language::Chinese => &self.chinese,
			Language::English => self.english.as_deref().unwrap_or(&self.chinese),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Day {
	Mon,
	Tue,
	Wed,
	Thu,
	Fri,
	Sat,
}

/// Day symbols used in time codes. 0 = monday
pub const DAY_ORDER: &str = "MTWRFS";

impl Day {
	pub const ALL: [Self; 6] = [
		Self::Mon,
		Self::Tue,
		Self::Wed,
		Self::Thu,
		Self::Fri,
		Self::Sat,
	];

	#[must_use]
	pub fn index(self) -> usize {
		self as usize
	}

	#[must_use]
	pub fn symbol(self) -> char {
		match self {
			Self::Mon => 'M',
			Self::Tue => 'T',
			Self::Wed => 'W',
			Self::Thu => 'R',
			Self::Fri => 'F',
			Self::Sat => 'S',
		}
	}

	/// Column header for the grid.
	#[must_use]
	pub fn header(self) -> &'static str {
		match self {
			Self::Mon => "Mon.",
			Self::Tue => "Tue.",
			Self::Wed => "Wed.",
			Self::Thu => "Thu.",
			Self::Fri => "Fri.",
			Self::Sat => "Sat.",
		}
	}
}

impl TryFrom<char> for Day {
	type Error = RowError;

	fn try_from(c: char) -> Result<Self, Self::Error> {
		DAY_ORDER
			.chars()
			.position(|d| d == c)
			.map(|i| Self::ALL[i])
			.ok_or(RowError::UnknownDay(c))
	}
}

impl fmt::Display for Day {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.header())
	}
}

/// One class period. Start and end are (hour, minute).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
	pub symbol: char,
	#[serde(serialize_with = "clock")]
	pub start: (u8, u8),
	#[serde(serialize_with = "clock")]
	pub end: (u8, u8),
}

const fn period(symbol: char, start: (u8, u8), end: (u8, u8)) -> Period {
	Period { symbol, start, end }
}

/// The 13 periods of a teaching day, in chronological order.
pub const PERIODS: [Period; 13] = [
	period('1', (8, 0), (8, 50)),
	period('2', (9, 0), (9, 50)),
	period('3', (10, 10), (11, 0)),
	period('4', (11, 10), (12, 0)),
	period('n', (12, 10), (13, 0)),
	period('5', (13, 20), (14, 10)),
	period('6', (14, 20), (15, 10)),
	period('7', (15, 30), (16, 20)),
	period('8', (16, 30), (17, 20)),
	period('9', (17, 30), (18, 20)),
	period('a', (18, 30), (19, 20)),
	period('b', (19, 30), (20, 20)),
	period('c', (20, 30), (21, 20)),
];

fn to_time((hour, minute): (u8, u8)) -> NaiveTime {
	NaiveTime::from_hms_opt(u32::from(hour), u32::from(minute), 0)
		.expect("period table holds valid clock times")
}

fn clock<S: Serializer>(time: &(u8, u8), serializer: S) -> Result<S::Ok, S::Error> {
	serializer.collect_str(&to_time(*time).format("%H:%M"))
}

impl Period {
	#[must_use]
	pub fn start_time(&self) -> NaiveTime {
		to_time(self.start)
	}

	#[must_use]
	pub fn end_time(&self) -> NaiveTime {
		to_time(self.end)
	}

	/// Row label, e.g. `第n節`.
	#[must_use]
	pub fn label(&self) -> String {
		format!("第{}節", self.symbol)
	}
}

/// Position of `symbol` in [`PERIODS`].
#[must_use]
pub fn period_index(symbol: char) -> Option<usize> {
	PERIODS.iter().position(|p| p.symbol == symbol)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
	pub day: Day,
	/// Index into [`PERIODS`].
	pub period: usize,
}

impl TimeSlot {
	#[must_use]
	pub fn symbol(&self) -> char {
		PERIODS[self.period].symbol
	}
}

impl fmt::Display for TimeSlot {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}{}", self.day.symbol(), self.symbol())
	}
}

#[derive(Debug, Clone, Serialize)]
pub struct Course {
	pub code: String,
	pub name: Name,
	pub credits: u32,
	pub time: Vec<TimeSlot>,
	pub room: Room,
	pub teachers: Vec<Name>,
	pub enrollment: u32,
}

/// Splits a `DPDPDP...` time code (day symbol, period symbol) into slots.
///
/// # Errors
///
/// Rejects odd-length codes and symbols missing from [`DAY_ORDER`] or
/// [`PERIODS`].
pub fn parse_time(code: &str) -> Result<Vec<TimeSlot>, RowError> {
	let chars = code.chars().collect::<Vec<_>>();

	if chars.len() % 2 != 0 {
		return Err(RowError::OddTimeCode(code.to_string()));
	}

	chars
		.chunks_exact(2)
		.map(|pair| {
			let day = Day::try_from(pair[0])?;
			let period = period_index(pair[1]).ok_or(RowError::UnknownPeriod(pair[1]))?;

			Ok(TimeSlot { day, period })
		})
		.collect()
}

/// Pairs up alternating Chinese/English teacher names. A trailing name
/// without a partner keeps `english: None`.
#[must_use]
pub fn parse_teachers(fragments: &[String]) -> Vec<Name> {
	fragments
		.chunks(2)
		.map(|pair| Name {
			chinese: pair[0].clone(),
			english: pair.get(1).cloned(),
		})
		.collect()
}

fn first<'a>(cell: &'a Cell, column: &'static str) -> Result<&'a str, RowError> {
	cell.first()
		.map(String::as_str)
		.ok_or(RowError::EmptyColumn { column })
}

fn number(cell: &Cell, column: &'static str) -> Result<u32, RowError> {
	let value = first(cell, column)?;

	value.parse().map_err(|_| RowError::InvalidNumber {
		column,
		value: value.to_string(),
	})
}

impl TryFrom<&[Cell]> for Course {
	type Error = RowError;

	fn try_from(row: &[Cell]) -> Result<Self, Self::Error> {
		let [code, name, credits, time, room, teachers, enrollment, ..] = row else {
			return Err(RowError::MissingColumn {
				expected: COLUMNS.len(),
				found: row.len(),
			});
		};

		let mut name_parts = name.iter().cloned();
		let name = Name {
			chinese: name_parts.next().ok_or(RowError::EmptyColumn { column: "course" })?,
			english: name_parts.next(),
		};

		let code = first(code, "code")?.to_string();
		let credits = number(credits, "credits")?;
		let enrollment = number(enrollment, "enrollment")?;

		// courses without a scheduled time (theses, internships) are kept
		let time = match time.first() {
			Some(time) => parse_time(time)?,
			None => Vec::new(),
		};

		Ok(Self {
			code,
			name,
			credits,
			time,
			room: room::resolve(room.first().map_or("", String::as_str)),
			teachers: parse_teachers(teachers),
			enrollment,
		})
	}
}
