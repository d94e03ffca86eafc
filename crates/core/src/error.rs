use serde::{Serialize, Serializer};
use thiserror::Error;

/// Why a table row was rejected instead of becoming a course.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
	#[error("expected {expected} columns, found {found}")]
	MissingColumn { expected: usize, found: usize },

	#[error("column `{column}` is empty")]
	EmptyColumn { column: &'static str },

	#[error("column `{column}` is not an integer: {value:?}")]
	InvalidNumber { column: &'static str, value: String },

	#[error("time code {0:?} has odd length")]
	OddTimeCode(String),

	#[error("unknown day symbol {0:?}")]
	UnknownDay(char),

	#[error("unknown period symbol {0:?}")]
	UnknownPeriod(char),
}

/// Serialized as its message.
impl Serialize for RowError {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}
