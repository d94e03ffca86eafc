//! Pulls the first `<table>` out of pasted clipboard HTML.

use select::{document::Document, node::Node, predicate::Name};

/// The trimmed, non-empty text fragments of one cell, split on `<br>`.
pub type Cell = Vec<String>;

/// The cells of one `<tr>`, in column order.
pub type Row = Vec<Cell>;

/// Extracts every row of the first table in `html`.
///
/// Returns `None` when the document has no table at all, which callers treat
/// as "nothing was pasted" rather than as an error. Header rows made only of
/// `<th>` cells come back as empty rows. Cells are the row's direct `<td>`
/// children, so a table nested inside a cell doesn't leak into the row.
#[must_use]
pub fn extract(html: &str) -> Option<Vec<Row>> {
	let document = Document::from(html);
	let table = document.find(Name("table")).next()?;

	let rows = table
		.find(Name("tr"))
		.map(|tr| {
			tr.children()
				.filter(|cell| cell.is(Name("td")))
				.map(fragments)
				.collect::<Row>()
		})
		.collect();

	Some(rows)
}

fn fragments(cell: Node) -> Cell {
	let mut done = Vec::new();
	let mut current = String::new();

	collect_text(cell, &mut current, &mut done);
	done.push(current);

	done.iter()
		.map(String::as_str)
		.map(clean)
		.filter(|fragment| !fragment.is_empty())
		.collect()
}

fn collect_text(node: Node, current: &mut String, done: &mut Vec<String>) {
	for child in node.children() {
		if let Some(text) = child.as_text() {
			current.push_str(text);
		} else if child.name() == Some("br") {
			done.push(std::mem::take(current));
		} else {
			collect_text(child, current, done);
		}
	}
}

fn clean(fragment: &str) -> String {
	fragment.replace('\u{a0}', "").trim().to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn no_table_is_none() {
		assert_eq!(extract("<p>nothing to see</p>"), None);
		assert_eq!(extract(""), None);
	}

	#[test]
	fn splits_cells_on_line_breaks() {
		let rows = extract(
			"<table><tr><td>CS101</td><td>資料結構<br>Data Structures</td></tr></table>",
		)
		.unwrap();

		assert_eq!(rows, vec![vec![
			vec!["CS101".to_string()],
			vec!["資料結構".to_string(), "Data Structures".to_string()],
		]]);
	}

	#[test]
	fn strips_nbsp_and_drops_empty_fragments() {
		let rows = extract(
			"<table><tr><td>&nbsp;3&nbsp;<br><br>  <br/></td><td>&nbsp;</td></tr></table>",
		)
		.unwrap();

		assert_eq!(rows, vec![vec![vec!["3".to_string()], vec![]]]);
	}

	#[test]
	fn keeps_text_inside_inline_markup() {
		let rows =
			extract("<table><tr><td><a href=\"#\">陳</a><br><span>Chen</span></td></tr></table>")
				.unwrap();

		assert_eq!(rows[0][0], vec!["陳".to_string(), "Chen".to_string()]);
	}

	#[test]
	fn header_rows_have_no_cells() {
		let rows =
			extract("<table><tr><th>Code</th></tr><tr><td>CS101</td></tr></table>").unwrap();

		assert_eq!(rows.len(), 2);
		assert!(rows[0].is_empty());
		assert_eq!(rows[1][0], vec!["CS101".to_string()]);
	}

	#[test]
	fn only_first_table_is_read() {
		let rows = extract(
			"<table><tr><td>first</td></tr></table><table><tr><td>second</td></tr></table>",
		)
		.unwrap();

		assert_eq!(rows, vec![vec![vec!["first".to_string()]]]);
	}
}
