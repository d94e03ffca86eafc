#![warn(clippy::pedantic)]

mod render;

use std::{
	fs::File,
	io::Write,
	path::PathBuf,
	time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Context;
use ccxp2grid_core::{ColorMode, DisplayOptions, Language, LayoutOptions, SpanMode};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum Format {
	/// Timetable drawn with box characters
	Grid,
	/// The parsed batch as JSON
	Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum Lang {
	Chinese,
	English,
}

impl From<Lang> for Language {
	fn from(lang: Lang) -> Self {
		match lang {
			Lang::Chinese => Self::Chinese,
			Lang::English => Self::English,
		}
	}
}

/// Turns the HTML of a copied course selection results table into a weekly
/// timetable.
#[derive(Parser)]
#[allow(clippy::struct_excessive_bools)]
struct Args {
	/// Clipboard HTML; read from stdin when omitted
	#[clap(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
	path: Option<PathBuf>,
	#[clap(short, long, value_hint = clap::ValueHint::FilePath)]
	output: Option<PathBuf>,
	#[clap(short, long, value_enum, default_value_t = Format::Grid)]
	format: Format,
	#[clap(short, long, value_enum, default_value_t = Lang::Chinese)]
	lang: Lang,
	#[clap(long)]
	hide_teachers: bool,
	/// Draw one block per run of periods instead of one per day
	#[clap(long)]
	split_gaps: bool,
	/// Pick block colors at random instead of from the course code
	#[clap(long)]
	random_colors: bool,
	#[clap(long, requires = "random_colors")]
	seed: Option<u64>,
	#[clap(short, long)]
	verbose: bool,
}

impl Args {
	fn layout(&self) -> LayoutOptions {
		let colors = if self.random_colors {
			ColorMode::Random {
				seed: self.seed.unwrap_or_else(clock_seed),
			}
		} else {
			ColorMode::Stable
		};

		LayoutOptions {
			spans: if self.split_gaps {
				SpanMode::Split
			} else {
				SpanMode::Merge
			},
			colors,
		}
	}

	fn display(&self) -> DisplayOptions {
		DisplayOptions {
			language: self.lang.into(),
			show_teachers: !self.hide_teachers,
		}
	}
}

#[allow(clippy::cast_possible_truncation)]
fn clock_seed() -> u64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|d| d.as_nanos() as u64)
		.unwrap_or_default()
}

fn init_tracing(verbose: bool) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.try_init();
}

fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	init_tracing(args.verbose);

	let batch = ccxp2grid_core::parse_from_file(args.path.as_ref(), args.layout())
		.context("failed to read input")?;

	let Some(batch) = batch else {
		tracing::warn!("no table found in the input, nothing to draw");
		return Ok(());
	};

	let text = match args.format {
		Format::Grid => render::grid(&batch, args.display())?,
		Format::Json => serde_json::to_string_pretty(&batch)? + "\n",
	};

	if let Some(output) = args.output {
		let mut file = File::create(&output)
			.with_context(|| format!("failed to create {}", output.display()))?;
		write!(&mut file, "{text}")?;
	} else {
		write!(&mut std::io::stdout(), "{text}")?;
	}

	Ok(())
}
