use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use tilewire::TilewireError;
use tilewire::style::{
	DEFAULT_REMOTE_STYLE_URL, LocalEndpoint, load_style_from_file, load_style_from_url,
	resolve_mapping, rewrite_style, save_style,
};

/// Exit code for conflicting mapping options.
const EXIT_CONFLICTING_OPTIONS: u8 = 2;

#[derive(Parser)]
#[command(name = "rewire-style")]
#[command(
	author,
	version,
	about = "Rewrite remote tile URLs in a map style to point at a local tile server"
)]
struct Cli {
	/// Path to input style JSON. If omitted the original style is fetched
	/// from the upstream repo.
	#[arg(long, short = 'i', value_name = "PATH")]
	input: Option<PathBuf>,

	/// Output style JSON path
	#[arg(long, short = 'o', value_name = "PATH")]
	output: PathBuf,

	/// JSON string mapping sourceName -> mbtiles basename (no .mbtiles)
	#[arg(long, short = 'm', value_name = "JSON")]
	mapping: Option<String>,

	/// JSON file containing the mapping
	#[arg(long, short = 'f', value_name = "PATH")]
	mapping_file: Option<PathBuf>,

	/// Tile server port used in generated URLs
	#[arg(long, value_name = "PORT", default_value_t = 8080)]
	port: u16,

	/// Base URL override for generated URLs (defaults to http://localhost:<port>)
	#[arg(long, value_name = "URL")]
	base_url: Option<String>,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	let mapping = match resolve_mapping(cli.mapping.as_deref(), cli.mapping_file.as_deref()) {
		Ok(mapping) => mapping,
		Err(e @ TilewireError::MutuallyExclusive { .. }) => {
			eprintln!("{e}");
			return Ok(ExitCode::from(EXIT_CONFLICTING_OPTIONS));
		}
		Err(e) => return Err(e).context("Failed to load source mapping"),
	};

	let mut style = match cli.input {
		Some(ref path) => load_style_from_file(path)
			.with_context(|| format!("Failed to load style from {}", path.display()))?,
		None => {
			println!("Fetching original style from {DEFAULT_REMOTE_STYLE_URL}");
			load_style_from_url(DEFAULT_REMOTE_STYLE_URL)
				.context("Failed to fetch upstream style")?
		}
	};

	let endpoint = LocalEndpoint::resolve(cli.port, cli.base_url.as_deref());
	let report = rewrite_style(&mut style, &mapping, &endpoint);

	for change in &report.changes {
		println!("{}: {} -> {}", change.field, change.before, change.after);
	}
	if !report.rewritten_sources.is_empty() {
		println!(
			"Rewrote tile URLs for sources: {}",
			report.rewritten_sources.join(", ")
		);
	}
	for warning in &report.warnings {
		eprintln!("WARNING: {warning}");
	}

	save_style(&style, &cli.output)
		.with_context(|| format!("Failed to write {}", cli.output.display()))?;
	println!("Wrote modified style to {}", cli.output.display());

	Ok(ExitCode::SUCCESS)
}
