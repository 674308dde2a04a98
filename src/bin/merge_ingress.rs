use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use tilewire::ingress::{
	IngressRule, MergeOutcome, load_document, merge_rule, save_document, write_backup,
};

/// Exit code when the config file does not exist.
const EXIT_CONFIG_MISSING: u8 = 3;

#[derive(Parser)]
#[command(name = "merge-ingress")]
#[command(
	author,
	version,
	about = "Merge an ingress rule into a tunnel-proxy YAML config"
)]
struct Cli {
	/// Path to the tunnel-proxy config YAML
	#[arg(long, value_name = "PATH")]
	config: PathBuf,

	/// Hostname-based ingress (e.g. tiles.example.com)
	#[arg(long, value_name = "HOSTNAME")]
	hostname: Option<String>,

	/// Path-based ingress (e.g. /data/*)
	#[arg(long, value_name = "PATTERN")]
	path: Option<String>,

	/// Local service URL to route to (e.g. http://127.0.0.1:8080)
	#[arg(long, value_name = "URL")]
	service: String,
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

	if !cli.config.exists() {
		eprintln!("Config file {} does not exist", cli.config.display());
		return Ok(ExitCode::from(EXIT_CONFIG_MISSING));
	}

	let mut doc = load_document(&cli.config)
		.with_context(|| format!("Failed to load {}", cli.config.display()))?;

	let rule = IngressRule {
		service: cli.service,
		hostname: cli.hostname,
		path: cli.path,
	};

	let outcome = merge_rule(&mut doc, &rule).context("Failed to merge ingress rule")?;

	if outcome == MergeOutcome::Unchanged {
		println!("UNCHANGED");
		return Ok(ExitCode::SUCCESS);
	}

	write_backup(&cli.config)
		.with_context(|| format!("Failed to back up {}", cli.config.display()))?;

	save_document(&doc, &cli.config)
		.with_context(|| format!("Failed to write {}", cli.config.display()))?;

	println!("MODIFIED");
	Ok(ExitCode::SUCCESS)
}
