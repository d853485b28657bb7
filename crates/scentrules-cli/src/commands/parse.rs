//! Parse command - build the rule list from rulebook text.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use scentrules_core::{AuthoritativeMeasurements, RulebookError, RulebookParser};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Rulebook text (.txt) or a JSON array of page strings (.json)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Authoritative measurement overrides (JSON)
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

pub fn run(args: ParseArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::config::load(config_path)?;

    if !args.input.exists() {
        return Err(RulebookError::InputNotFound {
            path: args.input.clone(),
        }
        .into());
    }

    info!("Parsing rulebook: {}", args.input.display());

    let parser = RulebookParser::new(&config)?;
    let mut outcome = if is_page_array(&args.input) {
        let pages = read_pages(&args.input)?;
        debug!("Read {} pages", pages.len());
        parser.parse_pages(&pages)?
    } else {
        parser.parse(&fs::read_to_string(&args.input)?)?
    };

    let overrides_path = args.overrides.or(config.output.overrides_path);
    let dataset = overrides_path
        .as_deref()
        .and_then(AuthoritativeMeasurements::load_optional);
    let overridden = outcome.apply_overrides(dataset.as_ref());

    // Serialize fully before writing so a failure leaves no partial output
    let json = outcome.to_json(config.output.pretty && !args.compact)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &json)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", json);
    }

    eprintln!(
        "{} {} rules ({} authoritative, {} skipped blocks)",
        style("ℹ").blue(),
        outcome.rules.len(),
        overridden,
        outcome.skipped_blocks
    );
    for warning in &outcome.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn is_page_array(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

fn read_pages(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        anyhow::anyhow!(
            "{} is not a JSON array of page strings: {}",
            path.display(),
            e
        )
    })
}
