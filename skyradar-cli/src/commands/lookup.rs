//! Lookup command - find one aircraft by callsign.

use skyradar::simulator::SimulatorConfig;
use skyradar::source::SourceFactory;

use super::common::{resolve_source, resolve_timeout, SourceArgs};
use crate::error::CliError;
use crate::runner::CliRunner;
use crate::ui::dashboard::utils::record_summary;

/// Arguments for the lookup command.
pub struct LookupArgs {
    pub label: String,
    pub source: SourceArgs,
    pub debug: bool,
}

/// Run the lookup command.
pub fn run(args: LookupArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args.debug, false)?;
    runner.log_startup("lookup");
    let config = runner.config();

    let simulator =
        SimulatorConfig::new(config.simulator.target_count).with_seed(config.simulator.seed);
    let source_config = resolve_source(&args.source, simulator, config)?;
    let timeout = resolve_timeout(args.source.timeout, config);
    let source = SourceFactory::new(timeout).create(&source_config)?;

    match source.fetch_by_label(&args.label)? {
        Some(record) => {
            for line in record_summary(&record) {
                println!("{}", line);
            }
        }
        None => {
            println!(
                "No aircraft with callsign '{}' found via {}",
                args.label.trim(),
                source.name()
            );
        }
    }

    Ok(())
}
