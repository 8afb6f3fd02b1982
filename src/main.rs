use std::process::ExitCode;
use tracing::{debug, info};

use ncaa_sponsorship::config::Config;
use ncaa_sponsorship::error::Result;
use ncaa_sponsorship::logging;
use ncaa_sponsorship::pipeline::{Pipeline, PipelineResult};

fn run() -> Result<PipelineResult> {
    let config = Config::load()?;
    info!(
        input = %config.input_path.display(),
        output = %config.output_path.display(),
        data_year = config.data_year,
        "Starting sponsorship extraction"
    );
    Pipeline::run(&config)
}

fn main() -> ExitCode {
    // Initialize logging; the guard (when file logging is active) flushes on drop
    let _guard = logging::init_logging();

    match run() {
        Ok(result) => {
            println!(
                "Wrote {} rows → {}",
                result.records_written, result.output_file
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!("Extraction failed: {}", e);
            eprintln!("ERROR: {}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
