use rateconv::common::{logger, types::AnyResult};
use rateconv::configs::Config;
use rateconv::job;
use tracing::{error, info};

fn main() -> AnyResult<()> {
    let config_path = std::env::args().nth(1);
    let config = Config::load(config_path.as_deref())?;

    logger::init(&config);
    info!(
        "rateconv {} starting ({:?}, {:?})",
        env!("CARGO_PKG_VERSION"),
        config.converter.interpolation,
        config.converter.output_mode
    );

    match job::run(&config.job, &config.converter) {
        Ok(report) => {
            info!(
                "Wrote {} ({} frames, {} from drain)",
                config.job.output, report.frames_out, report.drained
            );
            Ok(())
        }
        Err(e) => {
            error!("Conversion failed: {}", e);
            Err(e.into())
        }
    }
}
