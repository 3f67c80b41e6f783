use lection::{AppResult, Settings, bootstrap, telemetry};
use tracing::{debug, info};

fn main() -> AppResult<()> {
    let settings = Settings::load()?;
    telemetry::init(&settings.log_filter);

    let context = bootstrap(&settings)?;
    debug!("Beans:\n{}", context.describe());
    info!(?context, "Started");

    Ok(())
}
