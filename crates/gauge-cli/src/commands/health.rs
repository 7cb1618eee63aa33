use gauge_config::GaugeConfig;
use gauge_health::HealthAggregator;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `gauge health`. Prints the report and fails the process when any
/// service is down.
pub async fn handle(config: &GaugeConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = HealthAggregator::from_config(config).check_all().await;
    output(&report, flags.format)?;

    if !report.all_healthy() {
        let down = report
            .services()
            .filter(|service| report.get(service) == Some(false))
            .collect::<Vec<_>>();
        anyhow::bail!("unhealthy services: {}", down.join(", "));
    }
    Ok(())
}
