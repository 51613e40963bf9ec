use eyre::Result;
use tracing::trace;

use waypath_engine::MissionStats;

use crate::{load_mission, PathctlConfig, StatsOpts};

/// Compute and format the statistics of a mission file.
///
#[tracing::instrument(skip(cfg))]
pub fn mission_stats(cfg: &PathctlConfig, opts: &StatsOpts) -> Result<String> {
    trace!("enter");

    let mission = load_mission(&opts.file)?;
    let cruise = opts.cruise.unwrap_or(cfg.cruise_speed);
    let stats = MissionStats::compute(&mission.waypoints, cruise)?;

    let name = if mission.name.is_empty() {
        opts.file.display().to_string()
    } else {
        mission.name.clone()
    };
    Ok(format!("Mission {name}\n{}", stats.to_table()))
}
