use std::path::Path;

use eyre::Result;
use tracing::{info, trace};

use waypath_formats::Mission;

pub use list::*;
pub use replay::*;
pub use sample::*;
pub use stats::*;

mod list;
mod replay;
mod sample;
mod stats;

/// Read a mission file and check it before anything is computed from it.
///
#[tracing::instrument]
pub fn load_mission(fname: &Path) -> Result<Mission> {
    trace!("enter");

    let mission = Mission::load(fname)?;
    mission.validate()?;
    info!("mission {:?}: {} waypoints", mission.name, mission.len());
    Ok(mission)
}
