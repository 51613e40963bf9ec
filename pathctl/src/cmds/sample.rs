use eyre::Result;
use tracing::trace;

use waypath_engine::Path;

use crate::{load_mission, SampleOpts};

/// Sample the path of a mission at the given progress.
///
#[tracing::instrument]
pub fn sample_mission(opts: &SampleOpts) -> Result<String> {
    trace!("enter");

    let mission = load_mission(&opts.file)?;
    let path = Path::build(&mission.waypoints);

    let res = match path.sample(opts.progress) {
        Some(pose) => {
            let wp = &mission.waypoints[pose.segment];
            format!(
                "position {}\nheading {:.1}°\nleaving waypoint {} ({})",
                pose.position,
                pose.heading,
                pose.segment,
                wp.label()
            )
        }
        None => format!("no path in {}, need two distinct waypoints", opts.file.display()),
    };
    Ok(res)
}
