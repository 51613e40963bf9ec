use waypath_formats::WaypointKind;

use crate::ListSubCommand;

/// Fetch the list of waypoint kinds and their description.
///
pub fn list_info(cmd: &ListSubCommand) -> String {
    match cmd {
        ListSubCommand::Kinds => WaypointKind::list(),
    }
}
