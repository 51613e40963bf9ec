use serde::{Deserialize, Serialize};
use strum::{EnumMessage, EnumString, IntoEnumIterator, VariantNames};
use tabled::builder::Builder;
use tabled::settings::Style;

/// What the vehicle is supposed to do at a given waypoint.
///
/// Only `Waypoint` matters for the path itself, the others are carried along so that a mission
/// file survives a round through our tools untouched.
///
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Deserialize,
    PartialEq,
    Eq,
    Serialize,
    strum::Display,
    EnumMessage,
    EnumString,
    strum::EnumIter,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WaypointKind {
    /// Fly through
    #[default]
    #[strum(message = "Fly to the position and continue")]
    Waypoint,
    #[strum(message = "Climb to altitude from the current position")]
    Takeoff,
    #[strum(message = "Land at the position")]
    Land,
    #[strum(message = "Hold at the position for loiter_time seconds")]
    Loiter,
    #[strum(message = "Survey pass, flown as a plain waypoint")]
    Survey,
    #[strum(message = "Circle the position at the given radius")]
    Orbit,
}

impl WaypointKind {
    /// List all waypoint kinds into a string using `tabled`.
    ///
    pub fn list() -> String {
        let header = vec!["Name", "Description"];

        let mut builder = Builder::default();
        builder.push_record(header);

        WaypointKind::iter().for_each(|k| {
            let name = k.to_string();
            let descr = k.get_message().unwrap_or_default().to_string();
            builder.push_record(vec![name, descr]);
        });
        let allk = builder.build().with(Style::modern()).to_string();
        format!("List all waypoint types:\n{allk}")
    }

    /// Plain list of names
    ///
    pub fn names() -> &'static [&'static str] {
        Self::VARIANTS
    }
}
