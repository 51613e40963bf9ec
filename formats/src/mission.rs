//! Mission file
//!
//! A mission file is JSON, either a full mission object as produced by the planner:
//!
//! ```json
//! {
//!   "id": "m-1",
//!   "name": "Bridge survey",
//!   "description": "...",
//!   "waypoints": [
//!     { "id": "wp-0", "type": "takeoff", "position": { "lat": 48.57, "lng": 2.31, "alt": 30 }, "order": 0 }
//!   ],
//!   "estimated_duration": 15.5,
//!   "total_distance": 1200.0
//! }
//! ```
//!
//! or just the bare array of waypoints.
//!
//! Ordering: if every waypoint has an `order`, waypoints are sorted on it (stable), otherwise the
//! file order is used.  After loading, the position in `waypoints` is the only ordering index.
//!

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{GeoPoint, Status, WaypointKind};

/// One waypoint of a mission.
///
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Waypoint {
    /// Unique identifier within the mission
    pub id: String,
    /// What to do there
    #[serde(rename = "type", default)]
    pub kind: WaypointKind,
    /// Where
    pub position: GeoPoint,
    /// Order in the mission sequence, if the producer gave one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<usize>,
    /// Human-readable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Target speed toward the next waypoint in m/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Time to loiter in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loiter_time: Option<f64>,
    /// Radius for orbit/loiter in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Camera action at waypoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_action: Option<String>,
}

impl Waypoint {
    pub fn new(id: &str, position: GeoPoint) -> Self {
        Self {
            id: id.to_string(),
            position,
            ..Default::default()
        }
    }

    /// Name if any, id otherwise
    ///
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

impl AsRef<GeoPoint> for Waypoint {
    fn as_ref(&self) -> &GeoPoint {
        &self.position
    }
}

/// A mission plan, exclusively owning its waypoints.
///
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Mission {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Ordered list of waypoints
    pub waypoints: Vec<Waypoint>,
    /// Estimated duration in minutes, as given by the planner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<f64>,
    /// Total distance in meters, as given by the planner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// On-disk variants
///
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MissionFile {
    Full(Mission),
    Bare(Vec<Waypoint>),
}

impl Mission {
    pub fn new(name: &str, waypoints: Vec<Waypoint>) -> Self {
        Self {
            name: name.to_string(),
            waypoints,
            ..Default::default()
        }
    }

    /// Read a mission from a JSON string.
    ///
    #[tracing::instrument(skip(data))]
    pub fn from_json(data: &str) -> Result<Self, Status> {
        trace!("enter");

        let file: MissionFile =
            serde_json::from_str(data).map_err(|e| Status::BadMission(e.to_string()))?;
        let mut mission = match file {
            MissionFile::Full(m) => m,
            MissionFile::Bare(waypoints) => Mission::new("", waypoints),
        };

        if !mission.waypoints.is_empty() && mission.waypoints.iter().all(|w| w.order.is_some()) {
            trace!("sorting on order");
            mission.waypoints.sort_by_key(|w| w.order);
        }
        debug!("{} waypoints", mission.waypoints.len());
        Ok(mission)
    }

    /// Load a mission file.
    ///
    #[tracing::instrument(skip_all)]
    pub fn load(fname: impl AsRef<Path>) -> Result<Self, Status> {
        let fname = fname.as_ref();
        let data = fs::read_to_string(fname)
            .map_err(|e| Status::Unreadable(fname.display().to_string(), e.to_string()))?;
        Self::from_json(&data)
    }

    /// Check every waypoint for out-of-range values and ids for uniqueness.
    ///
    #[tracing::instrument(skip(self))]
    pub fn validate(&self) -> Result<(), Status> {
        trace!("enter");

        let mut seen = HashSet::new();
        for wp in &self.waypoints {
            let p = &wp.position;
            if !(-90.0..=90.0).contains(&p.lat) {
                return Err(Status::BadLatitude(wp.id.clone(), p.lat));
            }
            if !(-180.0..=180.0).contains(&p.lon) {
                return Err(Status::BadLongitude(wp.id.clone(), p.lon));
            }
            let checks = [
                ("altitude", p.alt),
                ("speed", wp.speed),
                ("loiter_time", wp.loiter_time),
                ("radius", wp.radius),
            ];
            for (what, v) in checks {
                if let Some(v) = v {
                    if v.is_nan() || v < 0. {
                        return Err(Status::Negative(wp.id.clone(), what, v));
                    }
                }
            }
            if !seen.insert(wp.id.as_str()) {
                return Err(Status::DuplicateId(wp.id.clone()));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Positions only, in mission order
    ///
    pub fn points(&self) -> Vec<GeoPoint> {
        self.waypoints.iter().map(|w| w.position).collect()
    }
}
