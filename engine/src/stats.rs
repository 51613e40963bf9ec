//! Mission statistics
//!
//! Per-leg distances and an estimation of the flight time.  Each leg is flown at the speed of the
//! waypoint it starts from, or at the cruise speed when that waypoint has none; loiter times are
//! added on top.
//!

use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{debug, trace};

use crate::{distance, distance_3d, initial_bearing, EngineError, Waypoint};

/// Default cruise speed in m/s
pub const DEFAULT_CRUISE_SPEED: f64 = 15.;

/// One leg of the mission
///
#[derive(Clone, Debug, PartialEq)]
pub struct Leg {
    pub from: String,
    pub to: String,
    /// Great-circle distance in meters
    pub distance: f64,
    /// Distance including the climb/descent
    pub distance_3d: f64,
    pub bearing: f64,
    /// Speed used for this leg in m/s
    pub speed: f64,
    /// Time to fly the leg in seconds
    pub time: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MissionStats {
    pub legs: Vec<Leg>,
    pub distance: f64,
    pub distance_3d: f64,
    /// Sum of all loiter times in seconds
    pub loiter: f64,
    /// Estimated flight time in seconds, legs and loiters
    pub flight_time: f64,
}

impl MissionStats {
    #[tracing::instrument(skip(waypoints), fields(n = waypoints.len()))]
    pub fn compute(waypoints: &[Waypoint], cruise_speed: f64) -> Result<Self, EngineError> {
        trace!("enter");

        if !cruise_speed.is_finite() || cruise_speed <= 0. {
            return Err(EngineError::BadCruiseSpeed(cruise_speed));
        }

        let legs: Vec<_> = waypoints
            .windows(2)
            .map(|pair| {
                let (a, b) = (&pair[0], &pair[1]);
                let speed = match a.speed {
                    Some(s) if s > 0. => s,
                    _ => cruise_speed,
                };
                let d3 = distance_3d(&a.position, &b.position);
                Leg {
                    from: a.label().to_string(),
                    to: b.label().to_string(),
                    distance: distance(&a.position, &b.position),
                    distance_3d: d3,
                    bearing: initial_bearing(&a.position, &b.position),
                    speed,
                    time: d3 / speed,
                }
            })
            .collect();

        let loiter: f64 = waypoints
            .iter()
            .filter_map(|w| w.loiter_time)
            .filter(|t| *t > 0.)
            .sum();
        let stats = MissionStats {
            distance: legs.iter().map(|l| l.distance).sum(),
            distance_3d: legs.iter().map(|l| l.distance_3d).sum(),
            flight_time: legs.iter().map(|l| l.time).sum::<f64>() + loiter,
            loiter,
            legs,
        };
        debug!("{:.1} m, {:.1} s", stats.distance, stats.flight_time);
        Ok(stats)
    }

    /// Display all legs and the totals using `tabled`.
    ///
    pub fn to_table(&self) -> String {
        let header = vec![
            "#",
            "From",
            "To",
            "Distance (m)",
            "3D (m)",
            "Bearing",
            "Speed (m/s)",
            "Time (s)",
        ];

        let mut builder = Builder::default();
        builder.push_record(header);

        self.legs.iter().enumerate().for_each(|(i, leg)| {
            builder.push_record(vec![
                i.to_string(),
                leg.from.clone(),
                leg.to.clone(),
                format!("{:.1}", leg.distance),
                format!("{:.1}", leg.distance_3d),
                format!("{:.1}°", leg.bearing),
                format!("{:.1}", leg.speed),
                format!("{:.1}", leg.time),
            ]);
        });
        builder.push_record(vec![
            "".to_string(),
            "Total".to_string(),
            "".to_string(),
            format!("{:.1}", self.distance),
            format!("{:.1}", self.distance_3d),
            "".to_string(),
            "".to_string(),
            format!("{:.1}", self.flight_time),
        ]);
        let allt = builder.build().with(Style::modern()).to_string();
        format!(
            "{} legs, loiter {:.0} s, estimated flight time {:.1} min\n{allt}",
            self.legs.len(),
            self.loiter,
            self.flight_time / 60.
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use waypath_formats::GeoPoint;

    use super::*;

    fn wp(id: &str, lat: f64, lon: f64) -> Waypoint {
        Waypoint::new(id, GeoPoint::new(lat, lon))
    }

    #[test]
    fn test_stats_empty() {
        let s = MissionStats::compute(&[], DEFAULT_CRUISE_SPEED).unwrap();
        assert!(s.legs.is_empty());
        assert_eq!(0., s.flight_time);

        let s = MissionStats::compute(&[wp("a", 0., 0.)], DEFAULT_CRUISE_SPEED).unwrap();
        assert!(s.legs.is_empty());
        assert_eq!(0., s.distance);
    }

    #[test]
    fn test_stats_cruise_speed() {
        let wps = [wp("a", 0., 0.), wp("b", 0., 0.01), wp("c", 0.01, 0.01)];
        let s = MissionStats::compute(&wps, 10.).unwrap();

        assert_eq!(2, s.legs.len());
        assert_eq!(("a", "b"), (s.legs[0].from.as_str(), s.legs[0].to.as_str()));
        assert_eq!(s.distance, s.distance_3d);
        assert!((s.flight_time - s.distance / 10.).abs() < 1e-9);
    }

    #[test]
    fn test_stats_waypoint_speed_and_loiter() {
        let mut a = wp("a", 0., 0.);
        a.speed = Some(5.);
        let mut b = wp("b", 0., 0.01);
        b.loiter_time = Some(30.);
        b.speed = Some(0.);
        let c = wp("c", 0.01, 0.01);

        let s = MissionStats::compute(&[a, b, c], 10.).unwrap();
        assert_eq!(5., s.legs[0].speed);
        // a zero speed falls back to cruise
        assert_eq!(10., s.legs[1].speed);
        assert_eq!(30., s.loiter);

        let exp = s.legs[0].distance / 5. + s.legs[1].distance / 10. + 30.;
        assert!((s.flight_time - exp).abs() < 1e-9);
    }

    #[test]
    fn test_stats_altitude() {
        let a = Waypoint::new("a", GeoPoint::new(0., 0.).with_alt(0.));
        let b = Waypoint::new("b", GeoPoint::new(0., 0.).with_alt(100.));
        let s = MissionStats::compute(&[a, b], 20.).unwrap();
        assert_eq!(0., s.distance);
        assert!((s.distance_3d - 100.).abs() < 1e-9);
        assert!((s.flight_time - 5.).abs() < 1e-9);
    }

    #[rstest]
    #[case(0.)]
    #[case(-2.)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_stats_bad_cruise(#[case] cruise: f64) {
        let r = MissionStats::compute(&[wp("a", 0., 0.), wp("b", 0., 1.)], cruise);
        assert!(matches!(r, Err(EngineError::BadCruiseSpeed(_))));
    }

    #[test]
    fn test_stats_table() {
        let wps = [wp("a", 0., 0.), wp("b", 0., 0.01)];
        let s = MissionStats::compute(&wps, DEFAULT_CRUISE_SPEED).unwrap();
        let t = s.to_table();
        assert!(t.contains("Total"));
        assert!(t.contains("1 legs"));
        assert!(t.contains("90.0°"));
    }
}
