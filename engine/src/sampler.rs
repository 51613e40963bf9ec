//! Position sampler
//!
//! Map a progress fraction onto the segmented path.  The sampler is stateless: the same progress
//! always gives the same pose, whatever was asked before.
//!

use serde::Serialize;

use crate::{lerp, GeoPoint, PathSegment};

/// Where the vehicle is at a given progress, and where it is heading.
///
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SampledPose {
    pub position: GeoPoint,
    /// Bearing of the active segment, constant over the whole segment
    pub heading: f64,
    /// Index of the waypoint the active segment starts from
    pub segment: usize,
}

/// Sample the path at `progress` (clamped into `[0, 1]`, NaN being 0).
///
/// Returns `None` if there is nothing to travel along, i.e. no segment or a total length of 0.
///
/// The active segment is the first one whose `[cumulative, cumulative + length]` range contains
/// the distance travelled, so zero-length segments never win over the one before them.
///
pub fn sample(progress: f64, segments: &[PathSegment], total: f64) -> Option<SampledPose> {
    if segments.is_empty() || total <= 0. || total.is_nan() {
        return None;
    }

    let progress = if progress.is_nan() {
        0.
    } else {
        progress.clamp(0., 1.)
    };
    let current = progress * total;

    // End distances never decrease so the first segment ending at or after `current` is the one.
    let idx = segments
        .partition_point(|s| s.end_distance() < current)
        .min(segments.len() - 1);
    let seg = &segments[idx];

    let local = if seg.length > 0. {
        ((current - seg.cumulative) / seg.length).clamp(0., 1.)
    } else {
        0.
    };

    Some(SampledPose {
        position: lerp(&seg.start, &seg.end, local),
        heading: seg.bearing,
        segment: seg.start_index,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{build_segments, distance, Path};

    #[inline]
    fn p(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon)
    }

    fn close(a: &GeoPoint, b: &GeoPoint) -> bool {
        (a.lat - b.lat).abs() < 1e-9 && (a.lon - b.lon).abs() < 1e-9
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![p(1., 1.)])]
    #[case(vec![p(1., 1.), p(1., 1.)])]
    fn test_sample_nothing_to_travel(#[case] pts: Vec<GeoPoint>) {
        let (segs, total) = build_segments(&pts);
        assert_eq!(None, sample(0.5, &segs, total));
    }

    #[test]
    fn test_sample_ends() {
        let pts = [p(0., 0.), p(0., 1.), p(1., 1.), p(1.5, 0.2)];
        let path = Path::build(&pts);

        let first = path.sample(0.).unwrap();
        assert!(close(&pts[0], &first.position));
        assert_eq!(0, first.segment);

        let last = path.sample(1.).unwrap();
        assert!(close(&pts[3], &last.position));
        assert_eq!(2, last.segment);
    }

    #[rstest]
    #[case(1e-12)]
    #[case(1e-6)]
    fn test_sample_total_overshoot(#[case] rel: f64) {
        let pts = [p(0., 0.), p(0., 1.), p(1., 1.)];
        let (segs, total) = build_segments(&pts);

        for t in [total * (1. + rel), total + 1.] {
            assert!(t > segs[1].end_distance());
            let pose = sample(1., &segs, t).unwrap();
            assert_eq!(segs[1].start_index, pose.segment);
            assert!(close(&pts[2], &pose.position));
            assert_eq!(segs[1].bearing, pose.heading);
        }
    }

    #[rstest]
    #[case(-0.5, 0.)]
    #[case(f64::NAN, 0.)]
    #[case(2., 1.)]
    fn test_sample_clamps_progress(#[case] inp: f64, #[case] same_as: f64) {
        let path = Path::build(&[p(0., 0.), p(0., 1.), p(1., 1.)]);
        assert_eq!(path.sample(same_as), path.sample(inp));
    }

    #[test]
    fn test_sample_midpoint_and_heading() {
        let path = Path::build(&[p(0., 0.), p(0., 2.)]);
        let pose = path.sample(0.5).unwrap();

        assert!(close(&p(0., 1.), &pose.position));
        assert!((pose.heading - 90.).abs() < 0.1);
        assert_eq!(0, pose.segment);
    }

    #[test]
    fn test_sample_heading_constant_per_segment() {
        let path = Path::build(&[p(10., 0.), p(20., 30.)]);
        let h: Vec<_> = [0., 0.3, 0.7, 1.]
            .iter()
            .map(|&t| path.sample(t).unwrap().heading)
            .collect();
        assert!(h.iter().all(|&x| x == h[0]));
    }

    #[test]
    fn test_sample_zero_length_prefers_earliest() {
        // a -> b and b -> c have the same length along the equator, b -> b is empty, so the
        // boundary sits exactly at 0.5.
        let (a, b, c) = (p(0., 0.), p(0., 1.), p(0., 2.));
        let path = Path::build(&[a, b, b, c]);
        let segs = path.segments();
        assert_eq!(segs[0].length, segs[2].length);
        let boundary = 0.5;

        let pose = path.sample(boundary).unwrap();
        assert_eq!(0, pose.segment);
        assert!(close(&b, &pose.position));

        // just after, we are on the last segment, skipping the empty one
        let pose = path.sample(boundary + 1e-6).unwrap();
        assert_eq!(2, pose.segment);
    }

    #[test]
    fn test_sample_leading_zero_length() {
        let (a, b) = (p(0., 0.), p(0., 1.));
        let path = Path::build(&[a, a, b]);

        let pose = path.sample(0.).unwrap();
        assert_eq!(0, pose.segment);
        assert!(close(&a, &pose.position));
        assert_eq!(0., pose.heading);

        let pose = path.sample(0.5).unwrap();
        assert_eq!(1, pose.segment);
    }

    #[test]
    fn test_sample_idempotent_and_non_monotonic() {
        let path = Path::build(&[p(0., 0.), p(0., 1.), p(1., 1.), p(1., 0.)]);
        let seq = [0.9, 0.1, 0.5, 0.1, 0.9, 0.5];
        let first: Vec<_> = seq.iter().map(|&t| path.sample(t)).collect();
        let again: Vec<_> = seq.iter().map(|&t| path.sample(t)).collect();
        assert_eq!(first, again);
        assert_eq!(first[1], first[3]);
        assert_eq!(first[0], first[4]);
    }

    #[test]
    fn test_sample_segment_contains_distance() {
        let pts = [p(0., 0.), p(0., 0.3), p(0.8, 0.3), p(0.8, 0.31), p(2., 1.)];
        let (segs, total) = build_segments(&pts);
        for i in 0..=100 {
            let t = i as f64 / 100.;
            let pose = sample(t, &segs, total).unwrap();
            let s = segs.iter().find(|s| s.start_index == pose.segment).unwrap();
            let d = t * total;
            assert!(s.cumulative <= d && d <= s.end_distance(), "{t}");
        }
    }

    #[test]
    fn test_sample_position_on_segment() {
        let (a, b) = (p(0., 0.), p(0., 1.));
        let path = Path::build(&[a, b]);
        let pose = path.sample(0.25).unwrap();
        let along = distance(&a, &pose.position);
        assert!((along - 0.25 * path.total()).abs() < 1.);
    }
}
