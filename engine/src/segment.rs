//! Path segmentation
//!
//! A `Path` is the list of consecutive segments between waypoints, each one annotated with its
//! length and the distance covered before it starts.  It is a derived value: rebuild it whenever
//! the waypoint list changes, there is no in-place update.
//!

use tracing::{debug, trace};

use crate::{distance, initial_bearing, sample, GeoPoint, SampledPose};

/// One leg between two consecutive waypoints.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathSegment {
    pub start: GeoPoint,
    pub end: GeoPoint,
    /// Great-circle length in meters
    pub length: f64,
    /// Sum of the lengths of all previous segments
    pub cumulative: f64,
    /// Initial bearing from `start` to `end`, in `[0, 360)`
    pub bearing: f64,
    pub start_index: usize,
    pub end_index: usize,
}

impl PathSegment {
    /// Distance along the path where this segment ends.
    ///
    #[inline]
    pub fn end_distance(&self) -> f64 {
        self.cumulative + self.length
    }
}

/// Build all segments for the given ordered points.
///
/// Returns the segments and the total length of the path.  Fewer than 2 points give no segment
/// and a total of 0.
///
#[tracing::instrument(skip(waypoints), fields(n = waypoints.len()))]
pub fn build_segments<T: AsRef<GeoPoint>>(waypoints: &[T]) -> (Vec<PathSegment>, f64) {
    trace!("enter");

    let mut total = 0.;
    let segments: Vec<_> = waypoints
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let (start, end) = (*pair[0].as_ref(), *pair[1].as_ref());
            let length = distance(&start, &end);
            let seg = PathSegment {
                start,
                end,
                length,
                cumulative: total,
                bearing: initial_bearing(&start, &end),
                start_index: i,
                end_index: i + 1,
            };
            total += length;
            seg
        })
        .collect();

    debug!("{} segments, {:.1} m", segments.len(), total);
    (segments, total)
}

/// A segmented path.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
    total: f64,
}

impl Path {
    pub fn build<T: AsRef<GeoPoint>>(waypoints: &[T]) -> Self {
        let (segments, total) = build_segments(waypoints);
        Self { segments, total }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Total length in meters
    ///
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Pose at `progress` along the path, see [`sample()`].
    ///
    #[inline]
    pub fn sample(&self, progress: f64) -> Option<SampledPose> {
        sample(progress, &self.segments, self.total)
    }
}
