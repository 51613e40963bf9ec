//! Implement the `replay` command.
//!
//! The whole replay is computed with synthetic time, one step of `1 / fps` seconds per frame, so
//! it runs as fast as we can write the frames out.  Frames are not kept around except for the
//! table output.
//!

use std::fs::File;
use std::io::{self, Write};

use eyre::Result;
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{debug, info, trace};

use waypath_engine::{Frame, MissionStats, Playback, Replay};

use crate::{load_mission, OutputFormat, PathctlConfig, ReplayOpts, Status};

/// Flat version of a `Frame` for CSV output.
///
#[derive(Debug, Serialize)]
struct FrameRecord {
    time: f64,
    progress: f64,
    playing: bool,
    waypoint: usize,
    lat: Option<f64>,
    lon: Option<f64>,
    alt: Option<f64>,
    heading: Option<f64>,
}

impl From<&Frame> for FrameRecord {
    fn from(f: &Frame) -> Self {
        FrameRecord {
            time: f.time,
            progress: f.progress,
            playing: f.playing,
            waypoint: f.waypoint,
            lat: f.pose.map(|p| p.position.lat),
            lon: f.pose.map(|p| p.position.lon),
            alt: f.pose.and_then(|p| p.position.alt),
            heading: f.pose.map(|p| p.heading),
        }
    }
}

/// Replay a mission file and write all frames in the requested format.
///
/// Returns the number of frames.
///
#[tracing::instrument(skip(cfg))]
pub fn replay_mission(cfg: &PathctlConfig, opts: &ReplayOpts) -> Result<usize> {
    trace!("enter");

    let mission = load_mission(&opts.file)?;

    let fps = opts.fps.unwrap_or(cfg.playback.fps);
    if fps == 0 {
        return Err(Status::BadFps.into());
    }

    let duration = if opts.realtime {
        let stats = MissionStats::compute(&mission.waypoints, cfg.cruise_speed)?;
        info!("real time replay, {:.1} s", stats.flight_time);
        stats.flight_time
    } else {
        opts.duration.unwrap_or(cfg.playback.duration)
    };

    let mut playback = Playback::new(duration);
    playback.set_speed(opts.speed.unwrap_or(cfg.playback.speed));
    debug!("playback = {playback:?}");

    let mut replay = Replay::new(&mission.waypoints, playback);
    if let Some(t) = opts.seek {
        replay.seek(t);
    }

    let out: Box<dyn Write> = match &opts.output {
        Some(fname) => Box::new(File::create(fname)?),
        None => Box::new(io::stdout().lock()),
    };
    let mut wtr = FrameWriter::new(out, opts.format);

    // First frame is the starting position
    //
    wtr.write(&replay.frame())?;
    replay.play();
    let n = replay.try_run(1. / f64::from(fps), |f| wtr.write(f))?;
    wtr.finish()?;
    Ok(n + 1)
}

/// Output for frames.  CSV and JSON are written as they come, a table needs all frames before
/// it can be laid out.
///
enum FrameWriter<W: Write> {
    Table(W, Vec<Frame>),
    Csv(csv::Writer<W>),
    Json(W),
}

impl<W: Write> FrameWriter<W> {
    fn new(out: W, fmt: OutputFormat) -> Self {
        trace!("writing frames as {fmt}");
        match fmt {
            OutputFormat::Table => FrameWriter::Table(out, vec![]),
            OutputFormat::Csv => FrameWriter::Csv(csv::Writer::from_writer(out)),
            OutputFormat::Json => FrameWriter::Json(out),
        }
    }

    fn write(&mut self, f: &Frame) -> Result<()> {
        match self {
            FrameWriter::Table(_, frames) => frames.push(*f),
            FrameWriter::Csv(wtr) => wtr.serialize(FrameRecord::from(f))?,
            FrameWriter::Json(out) => writeln!(out, "{}", serde_json::to_string(f)?)?,
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        match self {
            FrameWriter::Table(mut out, frames) => {
                writeln!(out, "{}", frame_table(&frames))?;
                out.flush()?;
            }
            FrameWriter::Csv(mut wtr) => wtr.flush()?,
            FrameWriter::Json(mut out) => out.flush()?,
        }
        Ok(())
    }
}

/// Write frames into `out` as `fmt`.
///
pub fn write_frames<W: Write>(out: W, frames: &[Frame], fmt: OutputFormat) -> Result<()> {
    let mut wtr = FrameWriter::new(out, fmt);
    for f in frames {
        wtr.write(f)?;
    }
    wtr.finish()
}

/// Display frames using `tabled`.
///
fn frame_table(frames: &[Frame]) -> String {
    let header = vec![
        "Time", "Progress", "Playing", "WP", "Lat", "Lon", "Alt", "Heading",
    ];

    let mut builder = Builder::default();
    builder.push_record(header);

    frames.iter().for_each(|f| {
        let (lat, lon, alt, heading) = match f.pose {
            Some(p) => (
                format!("{:.6}", p.position.lat),
                format!("{:.6}", p.position.lon),
                p.position.alt.map(|a| format!("{a:.1}")).unwrap_or_default(),
                format!("{:.1}", p.heading),
            ),
            None => Default::default(),
        };
        builder.push_record(vec![
            format!("{:.3}", f.time),
            format!("{:.4}", f.progress),
            f.playing.to_string(),
            f.waypoint.to_string(),
            lat,
            lon,
            alt,
            heading,
        ]);
    });
    builder.build().with(Style::modern()).to_string()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use waypath_engine::GeoPoint;

    use super::*;

    fn frames() -> Vec<Frame> {
        let pts = [GeoPoint::new(0., 0.), GeoPoint::new(0., 0.01)];
        let mut r = Replay::new(&pts, Playback::new(1.));
        let mut frames = vec![r.frame()];
        r.play();
        r.run(0.5, |f| frames.push(*f)).unwrap();
        frames
    }

    #[test]
    fn test_write_csv() {
        let mut buf = vec![];
        write_frames(&mut buf, &frames(), OutputFormat::Csv).unwrap();

        let s = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = s.lines().collect();
        assert_eq!(4, lines.len());
        assert_eq!(
            "time,progress,playing,waypoint,lat,lon,alt,heading",
            lines[0]
        );
        assert!(lines[1].starts_with("0.0,0.0,false,0,"));
        assert!(lines[3].starts_with("1.0,1.0,false,0,"));
    }

    #[test]
    fn test_write_json() {
        let mut buf = vec![];
        write_frames(&mut buf, &frames(), OutputFormat::Json).unwrap();

        let s = String::from_utf8(buf).unwrap();
        let last: serde_json::Value = serde_json::from_str(s.lines().last().unwrap()).unwrap();
        assert_eq!(1., last["progress"]);
        assert_eq!(false, last["playing"]);
        assert_eq!(0.01, last["pose"]["position"]["lon"]);
    }

    /// Writer accepting at most `.0` bytes
    ///
    struct Full(usize);

    impl Write for Full {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.0 < buf.len() {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "full"));
            }
            self.0 -= buf.len();
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_json_frames_are_streamed() {
        let pts = [GeoPoint::new(0., 0.), GeoPoint::new(0., 0.01)];
        let mut r = Replay::new(&pts, Playback::new(1000.));
        r.play();

        // the writer fills up after a few dozen lines, long before the end of the replay
        let mut wtr = FrameWriter::new(Full(4096), OutputFormat::Json);
        let res = r.try_run(0.01, |f| wtr.write(f));
        assert!(res.is_err());
        assert!(r.playback().time() < 10.);
        assert!(r.playback().is_playing());
    }

    #[test]
    fn test_table_frames_are_buffered() {
        let pts = [GeoPoint::new(0., 0.), GeoPoint::new(0., 0.01)];
        let mut r = Replay::new(&pts, Playback::new(10.));
        r.play();

        let mut wtr = FrameWriter::new(Full(4096), OutputFormat::Table);
        assert!(r.try_run(0.01, |f| wtr.write(f)).is_ok());
        assert!(!r.playback().is_playing());
        assert!(wtr.finish().is_err());
    }

    #[rstest]
    #[case(OutputFormat::Table, "Heading")]
    #[case(OutputFormat::Csv, "heading")]
    #[case(OutputFormat::Json, "\"heading\"")]
    fn test_write_formats(#[case] fmt: OutputFormat, #[case] needle: &str) {
        let mut buf = vec![];
        write_frames(&mut buf, &frames(), fmt).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains(needle));
    }
}
