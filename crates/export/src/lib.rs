//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod path {
    use std::io::{self, Write};

    use descent_core::vector::Vector3;

    const HEADER: &str = "x,y,z";

    /// Write the path CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// Write one row per point, in path order.
    pub fn write_csv(writer: &mut dyn Write, points: &[Vector3]) -> io::Result<()> {
        write_header(writer)?;
        for [x, y, z] in points {
            writeln!(writer, "{:.9},{:.9},{:.9}", x, y, z)?;
        }
        writer.flush()
    }
}

pub mod telemetry {
    use std::io::{self, Write};
    use std::path::Path;

    use descent_playback::TelemetryFrame;
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    /// Describes where a telemetry table came from.
    #[derive(Debug)]
    pub struct Metadata<'a> {
        pub source: &'a str,
        pub smooth_factor: usize,
        pub scene_scale: f64,
        pub duration_s: f64,
        pub control_points: usize,
        pub path_points: usize,
    }

    #[derive(Serialize)]
    struct Sidecar<'a> {
        source: &'a str,
        smooth_factor: usize,
        scene_scale: f64,
        duration_s: f64,
        control_points: usize,
        path_points: usize,
        samples: &'a [TelemetryFrame],
    }

    /// Write sampled frames as CSV with a header row.
    pub fn write_csv(writer: &mut dyn Write, frames: &[TelemetryFrame]) -> csv::Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for frame in frames {
            csv_writer.serialize(frame)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write a pretty-printed JSON document with metadata and frames.
    pub fn write_json(output: &Path, meta: &Metadata<'_>, frames: &[TelemetryFrame]) -> io::Result<()> {
        let mut writer = crate::writer_for_path(output)?;
        let sidecar = Sidecar {
            source: meta.source,
            smooth_factor: meta.smooth_factor,
            scene_scale: meta.scene_scale,
            duration_s: meta.duration_s,
            control_points: meta.control_points,
            path_points: meta.path_points,
            samples: frames,
        };
        to_writer_pretty(&mut writer, &sidecar)?;
        writeln!(writer)?;
        writer.flush()
    }

    /// Choose CSV or JSON from the file extension; anything but `.json` is CSV.
    pub fn write_for_extension(
        output: &Path,
        meta: &Metadata<'_>,
        frames: &[TelemetryFrame],
    ) -> io::Result<()> {
        let is_json = output
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            return write_json(output, meta, frames);
        }
        let mut writer = crate::writer_for_path(output)?;
        write_csv(&mut writer, frames)?;
        Ok(())
    }
}
