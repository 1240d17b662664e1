use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::{Result, StarHistoryError};
use crate::models::{StarEvent, StarTimeline};

pub const CSV_HEADER: &str = "starred_at";

/// Writes the header and one timestamp per row, replacing any existing file.
pub fn write_stars_csv(path: impl AsRef<Path>, timeline: &StarTimeline) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);

    writeln!(writer, "{}", CSV_HEADER)?;
    for event in timeline {
        writeln!(writer, "{}", event)?;
    }
    writer.flush()?;

    info!("Star data saved to {}", path.display());
    Ok(())
}

/// Reads a file produced by [`write_stars_csv`] back into a timeline.
pub fn read_stars_csv(path: impl AsRef<Path>) -> Result<StarTimeline> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = reader.lines();

    match lines.next().transpose()? {
        Some(header) if header.trim_end_matches('\r') == CSV_HEADER => {}
        Some(header) => {
            return Err(StarHistoryError::InvalidCsv(format!(
                "expected header {:?}, found {:?}",
                CSV_HEADER, header
            )))
        }
        None => return Err(StarHistoryError::InvalidCsv("file is empty".to_string())),
    }

    let mut timeline = StarTimeline::new();
    for line in lines {
        let line = line?;
        let value = line.trim_end_matches('\r');
        if value.is_empty() {
            continue;
        }
        timeline.push(StarEvent::parse(value)?);
    }

    Ok(timeline)
}
