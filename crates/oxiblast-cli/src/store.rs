use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use oxiblast_engine::HighScoreStore;
use serde::{Deserialize, Serialize};

const FILE_NAME: &str = "high_score.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
struct HighScoreRecord {
    high_score: u64,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum StoreError {
    #[display("high score file I/O failed: {_0}")]
    Io(io::Error),
    #[display("high score file is malformed: {_0}")]
    Json(serde_json::Error),
}

/// High score persisted as `high_score.json` in a data directory.
///
/// A missing file reads as zero. The directory is created on first write.
#[derive(Debug, Clone)]
pub struct JsonFileHighScoreStore {
    path: PathBuf,
}

impl JsonFileHighScoreStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileHighScoreStore {
    type Error = StoreError;

    fn read(&self) -> Result<u64, Self::Error> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let record: HighScoreRecord = serde_json::from_reader(BufReader::new(file))?;
        Ok(record.high_score)
    }

    fn write(&mut self, value: u64) -> Result<(), Self::Error> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let record = HighScoreRecord {
            high_score: value,
            updated_at: Utc::now(),
        };
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, &record)?;
        writeln!(writer)?;
        writer.flush()?;
        tracing::debug!(path = %self.path.display(), value, "high score saved");
        Ok(())
    }
}
