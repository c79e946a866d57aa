//! JSON transcript export
//!
//! A transcript is the finished [`DebateSession`] plus the improvement
//! summary derived from it, written as one pretty-printed JSON document.

use debate_domain::{DebateSession, ImprovementEntry, improvement_summary};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub const TRANSCRIPT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("transcript I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("transcript is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported transcript version {0}")]
    UnsupportedVersion(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub version: u32,
    /// RFC 3339 time the transcript was written
    pub exported_at: String,
    pub session: DebateSession,
    #[serde(default)]
    pub improvements: Vec<ImprovementEntry>,
}

impl Transcript {
    pub fn new(session: DebateSession) -> Self {
        let improvements = improvement_summary(&session);
        Self {
            version: TRANSCRIPT_VERSION,
            exported_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            session,
            improvements,
        }
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), TranscriptError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        info!(
            "Wrote transcript ({} turns) to {}",
            self.session.base_turn_count(),
            path.display()
        );
        Ok(())
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, TranscriptError> {
        let reader = BufReader::new(File::open(path)?);
        let transcript: Transcript = serde_json::from_reader(reader)?;
        if transcript.version != TRANSCRIPT_VERSION {
            return Err(TranscriptError::UnsupportedVersion(transcript.version));
        }
        Ok(transcript)
    }
}

/// Write `session` as a transcript at `path`
pub fn export_transcript(
    session: &DebateSession,
    path: impl AsRef<Path>,
) -> Result<Transcript, TranscriptError> {
    let transcript = Transcript::new(session.clone());
    transcript.write(path)?;
    Ok(transcript)
}
