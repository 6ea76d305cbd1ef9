//! Domain models that mirror the SQLite schema and get passed between the
//! persistence layer and the HTML views. They stay plain data holders so the
//! handlers can focus on request flow.

use std::fmt;

use chrono::{DateTime, Utc};

/// Workflow stage a song is in. Stored as free text: the form offers these
/// three values but whatever the client submits is persisted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongStatus {
    Draft,
    Recording,
    Complete,
}

impl SongStatus {
    /// Every status offered by the song form, in display order.
    pub const ALL: [SongStatus; 3] = [SongStatus::Draft, SongStatus::Recording, SongStatus::Complete];

    pub fn as_str(self) -> &'static str {
        match self {
            SongStatus::Draft => "draft",
            SongStatus::Recording => "recording",
            SongStatus::Complete => "complete",
        }
    }

    /// Map a stored value back to a known status, if it is one.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == raw)
    }
}

impl Default for SongStatus {
    fn default() -> Self {
        SongStatus::Draft
    }
}

impl fmt::Display for SongStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
/// One composition. Rows come from the `songs` table.
pub struct Song {
    /// Primary key from the SQLite store.
    pub id: i64,
    /// Title shown on the dashboard and detail page.
    pub title: String,
    /// Raw status text; see [`SongStatus`] for the values the UI knows about.
    pub status: String,
    /// Carried in the schema for later use; no handler reads or writes it.
    pub is_ai_generated: bool,
    pub date_created: DateTime<Utc>,
    /// Bumped whenever a verse of this song is added, edited or removed.
    pub last_modified: DateTime<Utc>,
}

impl Song {
    /// Known status for styling, falling back to `None` for free-form values.
    pub fn known_status(&self) -> Option<SongStatus> {
        SongStatus::parse(&self.status)
    }
}

#[derive(Debug, Clone)]
/// A single verse of lyrics. Rows come from the `lyrics` table and always
/// belong to exactly one song.
pub struct Verse {
    pub id: i64,
    pub song_id: i64,
    /// Ordering key within the song. Not unique: two verses may share a number.
    pub verse_number: i64,
    pub lyrics_text: String,
    pub date_created: DateTime<Utc>,
}
