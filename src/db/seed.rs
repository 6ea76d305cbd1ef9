use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::info;

use super::{insert_song, insert_verse};
use crate::models::SongStatus;

const DEMO_TITLE: &str = "Morning Inspiration";
const DEMO_VERSE: &str =
    "This is a sample verse for demonstration.\nEdit or delete this to add your own lyrics.";

/// Insert one demonstration song with a single verse, but only into an empty
/// store. Returns `true` when rows were written.
pub fn seed_demo_data(conn: &Connection) -> Result<bool> {
    let existing: i64 = conn
        .query_row("SELECT COUNT(*) FROM songs", [], |row| row.get(0))
        .context("failed to count songs")?;

    if existing > 0 {
        info!("Store already holds {existing} song(s), skipping demo data");
        return Ok(false);
    }

    let song = insert_song(conn, DEMO_TITLE, SongStatus::Complete.as_str())?;
    insert_verse(conn, song.id, 1, DEMO_VERSE)?;
    info!("Seeded demo song \"{}\"", song.title);
    Ok(true)
}
