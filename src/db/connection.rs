use std::fs;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::{debug, info};

use crate::config::StoreLocation;

/// Open the configured store, run lazy migrations, and return a live
/// connection. File-backed stores get their parent directory created first.
pub fn open_store(location: &StoreLocation) -> Result<Connection> {
    let conn = match location {
        StoreLocation::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).context("failed to create data directory")?;
            }
            info!("Opening song store at {}", path.display());
            Connection::open(path).context("failed to open SQLite database")?
        }
        StoreLocation::Memory => {
            info!("Opening in-memory song store");
            Connection::open_in_memory().context("failed to open in-memory SQLite database")?
        }
    };

    ensure_schema(&conn)?;
    Ok(conn)
}

/// Create the `songs` and `lyrics` tables if they are missing. The function
/// also toggles `PRAGMA foreign_keys = ON` so deleting a song cascades to its
/// verses on this connection.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign keys")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'draft',
            is_ai_generated INTEGER NOT NULL DEFAULT 0,
            date_created TEXT NOT NULL,
            last_modified TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create songs table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS lyrics (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            song_id INTEGER NOT NULL,
            verse_number INTEGER NOT NULL,
            lyrics_text TEXT NOT NULL,
            date_created TEXT NOT NULL,
            FOREIGN KEY(song_id) REFERENCES songs(id) ON DELETE CASCADE
        )",
        [],
    )
    .context("failed to create lyrics table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_lyrics_song ON lyrics(song_id, verse_number)",
        [],
    )
    .context("failed to create lyrics index")?;

    debug!("Schema ready");
    Ok(())
}
