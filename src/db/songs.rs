use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::NotFound;
use crate::models::Song;

const SONG_COLUMNS: &str = "id, title, status, is_ai_generated, date_created, last_modified";

fn song_from_row(row: &Row<'_>) -> rusqlite::Result<Song> {
    Ok(Song {
        id: row.get(0)?,
        title: row.get(1)?,
        status: row.get(2)?,
        is_ai_generated: row.get(3)?,
        date_created: row.get(4)?,
        last_modified: row.get(5)?,
    })
}

/// Fetch every song, most recently created first. The id breaks ties between
/// songs created within the same timestamp tick.
pub fn list_songs(conn: &Connection) -> Result<Vec<Song>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {SONG_COLUMNS} FROM songs ORDER BY date_created DESC, id DESC"
        ))
        .context("failed to prepare song listing query")?;

    let songs = stmt
        .query_map([], song_from_row)
        .context("failed to iterate songs")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect songs")?;

    Ok(songs)
}

/// Look up one song by id.
pub fn get_song(conn: &Connection, id: i64) -> Result<Option<Song>> {
    conn.query_row(
        &format!("SELECT {SONG_COLUMNS} FROM songs WHERE id = ?1"),
        params![id],
        song_from_row,
    )
    .optional()
    .context("failed to load song")
}

/// Number of verses per song id. Songs without verses are absent from the map.
pub fn verse_counts(conn: &Connection) -> Result<HashMap<i64, i64>> {
    let mut stmt = conn
        .prepare("SELECT song_id, COUNT(*) FROM lyrics GROUP BY song_id")
        .context("failed to prepare verse count query")?;

    let counts = stmt
        .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))
        .context("failed to iterate verse counts")?
        .collect::<Result<HashMap<_, _>, _>>()
        .context("failed to collect verse counts")?;

    Ok(counts)
}

/// Insert a brand new song stamped with the current time. The hydrated struct
/// is echoed back so callers can use the generated id straight away.
pub fn insert_song(conn: &Connection, title: &str, status: &str) -> Result<Song> {
    let now = Utc::now();
    conn.execute(
        "INSERT INTO songs (title, status, is_ai_generated, date_created, last_modified)
         VALUES (?1, ?2, 0, ?3, ?3)",
        params![title, status, now],
    )
    .context("failed to insert song")?;

    let id = conn.last_insert_rowid();
    Ok(Song {
        id,
        title: title.to_string(),
        status: status.to_string(),
        is_ai_generated: false,
        date_created: now,
        last_modified: now,
    })
}

/// Record that something belonging to the song changed.
pub(super) fn touch_song(conn: &Connection, id: i64) -> Result<()> {
    conn.execute(
        "UPDATE songs SET last_modified = ?1 WHERE id = ?2",
        params![Utc::now(), id],
    )
    .context("failed to update song modification time")?;
    Ok(())
}

/// Permanently delete a song. The `lyrics` foreign key cascades, so every
/// verse of the song disappears in the same statement.
pub fn delete_song(conn: &Connection, id: i64) -> Result<()> {
    let deleted = conn
        .execute("DELETE FROM songs WHERE id = ?1", params![id])
        .context("failed to delete song")?;

    if deleted == 0 {
        Err(NotFound::Song(id).into())
    } else {
        Ok(())
    }
}
