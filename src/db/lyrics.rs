use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::songs::touch_song;
use super::NotFound;
use crate::models::Verse;

const VERSE_COLUMNS: &str = "id, song_id, verse_number, lyrics_text, date_created";

fn verse_from_row(row: &Row<'_>) -> rusqlite::Result<Verse> {
    Ok(Verse {
        id: row.get(0)?,
        song_id: row.get(1)?,
        verse_number: row.get(2)?,
        lyrics_text: row.get(3)?,
        date_created: row.get(4)?,
    })
}

/// Every verse of a song ordered by verse number, regardless of the order
/// they were written in. Verses sharing a number keep insertion order.
pub fn list_verses(conn: &Connection, song_id: i64) -> Result<Vec<Verse>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {VERSE_COLUMNS} FROM lyrics WHERE song_id = ?1 ORDER BY verse_number, id"
        ))
        .context("failed to prepare verse listing query")?;

    let verses = stmt
        .query_map(params![song_id], verse_from_row)
        .context("failed to iterate verses")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect verses")?;

    Ok(verses)
}

/// Look up a verse by its own id. The lookup is global: callers that also
/// hold a song id do not narrow the search with it.
pub fn get_verse(conn: &Connection, id: i64) -> Result<Option<Verse>> {
    conn.query_row(
        &format!("SELECT {VERSE_COLUMNS} FROM lyrics WHERE id = ?1"),
        params![id],
        verse_from_row,
    )
    .optional()
    .context("failed to load verse")
}

/// Attach a new verse to an existing song.
pub fn insert_verse(
    conn: &Connection,
    song_id: i64,
    verse_number: i64,
    lyrics_text: &str,
) -> Result<Verse> {
    let now = Utc::now();
    conn.execute(
        "INSERT INTO lyrics (song_id, verse_number, lyrics_text, date_created)
         VALUES (?1, ?2, ?3, ?4)",
        params![song_id, verse_number, lyrics_text, now],
    )
    .context("failed to insert verse")?;

    let id = conn.last_insert_rowid();
    touch_song(conn, song_id)?;

    Ok(Verse {
        id,
        song_id,
        verse_number,
        lyrics_text: lyrics_text.to_string(),
        date_created: now,
    })
}

/// Rewrite the number and text of a verse in place. Surfaces `NotFound` when
/// no row carries the id.
pub fn update_verse(
    conn: &Connection,
    id: i64,
    verse_number: i64,
    lyrics_text: &str,
) -> Result<Verse> {
    let updated = conn
        .execute(
            "UPDATE lyrics SET verse_number = ?1, lyrics_text = ?2 WHERE id = ?3",
            params![verse_number, lyrics_text, id],
        )
        .context("failed to update verse")?;

    if updated == 0 {
        return Err(NotFound::Verse(id).into());
    }

    let verse = get_verse(conn, id)?.ok_or(NotFound::Verse(id))?;
    touch_song(conn, verse.song_id)?;
    Ok(verse)
}

/// Remove one verse, leaving its siblings and parent song untouched apart
/// from the song's modification time.
pub fn delete_verse(conn: &Connection, id: i64) -> Result<Verse> {
    let verse = get_verse(conn, id)?.ok_or(NotFound::Verse(id))?;

    conn.execute("DELETE FROM lyrics WHERE id = ?1", params![id])
        .context("failed to delete verse")?;

    touch_song(conn, verse.song_id)?;
    Ok(verse)
}
