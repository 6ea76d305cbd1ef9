//! Persistence module split across logical submodules.

mod connection;
mod lyrics;
mod seed;
mod songs;

use thiserror::Error;

pub use connection::{ensure_schema, open_store};
pub use lyrics::{delete_verse, get_verse, insert_verse, list_verses, update_verse};
pub use seed::seed_demo_data;
pub use songs::{delete_song, get_song, insert_song, list_songs, verse_counts};

/// Raised (inside `anyhow::Error`) when an update or delete targets a row that
/// does not exist. Handlers downcast to it to answer with a 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NotFound {
    #[error("Song {0} not found")]
    Song(i64),
    #[error("Verse {0} not found")]
    Verse(i64),
}
