//! Form payloads posted by the song and verse pages, plus the presence checks
//! that gate persistence.

use serde::Deserialize;
use thiserror::Error;

use crate::models::SongStatus;

/// Longest title the `songs` table is meant to hold.
pub const MAX_TITLE_LEN: usize = 200;

/// Why a submitted form was bounced back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Song title is required!")]
    MissingTitle,
    #[error("Song title must be at most {} characters.", MAX_TITLE_LEN)]
    TitleTooLong,
    #[error("Both verse number and lyrics are required!")]
    MissingVerseFields,
    #[error("Verse number must be a whole number.")]
    BadVerseNumber,
}

#[derive(Debug, Default, Deserialize)]
pub struct SongForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: String,
}

/// Validated input for a new song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    pub title: String,
    pub status: String,
}

impl SongForm {
    /// Trim the title and default a blank status to `draft`. Non-blank
    /// statuses are kept verbatim, even ones the form does not offer.
    pub fn parse_inputs(&self) -> Result<NewSong, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TitleTooLong);
        }

        let status = match self.status.trim() {
            "" => SongStatus::default().as_str(),
            other => other,
        };

        Ok(NewSong {
            title: title.to_string(),
            status: status.to_string(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct VerseForm {
    #[serde(default)]
    pub verse_number: String,
    #[serde(default)]
    pub lyrics_text: String,
}

/// Validated input for creating or rewriting a verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseInput {
    pub verse_number: i64,
    pub lyrics_text: String,
}

impl VerseForm {
    pub fn parse_inputs(&self) -> Result<VerseInput, ValidationError> {
        let number_raw = self.verse_number.trim();
        if number_raw.is_empty() || self.lyrics_text.trim().is_empty() {
            return Err(ValidationError::MissingVerseFields);
        }
        let verse_number = number_raw
            .parse::<i64>()
            .map_err(|_| ValidationError::BadVerseNumber)?;

        Ok(VerseInput {
            verse_number,
            lyrics_text: self.lyrics_text.trim_end().to_string(),
        })
    }
}
