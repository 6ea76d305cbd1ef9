//! Request handlers: each one resolves path parameters, performs its store
//! calls, and either renders a page or redirects with a flash message.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, Redirect};
use axum::Form;
use tracing::info;

use super::error::AppError;
use super::flash::{redirect_with, Flash, FlashQuery};
use super::forms::{SongForm, VerseForm};
use super::{views, AppState};
use crate::db::{self, NotFound};

/// GET /
pub async fn list_songs(
    State(state): State<AppState>,
    Query(flash): Query<FlashQuery>,
) -> Result<Html<String>, AppError> {
    let conn = state.conn()?;
    let songs = db::list_songs(&conn)?;
    let counts = db::verse_counts(&conn)?;
    Ok(Html(views::song_list(&songs, &counts, flash.into_flash().as_ref())))
}

/// GET /song/new
pub async fn new_song_form(Query(flash): Query<FlashQuery>) -> Html<String> {
    Html(views::song_form(flash.into_flash().as_ref()))
}

/// POST /song/new
pub async fn create_song(
    State(state): State<AppState>,
    Form(form): Form<SongForm>,
) -> Result<Redirect, AppError> {
    let new_song = match form.parse_inputs() {
        Ok(new_song) => new_song,
        Err(err) => return Ok(redirect_with("/song/new", Flash::danger(err.to_string()))),
    };

    let conn = state.conn()?;
    let song = db::insert_song(&conn, &new_song.title, &new_song.status)?;
    info!("Created song {} ({})", song.id, song.status);

    Ok(redirect_with(
        "/",
        Flash::success(format!("Song \"{}\" added successfully!", song.title)),
    ))
}

/// GET /song/{id}
pub async fn view_song(
    State(state): State<AppState>,
    Path(song_id): Path<i64>,
    Query(flash): Query<FlashQuery>,
) -> Result<Html<String>, AppError> {
    let conn = state.conn()?;
    let song = db::get_song(&conn, song_id)?.ok_or(NotFound::Song(song_id))?;
    let verses = db::list_verses(&conn, song_id)?;
    Ok(Html(views::song_detail(&song, &verses, flash.into_flash().as_ref())))
}

/// GET /song/{id}/add_lyrics
pub async fn new_verse_form(
    State(state): State<AppState>,
    Path(song_id): Path<i64>,
    Query(flash): Query<FlashQuery>,
) -> Result<Html<String>, AppError> {
    let conn = state.conn()?;
    let song = db::get_song(&conn, song_id)?.ok_or(NotFound::Song(song_id))?;
    Ok(Html(views::verse_form(&song, None, flash.into_flash().as_ref())))
}

/// POST /song/{id}/add_lyrics
pub async fn create_verse(
    State(state): State<AppState>,
    Path(song_id): Path<i64>,
    Form(form): Form<VerseForm>,
) -> Result<Redirect, AppError> {
    let conn = state.conn()?;
    let song = db::get_song(&conn, song_id)?.ok_or(NotFound::Song(song_id))?;

    let input = match form.parse_inputs() {
        Ok(input) => input,
        Err(err) => {
            return Ok(redirect_with(
                &format!("/song/{}/add_lyrics", song.id),
                Flash::danger(err.to_string()),
            ))
        }
    };

    let verse = db::insert_verse(&conn, song.id, input.verse_number, &input.lyrics_text)?;
    info!("Added verse {} to song {}", verse.id, song.id);

    Ok(redirect_with(
        &format!("/song/{}", song.id),
        Flash::success(format!("Verse {} added successfully!", verse.verse_number)),
    ))
}

/// GET /song/{id}/lyrics/{vid}/edit
///
/// The verse is found by its own id; the song in the path only has to exist.
pub async fn edit_verse_form(
    State(state): State<AppState>,
    Path((song_id, verse_id)): Path<(i64, i64)>,
    Query(flash): Query<FlashQuery>,
) -> Result<Html<String>, AppError> {
    let conn = state.conn()?;
    let song = db::get_song(&conn, song_id)?.ok_or(NotFound::Song(song_id))?;
    let verse = db::get_verse(&conn, verse_id)?.ok_or(NotFound::Verse(verse_id))?;
    Ok(Html(views::verse_form(&song, Some(&verse), flash.into_flash().as_ref())))
}

/// POST /song/{id}/lyrics/{vid}/edit
pub async fn update_verse(
    State(state): State<AppState>,
    Path((song_id, verse_id)): Path<(i64, i64)>,
    Form(form): Form<VerseForm>,
) -> Result<Redirect, AppError> {
    let conn = state.conn()?;
    db::get_song(&conn, song_id)?.ok_or(NotFound::Song(song_id))?;
    db::get_verse(&conn, verse_id)?.ok_or(NotFound::Verse(verse_id))?;

    let input = match form.parse_inputs() {
        Ok(input) => input,
        Err(err) => {
            return Ok(redirect_with(
                &format!("/song/{song_id}/lyrics/{verse_id}/edit"),
                Flash::danger(err.to_string()),
            ))
        }
    };

    let verse = db::update_verse(&conn, verse_id, input.verse_number, &input.lyrics_text)?;
    info!("Updated verse {} of song {}", verse.id, verse.song_id);

    Ok(redirect_with(
        &format!("/song/{song_id}"),
        Flash::success(format!("Verse {} updated successfully!", verse.verse_number)),
    ))
}

/// POST /song/{id}/delete
pub async fn delete_song(
    State(state): State<AppState>,
    Path(song_id): Path<i64>,
) -> Result<Redirect, AppError> {
    let conn = state.conn()?;
    let song = db::get_song(&conn, song_id)?.ok_or(NotFound::Song(song_id))?;
    db::delete_song(&conn, song.id)?;
    info!("Deleted song {} and its verses", song.id);

    Ok(redirect_with(
        "/",
        Flash::success(format!("Song \"{}\" deleted successfully!", song.title)),
    ))
}

/// POST /song/{id}/lyrics/{vid}/delete
///
/// Only the verse id matters; the song id just picks the page to return to.
pub async fn delete_verse(
    State(state): State<AppState>,
    Path((song_id, verse_id)): Path<(i64, i64)>,
) -> Result<Redirect, AppError> {
    let conn = state.conn()?;
    let verse = db::delete_verse(&conn, verse_id)?;
    info!("Deleted verse {} of song {}", verse.id, verse.song_id);

    Ok(redirect_with(
        &format!("/song/{song_id}"),
        Flash::success("Verse deleted successfully!"),
    ))
}

/// GET /about
pub async fn about() -> Html<String> {
    Html(views::about())
}

/// GET /gear
pub async fn gear() -> Html<String> {
    Html(views::gear())
}

/// Any path no route claims.
pub async fn fallback() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(views::not_found("Page not found")))
}
