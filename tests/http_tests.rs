//! End-to-end tests driving the router against an in-memory song store.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use rusqlite::Connection;
use tower::util::ServiceExt; // for `oneshot`

use flowstate::config::StoreLocation;
use flowstate::{build_router, db, open_store, AppState};

/// Test helper: router plus a second handle on the same store for assertions.
fn setup_app() -> (Router, AppState) {
    let conn = open_store(&StoreLocation::Memory).expect("in-memory store");
    let state = AppState::new(conn);
    (build_router(state.clone()), state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Should be UTF-8")
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

fn with_conn<T>(state: &AppState, f: impl FnOnce(&Connection) -> T) -> T {
    let conn = state.conn().unwrap();
    f(&*conn)
}

// =============================================================================
// Songs
// =============================================================================

#[tokio::test]
async fn create_song_defaults_status_to_draft() {
    let (app, state) = setup_app();

    let response = send(&app, post_form("/song/new", "title=Test+Song")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/?flash=Song+%22Test+Song%22+added"));
    assert!(location(&response).ends_with("level=success"));

    let songs = with_conn(&state, |c| db::list_songs(c).unwrap());
    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0].title, "Test Song");
    assert_eq!(songs[0].status, "draft");
}

#[tokio::test]
async fn create_song_keeps_submitted_status() {
    let (app, state) = setup_app();

    send(&app, post_form("/song/new", "title=Tune&status=recording")).await;

    let songs = with_conn(&state, |c| db::list_songs(c).unwrap());
    assert_eq!(songs[0].status, "recording");
}

#[tokio::test]
async fn create_song_without_title_returns_to_form() {
    let (app, state) = setup_app();

    let response = send(&app, post_form("/song/new", "title=&status=draft")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/song/new?flash=Song+title+is+required"));
    assert!(location(&response).ends_with("level=danger"));
    assert!(with_conn(&state, |c| db::list_songs(c).unwrap()).is_empty());

    let form = send(&app, get(location(&response))).await;
    assert_eq!(form.status(), StatusCode::OK);
    assert!(body_text(form).await.contains("flash-danger"));
}

#[tokio::test]
async fn dashboard_lists_newest_first() {
    let (app, _state) = setup_app();
    send(&app, post_form("/song/new", "title=Older")).await;
    send(&app, post_form("/song/new", "title=Newer")).await;

    let page = body_text(send(&app, get("/")).await).await;

    let newer = page.find("Newer").unwrap();
    let older = page.find("Older").unwrap();
    assert!(newer < older);
}

#[tokio::test]
async fn dashboard_shows_flash_from_query() {
    let (app, _state) = setup_app();

    let page = body_text(send(&app, get("/?flash=Saved%21&level=success")).await).await;

    assert!(page.contains(r#"flash flash-success">Saved!"#));
}

#[tokio::test]
async fn unknown_song_is_not_found() {
    let (app, _state) = setup_app();

    for uri in ["/song/41", "/song/41/add_lyrics", "/song/41/lyrics/1/edit"] {
        let response = send(&app, get(uri)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }

    let response = send(&app, post_form("/song/41/delete", "")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, post_form("/song/41/add_lyrics", "verse_number=1&lyrics_text=x")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let (app, _state) = setup_app();
    let response = send(&app, get("/nowhere")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Verses
// =============================================================================

#[tokio::test]
async fn verses_render_in_verse_number_order() {
    let (app, state) = setup_app();
    let song = with_conn(&state, |c| db::insert_song(c, "Ordered", "draft").unwrap());
    let uri = format!("/song/{}/add_lyrics", song.id);

    for body in [
        "verse_number=3&lyrics_text=gamma",
        "verse_number=1&lyrics_text=alpha",
        "verse_number=2&lyrics_text=beta",
    ] {
        let response = send(&app, post_form(&uri, body)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(&response).starts_with(&format!("/song/{}?flash=Verse+", song.id)));
    }

    let page = body_text(send(&app, get(&format!("/song/{}", song.id))).await).await;
    let alpha = page.find("alpha").unwrap();
    let beta = page.find("beta").unwrap();
    let gamma = page.find("gamma").unwrap();
    assert!(alpha < beta && beta < gamma);
}

#[tokio::test]
async fn add_verse_requires_both_fields() {
    let (app, state) = setup_app();
    let song = with_conn(&state, |c| db::insert_song(c, "Strict", "draft").unwrap());
    let uri = format!("/song/{}/add_lyrics", song.id);

    for body in ["verse_number=1", "lyrics_text=words", "verse_number=one&lyrics_text=words"] {
        let response = send(&app, post_form(&uri, body)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(&response).starts_with(&format!("{uri}?flash=")), "{body}");
        assert!(location(&response).ends_with("level=danger"));
    }

    assert!(with_conn(&state, |c| db::list_verses(c, song.id).unwrap()).is_empty());
}

#[tokio::test]
async fn edit_form_is_prefilled() {
    let (app, state) = setup_app();
    let (song, verse) = with_conn(&state, |c| {
        let song = db::insert_song(c, "Editable", "draft").unwrap();
        let verse = db::insert_verse(c, song.id, 7, "original words").unwrap();
        (song, verse)
    });

    let response = send(&app, get(&format!("/song/{}/lyrics/{}/edit", song.id, verse.id))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains(r#"value="7""#));
    assert!(page.contains("original words"));
}

#[tokio::test]
async fn edit_verse_ignores_song_in_path() {
    let (app, state) = setup_app();
    let (owner, other, verse) = with_conn(&state, |c| {
        let owner = db::insert_song(c, "Owner", "draft").unwrap();
        let other = db::insert_song(c, "Other", "draft").unwrap();
        let verse = db::insert_verse(c, owner.id, 1, "before").unwrap();
        (owner, other, verse)
    });

    let response = send(
        &app,
        post_form(
            &format!("/song/{}/lyrics/{}/edit", other.id, verse.id),
            "verse_number=2&lyrics_text=after",
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with(&format!("/song/{}?", other.id)));

    let updated = with_conn(&state, |c| db::get_verse(c, verse.id).unwrap().unwrap());
    assert_eq!(updated.song_id, owner.id);
    assert_eq!(updated.verse_number, 2);
    assert_eq!(updated.lyrics_text, "after");
}

#[tokio::test]
async fn edit_verse_validation_keeps_stored_text() {
    let (app, state) = setup_app();
    let (song, verse) = with_conn(&state, |c| {
        let song = db::insert_song(c, "Keep", "draft").unwrap();
        let verse = db::insert_verse(c, song.id, 1, "kept").unwrap();
        (song, verse)
    });
    let uri = format!("/song/{}/lyrics/{}/edit", song.id, verse.id);

    let response = send(&app, post_form(&uri, "verse_number=1&lyrics_text=")).await;

    assert!(location(&response).starts_with(&format!("{uri}?flash=Both+verse+number")));
    let stored = with_conn(&state, |c| db::get_verse(c, verse.id).unwrap().unwrap());
    assert_eq!(stored.lyrics_text, "kept");
}

#[tokio::test]
async fn edit_missing_verse_is_not_found() {
    let (app, state) = setup_app();
    let song = with_conn(&state, |c| db::insert_song(c, "Lonely", "draft").unwrap());

    let response = send(
        &app,
        post_form(
            &format!("/song/{}/lyrics/999/edit", song.id),
            "verse_number=1&lyrics_text=x",
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_verse_keeps_siblings() {
    let (app, state) = setup_app();
    let (song, doomed, sibling) = with_conn(&state, |c| {
        let song = db::insert_song(c, "Pruned", "draft").unwrap();
        let doomed = db::insert_verse(c, song.id, 1, "doomed").unwrap();
        let sibling = db::insert_verse(c, song.id, 2, "sibling").unwrap();
        (song, doomed, sibling)
    });

    let response = send(
        &app,
        post_form(&format!("/song/{}/lyrics/{}/delete", song.id, doomed.id), ""),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        format!("/song/{}?flash=Verse+deleted+successfully%21&level=success", song.id)
    );
    with_conn(&state, |c| {
        assert!(db::get_verse(c, doomed.id).unwrap().is_none());
        assert!(db::get_verse(c, sibling.id).unwrap().is_some());
        assert!(db::get_song(c, song.id).unwrap().is_some());
    });

    let again = send(
        &app,
        post_form(&format!("/song/{}/lyrics/{}/delete", song.id, doomed.id), ""),
    )
    .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Full workflow
// =============================================================================

#[tokio::test]
async fn song_lifecycle_end_to_end() {
    let (app, state) = setup_app();

    send(&app, post_form("/song/new", "title=Test+Song")).await;
    let song = with_conn(&state, |c| db::list_songs(c).unwrap().remove(0));
    assert_eq!(song.status, "draft");

    let add = format!("/song/{}/add_lyrics", song.id);
    send(&app, post_form(&add, "verse_number=1&lyrics_text=Hello")).await;
    send(&app, post_form(&add, "verse_number=2&lyrics_text=World")).await;

    let verses = with_conn(&state, |c| db::list_verses(c, song.id).unwrap());
    let texts: Vec<&str> = verses.iter().map(|v| v.lyrics_text.as_str()).collect();
    assert_eq!(texts, vec!["Hello", "World"]);
    assert!(verses.iter().all(|v| v.song_id == song.id));

    let response = send(&app, post_form(&format!("/song/{}/delete", song.id), "")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/?flash=Song+%22Test+Song%22+deleted"));

    with_conn(&state, |c| {
        assert!(db::get_song(c, song.id).unwrap().is_none());
        for verse in &verses {
            assert!(db::get_verse(c, verse.id).unwrap().is_none());
        }
    });
    assert_eq!(
        send(&app, get(&format!("/song/{}", song.id))).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn static_pages_render() {
    let (app, _state) = setup_app();

    let about = send(&app, get("/about")).await;
    assert_eq!(about.status(), StatusCode::OK);

    let gear = body_text(send(&app, get("/gear")).await).await;
    assert!(gear.contains("Microphones"));
    assert!(gear.contains("Audio Interfaces"));
}
