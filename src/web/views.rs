//! Server-rendered HTML pages. Each function returns a complete document;
//! every piece of user-supplied text goes through [`escape`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::flash::Flash;
use crate::models::{Song, SongStatus, Verse};

const STYLE: &str = r#"
        * { box-sizing: border-box; }
        body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 0;
               background: #111827; color: #e5e7eb; line-height: 1.6; }
        header { background: #1f2937; padding: 12px 24px; display: flex; gap: 20px; align-items: center; }
        header a { color: #c4b5fd; text-decoration: none; }
        header .brand { font-weight: bold; font-size: 1.2em; color: #f9fafb; }
        main { max-width: 860px; margin: 0 auto; padding: 24px; }
        .flash { padding: 10px 14px; border-radius: 6px; margin-bottom: 16px; }
        .flash-success { background: #064e3b; color: #d1fae5; }
        .flash-danger { background: #7f1d1d; color: #fee2e2; }
        .card { background: #1f2937; border-radius: 8px; padding: 16px; margin-bottom: 12px; }
        .badge { font-size: 0.8em; padding: 2px 8px; border-radius: 999px; background: #374151; }
        .badge-draft { background: #374151; }
        .badge-recording { background: #92400e; }
        .badge-complete { background: #065f46; }
        .muted { color: #9ca3af; font-size: 0.9em; }
        .verse pre { white-space: pre-wrap; font-family: inherit; margin: 8px 0; }
        .actions { display: flex; gap: 10px; align-items: center; }
        form.inline { display: inline; }
        label { display: block; margin-top: 12px; }
        input, select, textarea { width: 100%; padding: 8px; background: #111827; color: #e5e7eb;
                                  border: 1px solid #374151; border-radius: 6px; }
        textarea { min-height: 180px; }
        button, .button { background: #7c3aed; color: white; border: none; padding: 8px 14px;
                          border-radius: 6px; cursor: pointer; text-decoration: none; }
        button.danger { background: #b91c1c; }
        a { color: #c4b5fd; }
"#;

/// Escape text for use in element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%b %d, %Y").to_string()
}

fn flash_banner(flash: Option<&Flash>) -> String {
    match flash {
        Some(flash) => format!(
            r#"<div class="flash flash-{}">{}</div>"#,
            flash.level.as_str(),
            escape(&flash.text)
        ),
        None => String::new(),
    }
}

fn status_badge(song: &Song) -> String {
    let class = song
        .known_status()
        .map(SongStatus::as_str)
        .unwrap_or("other");
    format!(
        r#"<span class="badge badge-{class}">{}</span>"#,
        escape(&song.status)
    )
}

fn layout(title: &str, flash: Option<&Flash>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - FlowState</title>
    <style>{STYLE}</style>
</head>
<body>
    <header>
        <a class="brand" href="/">FlowState</a>
        <a href="/">Dashboard</a>
        <a href="/song/new">New Song</a>
        <a href="/gear">Gear</a>
        <a href="/about">About</a>
    </header>
    <main>
        {banner}
        {body}
    </main>
</body>
</html>
"#,
        title = escape(title),
        banner = flash_banner(flash),
    )
}

/// Dashboard: every song, newest first, with its verse count.
pub fn song_list(songs: &[Song], verse_counts: &HashMap<i64, i64>, flash: Option<&Flash>) -> String {
    let mut body = String::from(r#"<h1>Your Songs</h1>"#);

    if songs.is_empty() {
        body.push_str(
            r#"<div class="card"><p>No songs yet.</p><a class="button" href="/song/new">Write your first song</a></div>"#,
        );
    }

    for song in songs {
        let count = verse_counts.get(&song.id).copied().unwrap_or(0);
        let noun = if count == 1 { "verse" } else { "verses" };
        body.push_str(&format!(
            r#"<div class="card">
            <h2><a href="/song/{id}">{title}</a> {badge}</h2>
            <p class="muted">{count} {noun} &middot; created {created}</p>
        </div>"#,
            id = song.id,
            title = escape(&song.title),
            badge = status_badge(song),
            created = format_date(&song.date_created),
        ));
    }

    layout("Dashboard", flash, &body)
}

/// Empty "new song" form.
pub fn song_form(flash: Option<&Flash>) -> String {
    let options: String = SongStatus::ALL
        .iter()
        .map(|status| {
            let selected = if *status == SongStatus::default() {
                " selected"
            } else {
                ""
            };
            format!(r#"<option value="{status}"{selected}>{status}</option>"#)
        })
        .collect();

    let body = format!(
        r#"<h1>New Song</h1>
        <form class="card" method="post" action="/song/new">
            <label for="title">Title</label>
            <input id="title" name="title" maxlength="200" required>
            <label for="status">Status</label>
            <select id="status" name="status">{options}</select>
            <p><button type="submit">Save song</button> <a href="/">Cancel</a></p>
        </form>"#
    );

    layout("New Song", flash, &body)
}

/// Song detail page with its verses in verse-number order.
pub fn song_detail(song: &Song, verses: &[Verse], flash: Option<&Flash>) -> String {
    let mut body = format!(
        r#"<h1>{title} {badge}</h1>
        <p class="muted">Created {created} &middot; last modified {modified}</p>
        <div class="actions">
            <a class="button" href="/song/{id}/add_lyrics">Add verse</a>
            <form class="inline" method="post" action="/song/{id}/delete"
                  onsubmit="return confirm('Delete this song and all of its verses?');">
                <button class="danger" type="submit">Delete song</button>
            </form>
        </div>"#,
        id = song.id,
        title = escape(&song.title),
        badge = status_badge(song),
        created = format_date(&song.date_created),
        modified = format_date(&song.last_modified),
    );

    if verses.is_empty() {
        body.push_str(r#"<div class="card"><p>No verses yet.</p></div>"#);
    }

    for verse in verses {
        body.push_str(&format!(
            r#"<div class="card verse">
            <h3>Verse {number}</h3>
            <pre>{text}</pre>
            <div class="actions">
                <a href="/song/{song_id}/lyrics/{id}/edit">Edit</a>
                <form class="inline" method="post" action="/song/{song_id}/lyrics/{id}/delete"
                      onsubmit="return confirm('Delete this verse?');">
                    <button class="danger" type="submit">Delete</button>
                </form>
            </div>
        </div>"#,
            number = verse.verse_number,
            text = escape(&verse.lyrics_text),
            song_id = song.id,
            id = verse.id,
        ));
    }

    body.push_str(r#"<p><a href="/">&larr; Back to dashboard</a></p>"#);
    layout(&song.title, flash, &body)
}

/// Verse form: empty when adding, pre-filled when `verse` is given.
pub fn verse_form(song: &Song, verse: Option<&Verse>, flash: Option<&Flash>) -> String {
    let (heading, action, number, text) = match verse {
        Some(verse) => (
            "Edit Verse",
            format!("/song/{}/lyrics/{}/edit", song.id, verse.id),
            verse.verse_number.to_string(),
            escape(&verse.lyrics_text),
        ),
        None => (
            "Add Verse",
            format!("/song/{}/add_lyrics", song.id),
            String::new(),
            String::new(),
        ),
    };

    let body = format!(
        r#"<h1>{heading}</h1>
        <p class="muted">{title}</p>
        <form class="card" method="post" action="{action}">
            <label for="verse_number">Verse number</label>
            <input id="verse_number" name="verse_number" type="number" value="{number}" required>
            <label for="lyrics_text">Lyrics</label>
            <textarea id="lyrics_text" name="lyrics_text" required>{text}</textarea>
            <p><button type="submit">Save verse</button> <a href="/song/{id}">Cancel</a></p>
        </form>"#,
        title = escape(&song.title),
        id = song.id,
    );

    layout(heading, flash, &body)
}

pub fn about() -> String {
    let body = r#"<h1>About FlowState</h1>
        <div class="card">
            <p>FlowState is a notebook for songwriters. Start a song, write verses in any
            order, and track where each song stands: <strong>draft</strong>,
            <strong>recording</strong> or <strong>complete</strong>.</p>
            <p>Verses are always shown in verse-number order, and deleting a song removes
            every verse written for it.</p>
        </div>
        <p><a class="button" href="/song/new">Start a song</a></p>"#;
    layout("About", None, body)
}

struct GearItem {
    name: &'static str,
    description: &'static str,
    price: &'static str,
    link: &'static str,
}

struct GearCategory {
    title: &'static str,
    description: &'static str,
    items: &'static [GearItem],
}

const GEAR: &[GearCategory] = &[
    GearCategory {
        title: "Microphones",
        description: "Professional mics for recording vocals, instruments and podcasts",
        items: &[
            GearItem {
                name: "Blue Yeti USB Microphone",
                description: "Professional USB mic with multiple pattern modes",
                price: "$99.99",
                link: "https://amzn.to/4aM7JwK",
            },
            GearItem {
                name: "Audio-Technica AT2020",
                description: "Studio condenser microphone for vocals",
                price: "$99.00",
                link: "https://amzn.to/4syTaTF",
            },
            GearItem {
                name: "Shure SM58",
                description: "Industry standard dynamic microphone",
                price: "$99.00",
                link: "https://amzn.to/45ECHn1",
            },
        ],
    },
    GearCategory {
        title: "Headphones",
        description: "Studio monitors and headphones for mixing and monitoring",
        items: &[
            GearItem {
                name: "Audio-Technica ATH-M50x",
                description: "Professional studio monitor headphones",
                price: "$149.00",
                link: "https://amzn.to/4537kSU",
            },
            GearItem {
                name: "Sony MDR-7506",
                description: "Industry standard studio headphones",
                price: "$99.99",
                link: "https://amzn.to/3LsNjP4",
            },
        ],
    },
    GearCategory {
        title: "Audio Interfaces",
        description: "Professional audio interfaces for recording",
        items: &[
            GearItem {
                name: "Focusrite Scarlett 2i2",
                description: "USB audio interface with 2 inputs",
                price: "$179.99",
                link: "https://amzn.to/4jAaUdk",
            },
            GearItem {
                name: "PreSonus AudioBox USB 96",
                description: "Budget-friendly 2x2 interface",
                price: "$99.95",
                link: "https://amzn.to/4aOB6i1",
            },
        ],
    },
];

/// Recommended recording gear, grouped by category.
pub fn gear() -> String {
    let mut body = String::from("<h1>Recommended Gear</h1>");
    for category in GEAR {
        body.push_str(&format!(
            r#"<h2>{}</h2><p class="muted">{}</p>"#,
            category.title, category.description
        ));
        for item in category.items {
            body.push_str(&format!(
                r#"<div class="card">
            <h3>{name}</h3>
            <p>{description}</p>
            <p class="actions"><strong>{price}</strong>
                <a href="{link}" target="_blank" rel="noopener sponsored">View on Amazon</a></p>
        </div>"#,
                name = item.name,
                description = item.description,
                price = item.price,
                link = item.link,
            ));
        }
    }
    layout("Gear", None, &body)
}

pub fn not_found(detail: &str) -> String {
    let body = format!(
        r#"<h1>Not Found</h1>
        <div class="card"><p>{}</p></div>
        <p><a href="/">&larr; Back to dashboard</a></p>"#,
        escape(detail)
    );
    layout("Not Found", None, &body)
}

pub fn server_error() -> String {
    let body = r#"<h1>Something went wrong</h1>
        <div class="card"><p>The song store could not complete the request. Please try again.</p></div>
        <p><a href="/">&larr; Back to dashboard</a></p>"#;
    layout("Error", None, body)
}
