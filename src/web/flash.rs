//! Transient status messages carried on the redirect target's query string
//! instead of a server-side session.

use axum::response::Redirect;
use serde::{Deserialize, Serialize};

/// Severity of a flash message; doubles as the banner's CSS modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Danger,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    #[serde(rename = "flash")]
    pub text: String,
    pub level: Level,
}

impl Flash {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: Level::Success,
        }
    }

    pub fn danger(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: Level::Danger,
        }
    }
}

/// Query parameters a rendered page may receive. Everything is optional and
/// unknown levels degrade to `success` rather than failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct FlashQuery {
    flash: Option<String>,
    level: Option<String>,
}

impl FlashQuery {
    pub fn into_flash(self) -> Option<Flash> {
        let text = self.flash.filter(|t| !t.trim().is_empty())?;
        let level = match self.level.as_deref() {
            Some("danger") => Level::Danger,
            _ => Level::Success,
        };
        Some(Flash { text, level })
    }
}

/// `303 See Other` to `path` with the message appended as query parameters.
pub fn redirect_with(path: &str, flash: Flash) -> Redirect {
    let target = match serde_urlencoded::to_string(&flash) {
        Ok(query) => format!("{path}?{query}"),
        Err(_) => path.to_string(),
    };
    Redirect::to(&target)
}
