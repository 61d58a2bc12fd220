//! Background modes for `Div` and `Columns` containers.
//!
//! The background lives in the component's style map under dedicated keys
//! that are not plain CSS (`backgroundType`, `overlayColor`, ...), so
//! containers serialize their styles with [`BACKGROUND_KEYS`] forbidden and
//! paint the background from a [`Background`] instead.

use crate::color::{gradient_css, hex_to_rgba};
use cloudpage_model::StyleMap;

pub const BACKGROUND_KEYS: &[&str] = &[
    "backgroundType",
    "backgroundColor",
    "background",
    "backgroundImage",
    "backgroundSize",
    "backgroundPosition",
    "backgroundRepeat",
    "gradient",
    "overlayColor",
    "overlayOpacity",
    "overlayEnabled",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    None,
    Solid(String),
    Gradient(String),
    Image {
        url: String,
        size: String,
        position: String,
        /// `rgba(...)` overlay painted above the image
        overlay: Option<String>,
    },
}

impl Background {
    pub fn from_styles(styles: &StyleMap) -> Self {
        let solid = || {
            styles
                .css("backgroundColor")
                .or_else(|| styles.css("background"))
                .map(Background::Solid)
                .unwrap_or(Background::None)
        };

        let kind = styles.css("backgroundType");
        match kind.as_deref() {
            Some("gradient") => match styles.gradient() {
                Some(gradient) => Background::Gradient(gradient_css(gradient)),
                None => solid(),
            },
            Some("image") | None => match styles.css("backgroundImage") {
                Some(url) => Background::Image {
                    url: strip_url(&url),
                    size: styles.css("backgroundSize").unwrap_or_else(|| "cover".to_string()),
                    position: styles
                        .css("backgroundPosition")
                        .unwrap_or_else(|| "center".to_string()),
                    overlay: overlay(styles),
                },
                None => solid(),
            },
            Some(_) => solid(),
        }
    }

    /// Declarations painting this background
    pub fn declarations(&self) -> String {
        match self {
            Background::None => String::new(),
            Background::Solid(color) => format!("background-color: {};", color),
            Background::Gradient(css) => format!("background: {};", css),
            Background::Image {
                url, size, position, ..
            } => format!(
                "background-image: url('{}'); background-size: {}; background-position: {}; background-repeat: no-repeat;",
                url, size, position
            ),
        }
    }

    pub fn overlay(&self) -> Option<&str> {
        match self {
            Background::Image { overlay, .. } => overlay.as_deref(),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Background::None)
    }
}

fn overlay(styles: &StyleMap) -> Option<String> {
    if let Some(enabled) = styles.get("overlayEnabled") {
        if !enabled.is_truthy() {
            return None;
        }
    }
    let color = styles.css("overlayColor")?;
    let opacity = styles
        .get("overlayOpacity")
        .and_then(|v| v.as_f64())
        .unwrap_or(0.5);
    Some(hex_to_rgba(&color, opacity))
}

/// Accepts both `https://...` and `url(https://...)`
fn strip_url(value: &str) -> String {
    let trimmed = value.trim();
    trimmed
        .strip_prefix("url(")
        .and_then(|v| v.strip_suffix(')'))
        .map(|v| v.trim_matches(|c| c == '\'' || c == '"').to_string())
        .unwrap_or_else(|| trimmed.to_string())
}
