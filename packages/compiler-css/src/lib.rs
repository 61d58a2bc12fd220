//! CSS side of the CloudPage generator: inline declaration serialization,
//! colour and background helpers, and the document-wide stylesheet.

pub mod background;
pub mod color;
pub mod serializer;
pub mod stylesheet;

pub use background::{Background, BACKGROUND_KEYS};
pub use color::{gradient_css, hex_to_rgba};
pub use serializer::{
    mobile_override, parse_declarations, serialize_important, serialize_styles, StyleFilter,
    MOBILE_BREAKPOINT,
};
pub use stylesheet::{global_stylesheet, google_font_url, ThemeVars};
