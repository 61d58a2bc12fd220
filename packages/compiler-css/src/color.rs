//! Colour helpers

use cloudpage_model::{format_number, Gradient, GradientKind};

/// `#rgb` / `#rrggbb` → `rgba(r, g, b, a)`.
///
/// Opacity above 1 is read as a percentage. Unparseable colours fall back to
/// black so an overlay still darkens the image.
pub fn hex_to_rgba(hex: &str, opacity: f64) -> String {
    let alpha = normalize_opacity(opacity);
    let (r, g, b) = parse_hex(hex).unwrap_or((0, 0, 0));
    format!("rgba({}, {}, {}, {})", r, g, b, format_number(alpha))
}

fn normalize_opacity(opacity: f64) -> f64 {
    if opacity.is_nan() {
        return 1.0;
    }
    let alpha = if opacity > 1.0 { opacity / 100.0 } else { opacity };
    alpha.clamp(0.0, 1.0)
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.trim().trim_start_matches('#');
    match digits.len() {
        3 => {
            let mut channels = digits.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some((channels.next()??, channels.next()??, channels.next()??))
        }
        6 | 8 => {
            let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
            Some((channel(0)?, channel(2)?, channel(4)?))
        }
        _ => None,
    }
}

pub const DEFAULT_GRADIENT_ANGLE: f64 = 135.0;

/// CSS gradient function for a two-stop gradient
pub fn gradient_css(gradient: &Gradient) -> String {
    match gradient.kind {
        GradientKind::Linear => format!(
            "linear-gradient({}deg, {}, {})",
            format_number(gradient.angle.unwrap_or(DEFAULT_GRADIENT_ANGLE)),
            gradient.start_color,
            gradient.end_color
        ),
        GradientKind::Radial => format!(
            "radial-gradient(circle, {}, {})",
            gradient.start_color, gradient.end_color
        ),
    }
}
