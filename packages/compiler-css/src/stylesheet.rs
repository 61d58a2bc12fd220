//! Theme variables and the fixed global stylesheet

use cloudpage_model::{Brand, CloudPage, StyleValue};

pub const DEFAULT_PRIMARY: &str = "#0070d2";
pub const DEFAULT_SECONDARY: &str = "#16325c";
pub const DEFAULT_ACCENT: &str = "#ff9e2c";
pub const DEFAULT_BACKGROUND: &str = "#ffffff";
pub const DEFAULT_TEXT: &str = "#333333";
pub const DEFAULT_FONT: &str = "'Helvetica Neue', Arial, sans-serif";
pub const DEFAULT_CONTENT_WIDTH: &str = "1200px";
pub const DEFAULT_BUTTON_RADIUS: &str = "6px";
pub const DEFAULT_INPUT_RADIUS: &str = "4px";

const WEB_SAFE_FONTS: &[&str] = &[
    "arial",
    "helvetica",
    "helvetica neue",
    "verdana",
    "tahoma",
    "trebuchet ms",
    "times new roman",
    "times",
    "georgia",
    "garamond",
    "courier new",
    "courier",
    "brush script mt",
    "sans-serif",
    "serif",
    "monospace",
    "cursive",
    "system-ui",
    "inherit",
];

/// Resolved theme: page styles win over the brand, which wins over the
/// built-in defaults
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeVars {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
    pub font_family: String,
    pub heading_font: String,
    pub base_font_size: String,
    pub content_width: String,
    pub button_background: String,
    pub button_text: String,
    pub button_radius: String,
    pub input_radius: String,
    pub input_border: String,
}

impl ThemeVars {
    pub fn from_page(page: &CloudPage) -> Self {
        let styles = &page.styles;
        let brand = page.brand.as_ref();
        let brand_field = |field: fn(&Brand) -> Option<&String>| {
            brand
                .and_then(field)
                .map(String::as_str)
                .filter(|v| !v.trim().is_empty())
        };

        let primary = pick(&[
            styles.theme_color.as_deref(),
            brand_field(|b| b.colors.primary.as_ref()),
        ])
        .unwrap_or(DEFAULT_PRIMARY)
        .to_string();
        let font_family = pick(&[
            styles.font_family.as_deref(),
            brand_field(|b| b.typography.body_font.as_ref()),
        ])
        .unwrap_or(DEFAULT_FONT)
        .to_string();

        Self {
            secondary: brand_field(|b| b.colors.secondary.as_ref())
                .unwrap_or(DEFAULT_SECONDARY)
                .to_string(),
            accent: brand_field(|b| b.colors.accent.as_ref())
                .unwrap_or(DEFAULT_ACCENT)
                .to_string(),
            background: pick(&[
                styles.background_color.as_deref(),
                brand_field(|b| b.colors.background.as_ref()),
            ])
            .unwrap_or(DEFAULT_BACKGROUND)
            .to_string(),
            text: pick(&[
                styles.text_color.as_deref(),
                brand_field(|b| b.colors.text.as_ref()),
            ])
            .unwrap_or(DEFAULT_TEXT)
            .to_string(),
            heading_font: brand_field(|b| b.typography.heading_font.as_ref())
                .unwrap_or(&font_family)
                .to_string(),
            base_font_size: brand
                .and_then(|b| b.typography.base_font_size.as_ref())
                .and_then(StyleValue::as_length)
                .unwrap_or_else(|| "16px".to_string()),
            content_width: styles
                .content_width
                .as_ref()
                .and_then(StyleValue::as_length)
                .unwrap_or_else(|| DEFAULT_CONTENT_WIDTH.to_string()),
            button_background: brand
                .and_then(Brand::button_background)
                .unwrap_or(&primary)
                .to_string(),
            button_text: brand
                .and_then(Brand::button_text_color)
                .unwrap_or("#ffffff")
                .to_string(),
            button_radius: brand
                .and_then(Brand::button_radius)
                .unwrap_or_else(|| DEFAULT_BUTTON_RADIUS.to_string()),
            input_radius: brand
                .and_then(Brand::input_radius)
                .unwrap_or_else(|| DEFAULT_INPUT_RADIUS.to_string()),
            input_border: brand_field(|b| b.components.input.border_color.as_ref())
                .unwrap_or("#cccccc")
                .to_string(),
            primary,
            font_family,
        }
    }

    /// `:root` custom properties
    pub fn to_css(&self) -> String {
        format!(
            ":root {{ --cp-primary: {}; --cp-secondary: {}; --cp-accent: {}; --cp-background: {}; --cp-text: {}; --cp-font: {}; --cp-heading-font: {}; --cp-font-size: {}; --cp-content-width: {}; --cp-button-bg: {}; --cp-button-text: {}; --cp-button-radius: {}; --cp-input-radius: {}; --cp-input-border: {}; }}",
            self.primary,
            self.secondary,
            self.accent,
            self.background,
            self.text,
            self.font_family,
            self.heading_font,
            self.base_font_size,
            self.content_width,
            self.button_background,
            self.button_text,
            self.button_radius,
            self.input_radius,
            self.input_border,
        )
    }

    /// Fonts that need a webfont link
    pub fn webfonts(&self) -> Vec<String> {
        let mut fonts: Vec<String> = Vec::new();
        for stack in [&self.font_family, &self.heading_font] {
            if let Some(family) = primary_family(stack) {
                if !is_web_safe(&family) && !fonts.contains(&family) {
                    fonts.push(family);
                }
            }
        }
        fonts
    }
}

fn pick<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|v| !v.trim().is_empty())
}

/// First family of a font stack with quotes stripped
pub fn primary_family(stack: &str) -> Option<String> {
    let first = stack.split(',').next()?.trim();
    let family = first.trim_matches(|c| c == '\'' || c == '"').trim();
    if family.is_empty() {
        None
    } else {
        Some(family.to_string())
    }
}

pub fn is_web_safe(family: &str) -> bool {
    WEB_SAFE_FONTS.contains(&family.to_ascii_lowercase().as_str())
}

/// Google Fonts stylesheet URL for the given families
pub fn google_font_url(families: &[String]) -> Option<String> {
    if families.is_empty() {
        return None;
    }
    let params: Vec<String> = families
        .iter()
        .map(|f| format!("family={}:wght@400;600;700", f.replace(' ', "+")))
        .collect();
    Some(format!(
        "https://fonts.googleapis.com/css2?{}&display=swap",
        params.join("&")
    ))
}

/// Theme variables followed by the fixed component ruleset
pub fn global_stylesheet(vars: &ThemeVars) -> String {
    let mut css = String::with_capacity(BASE_RULES.len() + 1024);
    css.push_str(&vars.to_css());
    css.push('\n');
    css.push_str(BASE_RULES);
    css
}

const BASE_RULES: &str = r#"* { box-sizing: border-box; }
html, body { margin: 0; padding: 0; }
body { background-color: var(--cp-background); color: var(--cp-text); font-family: var(--cp-font); font-size: var(--cp-font-size); line-height: 1.6; overflow-x: hidden; }
h1, h2, h3, h4, h5, h6 { font-family: var(--cp-heading-font); margin: 0 0 0.5em; line-height: 1.25; }
img { max-width: 100%; height: auto; }
a { color: var(--cp-primary); }
.cp-page { width: 100%; }
.cp-section { width: 100%; max-width: var(--cp-content-width); margin: 0 auto; padding: 12px 20px; position: relative; }
.cp-section .cp-section { padding: 8px 0; max-width: none; }
.cp-section.cp-align-left { text-align: left; }
.cp-section.cp-align-center { text-align: center; }
.cp-section.cp-align-right { text-align: right; }
.cp-error { color: #c23934; font-style: italic; }
.cp-animate { opacity: 0; animation-fill-mode: forwards; animation-timing-function: ease-out; }
.cp-anim-fade-in { animation-name: cp-fade-in; }
.cp-anim-slide-up { animation-name: cp-slide-up; }
.cp-anim-slide-left { animation-name: cp-slide-left; }
.cp-anim-zoom-in { animation-name: cp-zoom-in; }
@keyframes cp-fade-in { from { opacity: 0; } to { opacity: 1; } }
@keyframes cp-slide-up { from { opacity: 0; transform: translateY(30px); } to { opacity: 1; transform: none; } }
@keyframes cp-slide-left { from { opacity: 0; transform: translateX(30px); } to { opacity: 1; transform: none; } }
@keyframes cp-zoom-in { from { opacity: 0; transform: scale(0.9); } to { opacity: 1; transform: none; } }
.cp-header-inner { display: flex; align-items: center; justify-content: space-between; gap: 16px; flex-wrap: wrap; }
.cp-header-logo img { display: block; }
.cp-header-title { font-size: 1.25em; font-weight: 600; }
.cp-header-nav { display: flex; gap: 16px; flex-wrap: wrap; }
.cp-header-nav a { text-decoration: none; }
.cp-banner { position: relative; overflow: hidden; }
.cp-banner img { display: block; width: 100%; object-fit: cover; }
.cp-banner-text { position: absolute; inset: 0; display: flex; flex-direction: column; align-items: center; justify-content: center; color: #fff; text-align: center; padding: 20px; background: rgba(0, 0, 0, 0.3); }
.cp-image { margin: 0; }
.cp-image img { display: inline-block; }
.cp-image figcaption { font-size: 0.875em; color: #666; margin-top: 6px; }
.cp-float-image::after { content: ""; display: block; clear: both; }
.cp-float-image img { margin-bottom: 10px; }
.cp-float-left img { float: left; margin-right: 20px; }
.cp-float-right img { float: right; margin-left: 20px; }
.cp-video { position: relative; padding-bottom: 56.25%; height: 0; overflow: hidden; }
.cp-video iframe { position: absolute; top: 0; left: 0; width: 100%; height: 100%; border: 0; }
.cp-carousel { position: relative; overflow: hidden; }
.cp-slide { display: none; }
.cp-slide.active { display: block; }
.cp-slide img { display: block; width: 100%; }
.cp-slide-caption { text-align: center; padding: 8px; }
.cp-carousel-prev, .cp-carousel-next { position: absolute; top: 50%; transform: translateY(-50%); background: rgba(0, 0, 0, 0.4); color: #fff; border: 0; width: 40px; height: 40px; border-radius: 50%; cursor: pointer; }
.cp-carousel-prev { left: 10px; }
.cp-carousel-next { right: 10px; }
.cp-carousel-dots { text-align: center; padding: 8px 0; }
.cp-carousel-dot { display: inline-block; width: 10px; height: 10px; margin: 0 4px; border-radius: 50%; background: #ccc; border: 0; cursor: pointer; }
.cp-carousel-dot.active { background: var(--cp-primary); }
.cp-countdown { text-align: center; }
.cp-countdown-units { display: flex; justify-content: center; gap: 16px; }
.cp-countdown-unit { min-width: 70px; padding: 10px; border-radius: 8px; background: var(--cp-primary); color: #fff; }
.cp-countdown-value { display: block; font-size: 2em; font-weight: 700; }
.cp-countdown-label { font-size: 0.75em; text-transform: uppercase; }
.cp-countdown-expired { display: none; font-weight: 600; }
.cp-divider { border: 0; margin: 0 auto; }
.cp-button-wrapper { display: flex; justify-content: center; }
.cp-button { display: inline-flex; align-items: center; justify-content: center; gap: 8px; padding: 12px 28px; background-color: var(--cp-button-bg); color: var(--cp-button-text); border: 0; border-radius: var(--cp-button-radius); text-decoration: none; font-weight: 600; cursor: pointer; transition: opacity 0.2s; }
.cp-button:hover { opacity: 0.9; }
.cp-button-full { width: 100%; }
.cp-floating-button { position: fixed; bottom: 24px; z-index: 900; box-shadow: 0 4px 12px rgba(0, 0, 0, 0.2); }
.cp-bottom-right { right: 24px; }
.cp-bottom-left { left: 24px; }
.cp-form { max-width: 560px; margin: 0 auto; text-align: left; }
.cp-form-title { text-align: center; }
.cp-field { margin-bottom: 14px; }
.cp-field.cp-hidden { display: none; }
.cp-label { display: block; font-weight: 600; margin-bottom: 4px; }
.cp-required { color: #c23934; margin-left: 2px; }
.cp-input { width: 100%; padding: 10px 12px; font: inherit; border: 1px solid var(--cp-input-border); border-radius: var(--cp-input-radius); background: #fff; }
.cp-input:focus { outline: none; border-color: var(--cp-primary); }
.cp-input.cp-invalid { border-color: #c23934; }
.cp-field-error { display: none; color: #c23934; font-size: 0.8em; margin-top: 4px; }
.cp-invalid + .cp-field-error { display: block; }
.cp-checkbox { display: flex; align-items: flex-start; gap: 8px; font-weight: normal; }
.cp-submit { width: 100%; margin-top: 8px; }
.cp-success { text-align: center; padding: 24px; font-size: 1.1em; }
.cp-accordion-item { border-bottom: 1px solid #e0e0e0; }
.cp-accordion-header { width: 100%; text-align: left; background: none; border: 0; padding: 14px 0; font: inherit; font-weight: 600; cursor: pointer; display: flex; justify-content: space-between; }
.cp-accordion-header::after { content: "+"; }
.cp-accordion-item.open .cp-accordion-header::after { content: "-"; }
.cp-accordion-body { display: none; padding: 0 0 14px; }
.cp-accordion-item.open .cp-accordion-body { display: block; }
.cp-tabs-nav { display: flex; gap: 4px; border-bottom: 2px solid #e0e0e0; flex-wrap: wrap; }
.cp-tab-button { background: none; border: 0; padding: 10px 16px; font: inherit; cursor: pointer; border-bottom: 2px solid transparent; margin-bottom: -2px; }
.cp-tab-button.active { border-bottom-color: var(--cp-primary); color: var(--cp-primary); font-weight: 600; }
.cp-tab-panel { display: none; padding: 16px 0; }
.cp-tab-panel.active { display: block; }
.cp-voting { text-align: center; }
.cp-vote-options { display: flex; flex-direction: column; gap: 8px; max-width: 420px; margin: 0 auto; }
.cp-vote-option { padding: 10px; border: 1px solid var(--cp-primary); border-radius: var(--cp-button-radius); background: #fff; color: var(--cp-primary); font: inherit; cursor: pointer; }
.cp-vote-option.selected { background: var(--cp-primary); color: #fff; }
.cp-vote-bar { height: 6px; background: var(--cp-primary); border-radius: 3px; margin-top: 4px; }
.cp-vote-thanks { display: none; margin-top: 12px; }
.cp-stripe { width: 100%; padding: 10px 40px; text-align: center; background: var(--cp-secondary); color: #fff; position: relative; }
.cp-stripe a { color: inherit; font-weight: 600; margin-left: 8px; }
.cp-stripe-close { position: absolute; right: 12px; top: 50%; transform: translateY(-50%); background: none; border: 0; color: inherit; font-size: 1.2em; cursor: pointer; }
.cp-nps { text-align: center; }
.cp-nps-scale { display: flex; justify-content: center; gap: 4px; flex-wrap: wrap; }
.cp-nps-score { width: 40px; height: 40px; border: 1px solid #ccc; border-radius: 4px; background: #fff; font: inherit; cursor: pointer; }
.cp-nps-score.selected { background: var(--cp-primary); border-color: var(--cp-primary); color: #fff; }
.cp-nps-labels { display: flex; justify-content: space-between; max-width: 460px; margin: 6px auto 0; font-size: 0.8em; color: #666; }
.cp-nps-thanks { display: none; margin-top: 12px; }
.cp-map iframe, .cp-calendly iframe { width: 100%; border: 0; display: block; }
.cp-social { display: flex; gap: 12px; flex-wrap: wrap; }
.cp-social-link { display: inline-flex; align-items: center; justify-content: center; border-radius: 50%; background: var(--cp-primary); color: #fff; text-decoration: none; font-weight: 700; }
.cp-whatsapp { position: fixed; bottom: 24px; z-index: 950; width: 56px; height: 56px; border-radius: 50%; background: #25d366; color: #fff; display: flex; align-items: center; justify-content: center; box-shadow: 0 4px 12px rgba(0, 0, 0, 0.25); text-decoration: none; }
.cp-whatsapp svg { width: 30px; height: 30px; fill: currentColor; }
.cp-upload { border: 2px dashed #ccc; border-radius: 8px; padding: 20px; text-align: center; }
.cp-upload-status { margin-top: 8px; font-size: 0.9em; }
.cp-calendar-links { display: flex; gap: 8px; flex-wrap: wrap; justify-content: center; }
.cp-popup-overlay { display: none; position: fixed; inset: 0; background: rgba(0, 0, 0, 0.6); z-index: 1000; align-items: center; justify-content: center; padding: 20px; }
.cp-popup-overlay.open { display: flex; }
.cp-popup { background: #fff; border-radius: 8px; max-width: 520px; width: 100%; padding: 28px; position: relative; text-align: center; }
.cp-popup-close { position: absolute; top: 8px; right: 12px; background: none; border: 0; font-size: 1.5em; cursor: pointer; }
.cp-div { position: relative; }
.cp-columns { display: grid; gap: 20px; position: relative; }
.cp-column { min-width: 0; position: relative; z-index: 1; }
.cp-full-width { width: 100vw; position: relative; left: 50%; right: 50%; margin-left: -50vw; margin-right: -50vw; }
.cp-bg-overlay { position: absolute; inset: 0; pointer-events: none; z-index: 0; }
.cp-bg-content { position: relative; z-index: 1; }
.cp-footer { text-align: center; font-size: 0.875em; color: #666; padding: 24px 0; }
.cp-footer-links { display: flex; justify-content: center; gap: 16px; flex-wrap: wrap; margin-top: 8px; }
#cp-loading { display: none; position: fixed; inset: 0; background: rgba(255, 255, 255, 0.85); z-index: 2000; align-items: center; justify-content: center; }
#cp-loading.active { display: flex; }
.cp-spinner { width: 48px; height: 48px; border: 4px solid #e0e0e0; border-top-color: var(--cp-primary); border-radius: 50%; animation: cp-spin 0.8s linear infinite; }
@keyframes cp-spin { to { transform: rotate(360deg); } }
.cp-cookie-banner { position: fixed; left: 0; right: 0; z-index: 1500; padding: 16px 20px; display: flex; gap: 12px; align-items: center; justify-content: center; flex-wrap: wrap; background: #222; color: #fff; }
.cp-cookie-bottom { bottom: 0; }
.cp-cookie-top { top: 0; }
.cp-cookie-banner button { padding: 8px 18px; border: 0; border-radius: 4px; cursor: pointer; font: inherit; }
.cp-login { max-width: 400px; margin: 80px auto; padding: 32px; border-radius: 8px; box-shadow: 0 2px 16px rgba(0, 0, 0, 0.1); background: #fff; }
.cp-login-error { color: #c23934; margin-bottom: 12px; }
@media (min-width: 769px) { .cp-hide-desktop { display: none !important; } }
@media (max-width: 768px) {
  .cp-hide-mobile { display: none !important; }
  .cp-columns.cp-columns-stack { grid-template-columns: 1fr !important; }
  .cp-header-inner { justify-content: center; }
  .cp-float-left img, .cp-float-right img { float: none; margin: 0 0 10px; }
  .cp-countdown-units { gap: 8px; }
  .cp-countdown-unit { min-width: 56px; }
}
"#;
