//! Strongly-typed props for every component type.
//!
//! Every props record embeds [`CommonProps`] (flattened) so styles, responsive
//! overrides and animation settings are read the same way for all components.

use crate::style::{StyleMap, StyleValue};
use serde::{Deserialize, Deserializer, Serialize};

/// Fields shared by all components
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommonProps {
    pub styles: StyleMap,
    /// Overrides applied below the mobile breakpoint
    pub mobile_styles: StyleMap,
    pub layout: Option<LayoutConfig>,
    pub animation: Option<AnimationConfig>,
    pub hide_on_mobile: bool,
    pub hide_on_desktop: bool,
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub alignment: Option<Alignment>,
    pub max_width: Option<StyleValue>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl Alignment {
    pub fn as_css(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }

    /// Flexbox `justify-content` equivalent
    pub fn as_flex(self) -> &'static str {
        match self {
            Alignment::Left => "flex-start",
            Alignment::Center => "center",
            Alignment::Right => "flex-end",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnimationConfig {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Seconds
    pub duration: Option<f64>,
    /// Seconds
    pub delay: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkItem {
    pub label: String,
    pub url: String,
    pub open_in_new_tab: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub logo_url: Option<String>,
    pub logo_alt: Option<String>,
    pub logo_height: Option<StyleValue>,
    pub title: Option<String>,
    pub links: Vec<LinkItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BannerProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub image_url: Option<String>,
    pub alt: Option<String>,
    pub link_url: Option<String>,
    pub height: Option<StyleValue>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

/// Props for Title, Subtitle and Paragraph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub text: String,
    /// Data-extension field whose value replaces `text` at serve time
    pub data_binding: Option<String>,
    /// Heading level for titles (1-6)
    pub level: Option<u8>,
}

impl TextProps {
    pub fn binding(&self) -> Option<&str> {
        self.data_binding
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub src: Option<String>,
    pub alt: Option<String>,
    pub width: Option<StyleValue>,
    pub link_url: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloatSide {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FloatingImageProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub src: Option<String>,
    pub alt: Option<String>,
    pub text: Option<String>,
    pub position: FloatSide,
    pub width: Option<StyleValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub url: Option<String>,
    pub title: Option<String>,
    pub autoplay: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarouselSlide {
    pub image_url: String,
    pub alt: Option<String>,
    pub caption: Option<String>,
    pub link_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarouselProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub slides: Vec<CarouselSlide>,
    pub autoplay: Option<bool>,
    /// Milliseconds between slides
    pub interval: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CountdownProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub target_date: Option<String>,
    pub title: Option<String>,
    pub expired_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividerProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub color: Option<String>,
    pub thickness: Option<StyleValue>,
    pub width: Option<StyleValue>,
    #[serde(rename = "style")]
    pub line_style: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpacerProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub height: Option<StyleValue>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    #[default]
    Url,
    Scroll,
    Email,
    Phone,
}

/// What a button does when clicked
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub url: Option<String>,
    /// Component id to scroll to for [`ActionKind::Scroll`]
    pub target_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub open_in_new_tab: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub text: Option<String>,
    pub url: Option<String>,
    pub action: Option<ButtonAction>,
    pub open_in_new_tab: bool,
    pub full_width: bool,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DownloadButtonProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub text: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    #[default]
    BottomRight,
    BottomLeft,
}

impl Corner {
    pub fn as_class(self) -> &'static str {
        match self {
            Corner::BottomRight => "bottom-right",
            Corner::BottomLeft => "bottom-left",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FloatingButtonProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub text: Option<String>,
    pub url: Option<String>,
    pub position: Corner,
    pub icon: Option<String>,
}

/// Show a field only when another field holds a given value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConditionalRule {
    /// Input name of the trigger field
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldConfig {
    pub enabled: bool,
    pub required: bool,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub prefill_from_url: bool,
    pub conditional: Option<ConditionalRule>,
}

/// The six built-in form fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StandardFields {
    pub name: Option<FieldConfig>,
    pub email: Option<FieldConfig>,
    pub phone: Option<FieldConfig>,
    pub cpf: Option<FieldConfig>,
    pub city: Option<FieldConfig>,
    pub birthdate: Option<FieldConfig>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomFieldType {
    #[default]
    Text,
    Number,
    Date,
    Checkbox,
    Select,
    Textarea,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomField {
    pub id: String,
    /// Data-extension column and query parameter name
    pub name: Option<String>,
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub field_type: CustomFieldType,
    pub required: bool,
    pub placeholder: Option<String>,
    pub options: Vec<String>,
    pub prefill_from_url: bool,
    pub conditional: Option<ConditionalRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsentConfig {
    pub enabled: bool,
    pub required: bool,
    pub text: Option<String>,
    pub link_url: Option<String>,
}

/// Submit button overrides on a form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormButtonProps {
    pub text: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub border_radius: Option<StyleValue>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub title: Option<String>,
    pub fields: StandardFields,
    pub custom_fields: Vec<CustomField>,
    pub consent: Option<ConsentConfig>,
    pub button_text: Option<String>,
    pub button_props: Option<FormButtonProps>,
    pub success_message: Option<String>,
    pub redirect_url: Option<String>,
}

/// Title/content pair used by accordions and tabs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentItem {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccordionProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub items: Vec<ContentItem>,
    pub allow_multiple: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TabsProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub tabs: Vec<ContentItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VoteOption {
    pub id: Option<String>,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VotingProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub question: Option<String>,
    pub options: Vec<VoteOption>,
    pub show_results: bool,
    pub thank_you_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StripeProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub text: String,
    pub link_url: Option<String>,
    pub link_text: Option<String>,
    pub dismissible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NpsProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub question: Option<String>,
    pub low_label: Option<String>,
    pub high_label: Option<String>,
    pub thank_you_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub address: Option<String>,
    pub zoom: Option<f64>,
    pub height: Option<StyleValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialLink {
    pub network: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialIconsProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub icons: Vec<SocialLink>,
    /// Icon size in pixels
    pub size: Option<f64>,
    pub alignment: Option<Alignment>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WhatsAppProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub phone_number: String,
    pub message: Option<String>,
    pub position: Corner,
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FtpUploadProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub label: Option<String>,
    pub accept: Option<String>,
    pub max_size_mb: Option<f64>,
    /// Upload handler that forwards files to the transfer sink
    pub endpoint: Option<String>,
    pub folder: Option<String>,
    pub button_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataExtensionUploadProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub label: Option<String>,
    pub data_extension_key: Option<String>,
    pub endpoint: Option<String>,
    pub button_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendlyProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub url: Option<String>,
    pub height: Option<StyleValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddToCalendarProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub button_text: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PopUpTrigger {
    #[default]
    OnLoad,
    Delay,
    ExitIntent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PopUpProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub trigger: PopUpTrigger,
    pub delay_seconds: Option<f64>,
    pub button_text: Option<String>,
    pub button_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomHtmlProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub html: String,
}

/// Props for a `Div` container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DivProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub full_width: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
    Bottom,
    Stretch,
}

impl VerticalAlign {
    pub fn as_css(self) -> &'static str {
        match self {
            VerticalAlign::Top => "start",
            VerticalAlign::Center => "center",
            VerticalAlign::Bottom => "end",
            VerticalAlign::Stretch => "stretch",
        }
    }
}

pub const DEFAULT_COLUMN_COUNT: u32 = 2;
pub const MAX_COLUMN_COUNT: u32 = 6;
/// Allowed deviation of the width sum from 100
pub const WIDTH_SUM_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnsProps {
    #[serde(flatten)]
    pub common: CommonProps,
    #[serde(deserialize_with = "lenient_u32")]
    pub column_count: Option<u32>,
    /// Percentages, one per column
    pub column_widths: Vec<f64>,
    pub gap: Option<StyleValue>,
    pub column_styles: Vec<StyleMap>,
    pub full_width: bool,
    pub stack_on_mobile: Option<bool>,
    pub vertical_align: VerticalAlign,
}

impl ColumnsProps {
    /// Declared column count clamped to the supported range
    pub fn columns(&self) -> u32 {
        self.column_count
            .unwrap_or(DEFAULT_COLUMN_COUNT)
            .clamp(1, MAX_COLUMN_COUNT)
    }

    /// The declared widths when they can be honoured: one positive width per
    /// column summing to 100. Anything else falls back to equal columns.
    pub fn valid_widths(&self) -> Option<&[f64]> {
        let widths = self.column_widths.as_slice();
        let sum: f64 = widths.iter().sum();
        let valid = widths.len() == self.columns() as usize
            && widths.iter().all(|w| w.is_finite() && *w > 0.0)
            && (sum - 100.0).abs() <= WIDTH_SUM_TOLERANCE;
        valid.then_some(widths)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterProps {
    #[serde(flatten)]
    pub common: CommonProps,
    pub text: Option<String>,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub links: Vec<LinkItem>,
}

/// Accepts `3`, `3.0` or `"3"`
fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().map(|f| f.max(0.0) as u32),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_props_flatten() {
        let json = r##"{
            "text": "Hello",
            "styles": {"color": "#333"},
            "mobileStyles": {"fontSize": "14px"},
            "hideOnMobile": true
        }"##;
        let props: TextProps = serde_json::from_str(json).unwrap();
        assert_eq!(props.text, "Hello");
        assert_eq!(props.common.styles.css("color").as_deref(), Some("#333"));
        assert_eq!(props.common.mobile_styles.len(), 1);
        assert!(props.common.hide_on_mobile);
    }

    #[test]
    fn test_column_count_accepts_strings() {
        let props: ColumnsProps = serde_json::from_str(r#"{"columnCount": "3"}"#).unwrap();
        assert_eq!(props.columns(), 3);

        let props: ColumnsProps = serde_json::from_str(r#"{"columnCount": 12}"#).unwrap();
        assert_eq!(props.columns(), MAX_COLUMN_COUNT);

        let props: ColumnsProps = serde_json::from_str("{}").unwrap();
        assert_eq!(props.columns(), DEFAULT_COLUMN_COUNT);
    }

    #[test]
    fn test_column_widths_must_fill_every_column() {
        let props: ColumnsProps =
            serde_json::from_str(r#"{"columnCount": 3, "columnWidths": [50, 25, 25]}"#).unwrap();
        assert_eq!(props.valid_widths(), Some(&[50.0, 25.0, 25.0][..]));

        let props: ColumnsProps =
            serde_json::from_str(r#"{"columnCount": 3, "columnWidths": [50, 50]}"#).unwrap();
        assert_eq!(props.valid_widths(), None);

        let props: ColumnsProps =
            serde_json::from_str(r#"{"columnCount": 2, "columnWidths": [60, 60]}"#).unwrap();
        assert_eq!(props.valid_widths(), None);
    }

    #[test]
    fn test_blank_binding_is_unbound() {
        let props = TextProps {
            data_binding: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(props.binding(), None);
    }
}
