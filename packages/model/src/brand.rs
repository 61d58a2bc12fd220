use crate::style::StyleValue;
use serde::{Deserialize, Serialize};

/// Reusable theme a page may reference for style fallbacks.
///
/// Resolution order everywhere is component style, then brand, then the
/// renderer's hardcoded default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Brand {
    pub id: Option<String>,
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub colors: BrandColors,
    pub typography: BrandTypography,
    pub components: BrandComponents,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandColors {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub accent: Option<String>,
    pub background: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandTypography {
    pub heading_font: Option<String>,
    pub body_font: Option<String>,
    pub base_font_size: Option<StyleValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandComponents {
    pub button: ButtonDefaults,
    pub input: InputDefaults,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonDefaults {
    pub border_radius: Option<StyleValue>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputDefaults {
    pub border_radius: Option<StyleValue>,
    pub border_color: Option<String>,
    pub background_color: Option<String>,
}

impl Brand {
    /// Button background: explicit button default, then primary colour
    pub fn button_background(&self) -> Option<&str> {
        non_empty(self.components.button.background_color.as_deref())
            .or_else(|| non_empty(self.colors.primary.as_deref()))
    }

    pub fn button_text_color(&self) -> Option<&str> {
        non_empty(self.components.button.text_color.as_deref())
    }

    pub fn button_radius(&self) -> Option<String> {
        self.components
            .button
            .border_radius
            .as_ref()
            .and_then(StyleValue::as_length)
    }

    pub fn input_radius(&self) -> Option<String> {
        self.components
            .input
            .border_radius
            .as_ref()
            .and_then(StyleValue::as_length)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
