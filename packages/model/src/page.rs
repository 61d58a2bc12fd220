use crate::brand::Brand;
use crate::component::{ComponentProps, ComponentType, PageComponent};
use crate::error::ModelResult;
use crate::props::FormProps;
use crate::style::StyleValue;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The page aggregate handed to the generator as a read-only snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CloudPage {
    pub id: String,
    pub name: Option<String>,
    /// Flat list; nesting is encoded with parent pointers
    pub components: Vec<PageComponent>,
    pub styles: PageStyles,
    pub meta: PageMeta,
    pub brand: Option<Brand>,
    pub cookie_banner: Option<CookieBanner>,
}

impl CloudPage {
    pub fn from_json(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> ModelResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn find(&self, id: &str) -> Option<&PageComponent> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn components_of_type(
        &self,
        component_type: ComponentType,
    ) -> impl Iterator<Item = &PageComponent> {
        self.components
            .iter()
            .filter(move |c| c.component_type() == component_type)
    }

    pub fn has_component(&self, component_type: ComponentType) -> bool {
        self.components_of_type(component_type).next().is_some()
    }

    /// The page's form. Only the first Form in list order is wired to the
    /// submission script.
    pub fn form(&self) -> Option<(&PageComponent, &FormProps)> {
        self.components.iter().find_map(|c| match &c.props {
            ComponentProps::Form(props) => Some((c, props)),
            _ => None,
        })
    }

    /// Components whose A/B overlay is active
    pub fn ab_test_components(&self) -> impl Iterator<Item = &PageComponent> {
        self.components.iter().filter(|c| c.has_ab_test())
    }

    /// Field names bound through `dataBinding`, in first-seen order
    pub fn data_bindings(&self) -> Vec<String> {
        let mut bindings: Vec<String> = Vec::new();
        for component in &self.components {
            let props = match &component.props {
                ComponentProps::Title(p)
                | ComponentProps::Subtitle(p)
                | ComponentProps::Paragraph(p) => p,
                _ => continue,
            };
            if let Some(binding) = props.binding() {
                if !bindings.iter().any(|b| b == binding) {
                    bindings.push(binding.to_string());
                }
            }
        }
        bindings
    }

    pub fn title(&self) -> &str {
        self.meta
            .title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("CloudPage")
    }
}

/// Page-level theme
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageStyles {
    pub background_color: Option<String>,
    pub theme_color: Option<String>,
    pub text_color: Option<String>,
    pub font_family: Option<String>,
    pub content_width: Option<StyleValue>,
    /// Appended verbatim after the global stylesheet
    pub custom_css: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub og_image: Option<String>,
    pub favicon: Option<String>,
    pub loader_image: Option<String>,
    pub language: Option<String>,
    pub tracking: TrackingConfig,
    pub security: SecurityConfig,
    /// Raw template script injected verbatim before the body renders
    pub custom_ampscript: Option<String>,
    pub data_extension_key: Option<String>,
    pub data_extension_target_method: DataExtensionTarget,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackingConfig {
    pub gtm: TrackerConfig,
    pub ga4: TrackerConfig,
    pub meta_pixel: TrackerConfig,
    pub linkedin: TrackerConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerConfig {
    pub enabled: bool,
    pub id: Option<String>,
}

impl TrackerConfig {
    /// Id of an enabled tracker with a non-empty id
    pub fn active_id(&self) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}

/// How the page is protected
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SecurityConfig {
    #[default]
    None,
    Password(PasswordSecurity),
    Sso(SsoSecurity),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordSecurity {
    /// Data extension holding the credentials
    pub data_extension_key: String,
    pub identifier_field: String,
    pub password_field: String,
    pub login_title: Option<String>,
    pub identifier_label: Option<String>,
    pub password_label: Option<String>,
    pub button_text: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SsoSecurity {
    pub login_url: String,
    /// Query parameter carrying the identity token
    pub identity_parameter: Option<String>,
    pub redirect_message: Option<String>,
}

/// How form submissions address the data extension
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataExtensionTarget {
    #[default]
    Key,
    Name,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerPosition {
    #[default]
    Bottom,
    Top,
}

/// Cookie-consent banner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CookieBanner {
    pub enabled: bool,
    pub text: Option<String>,
    pub accept_text: Option<String>,
    pub decline_text: Option<String>,
    pub policy_url: Option<String>,
    pub policy_link_text: Option<String>,
    pub position: BannerPosition,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub button_color: Option<String>,
}
