use crate::error::{ModelError, ModelResult};
use crate::ident;
use crate::props::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, warn};

/// The closed set of component types the editor can place on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentType {
    Header,
    Banner,
    Title,
    Subtitle,
    Paragraph,
    Image,
    FloatingImage,
    Video,
    Carousel,
    Countdown,
    Divider,
    Spacer,
    Button,
    DownloadButton,
    FloatingButton,
    Form,
    Accordion,
    Tabs,
    Voting,
    Stripe,
    #[serde(rename = "NPS")]
    Nps,
    Map,
    SocialIcons,
    WhatsApp,
    #[serde(rename = "FTPUpload")]
    FtpUpload,
    DataExtensionUpload,
    Calendly,
    AddToCalendar,
    PopUp,
    #[serde(rename = "CustomHTML")]
    CustomHtml,
    Div,
    Columns,
    Footer,
}

impl ComponentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentType::Header => "Header",
            ComponentType::Banner => "Banner",
            ComponentType::Title => "Title",
            ComponentType::Subtitle => "Subtitle",
            ComponentType::Paragraph => "Paragraph",
            ComponentType::Image => "Image",
            ComponentType::FloatingImage => "FloatingImage",
            ComponentType::Video => "Video",
            ComponentType::Carousel => "Carousel",
            ComponentType::Countdown => "Countdown",
            ComponentType::Divider => "Divider",
            ComponentType::Spacer => "Spacer",
            ComponentType::Button => "Button",
            ComponentType::DownloadButton => "DownloadButton",
            ComponentType::FloatingButton => "FloatingButton",
            ComponentType::Form => "Form",
            ComponentType::Accordion => "Accordion",
            ComponentType::Tabs => "Tabs",
            ComponentType::Voting => "Voting",
            ComponentType::Stripe => "Stripe",
            ComponentType::Nps => "NPS",
            ComponentType::Map => "Map",
            ComponentType::SocialIcons => "SocialIcons",
            ComponentType::WhatsApp => "WhatsApp",
            ComponentType::FtpUpload => "FTPUpload",
            ComponentType::DataExtensionUpload => "DataExtensionUpload",
            ComponentType::Calendly => "Calendly",
            ComponentType::AddToCalendar => "AddToCalendar",
            ComponentType::PopUp => "PopUp",
            ComponentType::CustomHtml => "CustomHTML",
            ComponentType::Div => "Div",
            ComponentType::Columns => "Columns",
            ComponentType::Footer => "Footer",
        }
    }

    /// Class-name fragment, e.g. `FloatingImage` → `floating-image`
    pub fn css_name(self) -> &'static str {
        match self {
            ComponentType::Header => "header",
            ComponentType::Banner => "banner",
            ComponentType::Title => "title",
            ComponentType::Subtitle => "subtitle",
            ComponentType::Paragraph => "paragraph",
            ComponentType::Image => "image",
            ComponentType::FloatingImage => "floating-image",
            ComponentType::Video => "video",
            ComponentType::Carousel => "carousel",
            ComponentType::Countdown => "countdown",
            ComponentType::Divider => "divider",
            ComponentType::Spacer => "spacer",
            ComponentType::Button => "button",
            ComponentType::DownloadButton => "download-button",
            ComponentType::FloatingButton => "floating-button",
            ComponentType::Form => "form",
            ComponentType::Accordion => "accordion",
            ComponentType::Tabs => "tabs",
            ComponentType::Voting => "voting",
            ComponentType::Stripe => "stripe",
            ComponentType::Nps => "nps",
            ComponentType::Map => "map",
            ComponentType::SocialIcons => "social-icons",
            ComponentType::WhatsApp => "whatsapp",
            ComponentType::FtpUpload => "ftp-upload",
            ComponentType::DataExtensionUpload => "de-upload",
            ComponentType::Calendly => "calendly",
            ComponentType::AddToCalendar => "add-to-calendar",
            ComponentType::PopUp => "popup",
            ComponentType::CustomHtml => "custom-html",
            ComponentType::Div => "div",
            ComponentType::Columns => "columns",
            ComponentType::Footer => "footer",
        }
    }

    /// Containers own children through `parentId`
    pub fn is_container(self) -> bool {
        matches!(self, ComponentType::Div | ComponentType::Columns)
    }

    /// Rendered outside the main content flow by the document assembler
    pub fn is_page_level(self) -> bool {
        matches!(self, ComponentType::Stripe | ComponentType::WhatsApp)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed props, one variant per component type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "props")]
pub enum ComponentProps {
    Header(HeaderProps),
    Banner(BannerProps),
    Title(TextProps),
    Subtitle(TextProps),
    Paragraph(TextProps),
    Image(ImageProps),
    FloatingImage(FloatingImageProps),
    Video(VideoProps),
    Carousel(CarouselProps),
    Countdown(CountdownProps),
    Divider(DividerProps),
    Spacer(SpacerProps),
    Button(ButtonProps),
    DownloadButton(DownloadButtonProps),
    FloatingButton(FloatingButtonProps),
    Form(FormProps),
    Accordion(AccordionProps),
    Tabs(TabsProps),
    Voting(VotingProps),
    Stripe(StripeProps),
    #[serde(rename = "NPS")]
    Nps(NpsProps),
    Map(MapProps),
    SocialIcons(SocialIconsProps),
    WhatsApp(WhatsAppProps),
    #[serde(rename = "FTPUpload")]
    FtpUpload(FtpUploadProps),
    DataExtensionUpload(DataExtensionUploadProps),
    Calendly(CalendlyProps),
    AddToCalendar(AddToCalendarProps),
    PopUp(PopUpProps),
    #[serde(rename = "CustomHTML")]
    CustomHtml(CustomHtmlProps),
    Div(DivProps),
    Columns(ColumnsProps),
    Footer(FooterProps),
}

impl ComponentProps {
    /// Decode a raw props object for the given component type
    pub fn from_value(component_type: ComponentType, props: Value) -> serde_json::Result<Self> {
        let props = match props {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        let mut tagged = Map::new();
        tagged.insert(
            "type".to_string(),
            Value::String(component_type.as_str().to_string()),
        );
        tagged.insert("props".to_string(), props);
        serde_json::from_value(Value::Object(tagged))
    }

    /// Raw props object (the `props` half of the tagged encoding)
    pub fn to_value(&self) -> serde_json::Result<Value> {
        let tagged = serde_json::to_value(self)?;
        Ok(match tagged {
            Value::Object(mut map) => map.remove("props").unwrap_or(Value::Null),
            other => other,
        })
    }

    pub fn component_type(&self) -> ComponentType {
        match self {
            ComponentProps::Header(_) => ComponentType::Header,
            ComponentProps::Banner(_) => ComponentType::Banner,
            ComponentProps::Title(_) => ComponentType::Title,
            ComponentProps::Subtitle(_) => ComponentType::Subtitle,
            ComponentProps::Paragraph(_) => ComponentType::Paragraph,
            ComponentProps::Image(_) => ComponentType::Image,
            ComponentProps::FloatingImage(_) => ComponentType::FloatingImage,
            ComponentProps::Video(_) => ComponentType::Video,
            ComponentProps::Carousel(_) => ComponentType::Carousel,
            ComponentProps::Countdown(_) => ComponentType::Countdown,
            ComponentProps::Divider(_) => ComponentType::Divider,
            ComponentProps::Spacer(_) => ComponentType::Spacer,
            ComponentProps::Button(_) => ComponentType::Button,
            ComponentProps::DownloadButton(_) => ComponentType::DownloadButton,
            ComponentProps::FloatingButton(_) => ComponentType::FloatingButton,
            ComponentProps::Form(_) => ComponentType::Form,
            ComponentProps::Accordion(_) => ComponentType::Accordion,
            ComponentProps::Tabs(_) => ComponentType::Tabs,
            ComponentProps::Voting(_) => ComponentType::Voting,
            ComponentProps::Stripe(_) => ComponentType::Stripe,
            ComponentProps::Nps(_) => ComponentType::Nps,
            ComponentProps::Map(_) => ComponentType::Map,
            ComponentProps::SocialIcons(_) => ComponentType::SocialIcons,
            ComponentProps::WhatsApp(_) => ComponentType::WhatsApp,
            ComponentProps::FtpUpload(_) => ComponentType::FtpUpload,
            ComponentProps::DataExtensionUpload(_) => ComponentType::DataExtensionUpload,
            ComponentProps::Calendly(_) => ComponentType::Calendly,
            ComponentProps::AddToCalendar(_) => ComponentType::AddToCalendar,
            ComponentProps::PopUp(_) => ComponentType::PopUp,
            ComponentProps::CustomHtml(_) => ComponentType::CustomHtml,
            ComponentProps::Div(_) => ComponentType::Div,
            ComponentProps::Columns(_) => ComponentType::Columns,
            ComponentProps::Footer(_) => ComponentType::Footer,
        }
    }

    pub fn common(&self) -> &CommonProps {
        match self {
            ComponentProps::Header(p) => &p.common,
            ComponentProps::Banner(p) => &p.common,
            ComponentProps::Title(p) | ComponentProps::Subtitle(p) | ComponentProps::Paragraph(p) => {
                &p.common
            }
            ComponentProps::Image(p) => &p.common,
            ComponentProps::FloatingImage(p) => &p.common,
            ComponentProps::Video(p) => &p.common,
            ComponentProps::Carousel(p) => &p.common,
            ComponentProps::Countdown(p) => &p.common,
            ComponentProps::Divider(p) => &p.common,
            ComponentProps::Spacer(p) => &p.common,
            ComponentProps::Button(p) => &p.common,
            ComponentProps::DownloadButton(p) => &p.common,
            ComponentProps::FloatingButton(p) => &p.common,
            ComponentProps::Form(p) => &p.common,
            ComponentProps::Accordion(p) => &p.common,
            ComponentProps::Tabs(p) => &p.common,
            ComponentProps::Voting(p) => &p.common,
            ComponentProps::Stripe(p) => &p.common,
            ComponentProps::Nps(p) => &p.common,
            ComponentProps::Map(p) => &p.common,
            ComponentProps::SocialIcons(p) => &p.common,
            ComponentProps::WhatsApp(p) => &p.common,
            ComponentProps::FtpUpload(p) => &p.common,
            ComponentProps::DataExtensionUpload(p) => &p.common,
            ComponentProps::Calendly(p) => &p.common,
            ComponentProps::AddToCalendar(p) => &p.common,
            ComponentProps::PopUp(p) => &p.common,
            ComponentProps::CustomHtml(p) => &p.common,
            ComponentProps::Div(p) => &p.common,
            ComponentProps::Columns(p) => &p.common,
            ComponentProps::Footer(p) => &p.common,
        }
    }
}

/// A node of the page's component tree.
///
/// The tree is encoded with parent pointers: `parent_id` names the owning
/// `Div`/`Columns`, `column` selects the slot of a `Columns` parent and
/// `order` sorts siblings sharing a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawComponent", into = "RawComponent")]
pub struct PageComponent {
    pub id: String,
    pub parent_id: Option<String>,
    pub column: Option<u32>,
    pub order: Option<i64>,
    pub props: ComponentProps,
    pub ab_test_enabled: bool,
    /// Partial props patches; only the first one ("Variant B") is used
    pub ab_test_variants: Vec<Value>,
}

impl PageComponent {
    pub fn new(id: impl Into<String>, props: ComponentProps) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            column: None,
            order: None,
            props,
            ab_test_enabled: false,
            ab_test_variants: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>, column: Option<u32>) -> Self {
        self.parent_id = Some(parent_id.into());
        self.column = column;
        self
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_variant(mut self, patch: Value) -> Self {
        self.ab_test_enabled = true;
        self.ab_test_variants = vec![patch];
        self
    }

    pub fn component_type(&self) -> ComponentType {
        self.props.component_type()
    }

    pub fn common(&self) -> &CommonProps {
        self.props.common()
    }

    pub fn dom_id(&self) -> String {
        ident::dom_id(&self.id)
    }

    pub fn script_ident(&self) -> String {
        ident::script_ident(&self.id)
    }

    /// A/B testing is active only with at least one variant patch
    pub fn has_ab_test(&self) -> bool {
        self.ab_test_enabled
            && self
                .ab_test_variants
                .first()
                .map(|patch| patch.as_object().map(|o| !o.is_empty()).unwrap_or(false))
                .unwrap_or(false)
    }

    /// "Variant B": the base props with `ab_test_variants[0]` shallow-merged on top
    pub fn variant_b(&self) -> ModelResult<PageComponent> {
        let patch = match self.ab_test_variants.first().and_then(Value::as_object) {
            Some(patch) => patch,
            None => return Ok(self.clone()),
        };

        let mut props = match self.props.to_value()? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in patch {
            props.insert(key.clone(), value.clone());
        }

        let merged = ComponentProps::from_value(self.component_type(), Value::Object(props))
            .map_err(|e| ModelError::InvalidProps {
                id: self.id.clone(),
                component_type: self.component_type().to_string(),
                message: e.to_string(),
            })?;

        Ok(PageComponent {
            props: merged,
            ..self.clone()
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawComponent {
    id: String,
    #[serde(rename = "type")]
    component_type: ComponentType,
    #[serde(default)]
    parent_id: Option<String>,
    #[serde(default)]
    column: Option<u32>,
    #[serde(default)]
    order: Option<i64>,
    #[serde(default)]
    props: Value,
    #[serde(default)]
    ab_test_enabled: bool,
    #[serde(default)]
    ab_test_variants: Vec<Value>,
}

impl TryFrom<RawComponent> for PageComponent {
    type Error = ModelError;

    fn try_from(raw: RawComponent) -> Result<Self, Self::Error> {
        let props = decode_props(&raw.id, raw.component_type, raw.props)?;

        Ok(PageComponent {
            id: raw.id,
            parent_id: raw.parent_id.filter(|p| !p.is_empty()),
            column: raw.column,
            order: raw.order,
            props,
            ab_test_enabled: raw.ab_test_enabled,
            ab_test_variants: raw.ab_test_variants,
        })
    }
}

/// Typed props for one component. Top-level fields that fail to decode are
/// dropped one by one so a single bad value degrades that field only.
fn decode_props(id: &str, component_type: ComponentType, props: Value) -> ModelResult<ComponentProps> {
    let error = match ComponentProps::from_value(component_type, props.clone()) {
        Ok(decoded) => return Ok(decoded),
        Err(e) => e,
    };
    warn!(id, %component_type, error = %error, "Invalid props, keeping the fields that decode");

    let mut kept = Map::new();
    if let Value::Object(fields) = props {
        for (key, value) in fields {
            kept.insert(key.clone(), value);
            if ComponentProps::from_value(component_type, Value::Object(kept.clone())).is_err() {
                debug!(id, field = %key, "Dropping invalid prop");
                kept.remove(&key);
            }
        }
    }

    ComponentProps::from_value(component_type, Value::Object(kept)).map_err(|e| {
        ModelError::InvalidProps {
            id: id.to_string(),
            component_type: component_type.to_string(),
            message: e.to_string(),
        }
    })
}

impl From<PageComponent> for RawComponent {
    fn from(component: PageComponent) -> Self {
        let component_type = component.component_type();
        RawComponent {
            id: component.id,
            component_type,
            parent_id: component.parent_id,
            column: component.column,
            order: component.order,
            props: component.props.to_value().unwrap_or(Value::Null),
            ab_test_enabled: component.ab_test_enabled,
            ab_test_variants: component.ab_test_variants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_typed_props() {
        let component: PageComponent = serde_json::from_value(json!({
            "id": "t1",
            "type": "Title",
            "order": 2,
            "props": { "text": "Hello", "dataBinding": "FirstName" }
        }))
        .unwrap();

        assert_eq!(component.component_type(), ComponentType::Title);
        assert_eq!(component.order, Some(2));
        match &component.props {
            ComponentProps::Title(p) => {
                assert_eq!(p.text, "Hello");
                assert_eq!(p.binding(), Some("FirstName"));
            }
            other => panic!("Expected title props, got {:?}", other),
        }
    }

    #[test]
    fn test_renamed_types() {
        for (tag, expected) in [
            ("NPS", ComponentType::Nps),
            ("FTPUpload", ComponentType::FtpUpload),
            ("CustomHTML", ComponentType::CustomHtml),
            ("WhatsApp", ComponentType::WhatsApp),
        ] {
            let component: PageComponent =
                serde_json::from_value(json!({ "id": "x", "type": tag })).unwrap();
            assert_eq!(component.component_type(), expected);
            assert_eq!(expected.as_str(), tag);
        }
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result: Result<PageComponent, _> =
            serde_json::from_value(json!({ "id": "x", "type": "Marquee" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_variant_b_merges_patch() {
        let component: PageComponent = serde_json::from_value(json!({
            "id": "hero",
            "type": "Title",
            "props": { "text": "Variant A", "styles": { "color": "red" } },
            "abTestEnabled": true,
            "abTestVariants": [{ "text": "Variant B" }]
        }))
        .unwrap();

        assert!(component.has_ab_test());
        let variant = component.variant_b().unwrap();
        match &variant.props {
            ComponentProps::Title(p) => {
                assert_eq!(p.text, "Variant B");
                assert_eq!(p.common.styles.css("color").as_deref(), Some("red"));
            }
            other => panic!("Expected title props, got {:?}", other),
        }
        assert_eq!(variant.id, "hero");
    }

    #[test]
    fn test_ab_test_requires_patch() {
        let component: PageComponent = serde_json::from_value(json!({
            "id": "hero",
            "type": "Title",
            "abTestEnabled": true,
            "abTestVariants": []
        }))
        .unwrap();
        assert!(!component.has_ab_test());
        assert_eq!(component.variant_b().unwrap(), component);
    }

    #[test]
    fn test_bad_prop_value_drops_only_that_field() {
        let component: PageComponent = serde_json::from_value(json!({
            "id": "b",
            "type": "Button",
            "props": {
                "text": "Buy",
                "layout": { "alignment": "justify" },
                "styles": { "backgroundColor": "#111" }
            }
        }))
        .unwrap();

        match &component.props {
            ComponentProps::Button(p) => {
                assert_eq!(p.text.as_deref(), Some("Buy"));
                assert!(p.common.layout.is_none());
                assert_eq!(p.common.styles.css("backgroundColor").as_deref(), Some("#111"));
            }
            other => panic!("Expected button props, got {:?}", other),
        }
    }

    #[test]
    fn test_non_object_props_fall_back_to_defaults() {
        let component: PageComponent =
            serde_json::from_value(json!({ "id": "s", "type": "Spacer", "props": "tall" })).unwrap();
        assert_eq!(component.component_type(), ComponentType::Spacer);
    }

    #[test]
    fn test_empty_parent_id_is_root() {
        let component: PageComponent =
            serde_json::from_value(json!({ "id": "x", "type": "Spacer", "parentId": "" })).unwrap();
        assert_eq!(component.parent_id, None);
    }
}
