use cloudpage_compiler_css::ThemeVars;
use cloudpage_model::{Brand, CloudPage, FormSchema};

/// Options for document generation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOptions {
    /// Editor preview: no A/B branching, no tracking pixel, bound text shows
    /// its literal fallback
    pub is_for_preview: bool,
    /// Show literal fallbacks instead of template interpolation without
    /// otherwise leaving final mode
    pub hide_ampscript: bool,
    /// Origin of the page-view pixel endpoint
    pub base_url: String,
}

impl GenerateOptions {
    pub fn preview() -> Self {
        Self {
            is_for_preview: true,
            ..Default::default()
        }
    }

    pub fn published(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// Read-only state threaded through every renderer for one page
#[derive(Debug)]
pub struct RenderContext<'a> {
    pub page: &'a CloudPage,
    pub options: &'a GenerateOptions,
    pub theme: ThemeVars,
    /// Fields of the page form, shared with the submission script
    pub form_schema: FormSchema,
}

impl<'a> RenderContext<'a> {
    pub fn new(page: &'a CloudPage, options: &'a GenerateOptions) -> Self {
        let form_schema = page
            .form()
            .map(|(_, props)| FormSchema::from_props(props))
            .unwrap_or_default();
        Self {
            page,
            options,
            theme: ThemeVars::from_page(page),
            form_schema,
        }
    }

    pub fn brand(&self) -> Option<&'a Brand> {
        self.page.brand.as_ref()
    }

    /// Data-bound text renders its literal fallback
    pub fn hide_template_expressions(&self) -> bool {
        self.options.is_for_preview || self.options.hide_ampscript
    }

    /// A/B variants branch only in the published document
    pub fn branch_variants(&self) -> bool {
        !self.options.is_for_preview
    }
}
