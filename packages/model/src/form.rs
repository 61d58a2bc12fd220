//! Form field schema shared by the form renderer and the submission script.
//!
//! Both outputs iterate the same [`FormSchema`], so an input name, its
//! prefill query parameter and its data-extension column can never drift
//! apart between the HTML and the server script.

use crate::ident::script_ident;
use crate::props::{
    ConditionalRule, CustomFieldType, FieldConfig, FormProps, StandardFields,
};

/// The built-in fields a form can enable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardField {
    Name,
    Email,
    Phone,
    Cpf,
    City,
    Birthdate,
}

impl StandardField {
    /// Render order
    pub const ALL: [StandardField; 6] = [
        StandardField::Name,
        StandardField::Email,
        StandardField::Phone,
        StandardField::Cpf,
        StandardField::City,
        StandardField::Birthdate,
    ];

    pub fn input_name(self) -> &'static str {
        match self {
            StandardField::Name => "name",
            StandardField::Email => "email",
            StandardField::Phone => "phone",
            StandardField::Cpf => "cpf",
            StandardField::City => "city",
            StandardField::Birthdate => "birthdate",
        }
    }

    pub fn query_param(self) -> &'static str {
        self.input_name()
    }

    pub fn column(self) -> &'static str {
        match self {
            StandardField::Name => "Name",
            StandardField::Email => "Email",
            StandardField::Phone => "Phone",
            StandardField::Cpf => "CPF",
            StandardField::City => "City",
            StandardField::Birthdate => "Birthdate",
        }
    }

    pub fn input_type(self) -> &'static str {
        match self {
            StandardField::Email => "email",
            StandardField::Phone => "tel",
            StandardField::Birthdate => "date",
            StandardField::Name | StandardField::Cpf | StandardField::City => "text",
        }
    }

    pub fn default_label(self) -> &'static str {
        match self {
            StandardField::Name => "Name",
            StandardField::Email => "Email",
            StandardField::Phone => "Phone",
            StandardField::Cpf => "CPF",
            StandardField::City => "City",
            StandardField::Birthdate => "Birth date",
        }
    }

    pub fn autocomplete(self) -> Option<&'static str> {
        match self {
            StandardField::Name => Some("name"),
            StandardField::Email => Some("email"),
            StandardField::Phone => Some("tel"),
            StandardField::City => Some("address-level2"),
            StandardField::Birthdate => Some("bday"),
            StandardField::Cpf => None,
        }
    }

    fn config(self, fields: &StandardFields) -> Option<&FieldConfig> {
        match self {
            StandardField::Name => fields.name.as_ref(),
            StandardField::Email => fields.email.as_ref(),
            StandardField::Phone => fields.phone.as_ref(),
            StandardField::Cpf => fields.cpf.as_ref(),
            StandardField::City => fields.city.as_ref(),
            StandardField::Birthdate => fields.birthdate.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Standard(StandardField),
    Custom(CustomFieldType),
    Consent,
}

/// One enabled field: how it renders and where its value goes
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedField {
    pub kind: FieldKind,
    /// `name=` attribute, server-script form field and template variable name
    pub input_name: String,
    pub query_param: String,
    pub column: String,
    pub label: String,
    pub placeholder: Option<String>,
    pub required: bool,
    pub prefill: bool,
    pub conditional: Option<ConditionalRule>,
    pub options: Vec<String>,
}

impl CapturedField {
    /// Template variable holding the prefilled value
    pub fn variable(&self) -> String {
        format!("@{}", self.input_name)
    }

    /// Server-script local variable
    pub fn script_var(&self) -> String {
        format!("f_{}", self.input_name)
    }
}

pub const CONSENT_INPUT: &str = "consent";
pub const CONSENT_COLUMN: &str = "Consent";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSchema {
    fields: Vec<CapturedField>,
}

impl FormSchema {
    pub fn from_props(props: &FormProps) -> Self {
        let mut fields = Vec::new();

        for standard in StandardField::ALL {
            let config = match standard.config(&props.fields) {
                Some(config) if config.enabled => config,
                _ => continue,
            };
            fields.push(CapturedField {
                kind: FieldKind::Standard(standard),
                input_name: standard.input_name().to_string(),
                query_param: standard.query_param().to_string(),
                column: standard.column().to_string(),
                label: non_empty(config.label.as_deref())
                    .unwrap_or(standard.default_label())
                    .to_string(),
                placeholder: config.placeholder.clone(),
                required: config.required,
                prefill: config.prefill_from_url,
                conditional: config.conditional.clone().filter(|c| !c.field.is_empty()),
                options: Vec::new(),
            });
        }

        for custom in &props.custom_fields {
            let ident = script_ident(&custom.id);
            let external = non_empty(custom.name.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| ident.clone());
            fields.push(CapturedField {
                kind: FieldKind::Custom(custom.field_type),
                input_name: format!("custom_{}", ident),
                query_param: external.clone(),
                column: external.clone(),
                label: non_empty(custom.label.as_deref())
                    .unwrap_or(external.as_str())
                    .to_string(),
                placeholder: custom.placeholder.clone(),
                required: custom.required,
                prefill: custom.prefill_from_url,
                conditional: custom.conditional.clone().filter(|c| !c.field.is_empty()),
                options: custom.options.clone(),
            });
        }

        if let Some(consent) = props.consent.as_ref().filter(|c| c.enabled) {
            fields.push(CapturedField {
                kind: FieldKind::Consent,
                input_name: CONSENT_INPUT.to_string(),
                query_param: CONSENT_INPUT.to_string(),
                column: CONSENT_COLUMN.to_string(),
                label: non_empty(consent.text.as_deref())
                    .unwrap_or("I agree to receive communications.")
                    .to_string(),
                placeholder: None,
                required: consent.required,
                prefill: false,
                conditional: None,
                options: Vec::new(),
            });
        }

        Self { fields }
    }

    pub fn fields(&self) -> &[CapturedField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn prefill_fields(&self) -> impl Iterator<Item = &CapturedField> {
        self.fields.iter().filter(|f| f.prefill)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &CapturedField> {
        self.fields
            .iter()
            .filter(|f| f.required && f.conditional.is_none())
    }

    /// Field that must be non-empty before a row is written: email when
    /// enabled, otherwise the first standard field, otherwise the first
    /// custom field
    pub fn discriminator(&self) -> Option<&CapturedField> {
        self.fields
            .iter()
            .find(|f| f.kind == FieldKind::Standard(StandardField::Email))
            .or_else(|| {
                self.fields
                    .iter()
                    .find(|f| matches!(f.kind, FieldKind::Standard(_)))
            })
            .or_else(|| {
                self.fields
                    .iter()
                    .find(|f| matches!(f.kind, FieldKind::Custom(_)))
            })
    }

    pub fn get(&self, input_name: &str) -> Option<&CapturedField> {
        self.fields.iter().find(|f| f.input_name == input_name)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
