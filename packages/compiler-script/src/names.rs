//! Variable, input and column names shared by the template blocks, the
//! server scripts and the HTML renderers.

use cloudpage_model::ident::script_ident;

pub const FORM_SUBMITTED: &str = "@formSubmitted";
pub const IS_AUTHENTICATED: &str = "@isAuthenticated";
pub const LOGIN_ERROR: &str = "@loginError";

/// Hidden input posted with every page form
pub const SUBMIT_MARKER: &str = "__cp_submit";
/// Hidden input posted with the password login form
pub const LOGIN_MARKER: &str = "__cp_login";
pub const LOGIN_IDENTIFIER_INPUT: &str = "cp_identifier";
pub const LOGIN_PASSWORD_INPUT: &str = "cp_password";

pub const NPS_INPUT: &str = "nps_score";
pub const NPS_COLUMN: &str = "NPSScore";

/// `id` of the page form; the NPS widget posts through it with `form=`
pub const FORM_ELEMENT_ID: &str = "cloudpage-form";

pub fn ab_input(component_id: &str) -> String {
    format!("ab_{}", script_ident(component_id))
}

pub fn ab_column(component_id: &str) -> String {
    format!("ABVariant_{}", script_ident(component_id))
}

pub fn ab_variable(component_id: &str) -> String {
    format!("@abVariant_{}", script_ident(component_id))
}

/// Template variable for a `dataBinding` field, case preserved
pub fn binding_variable(field: &str) -> String {
    let name: String = field
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    format!("@{}", name)
}

const PLACEHOLDER_KEYS: &[&str] = &["YOUR_DATA_EXTENSION_KEY", "DATA_EXTENSION_KEY"];

/// Data extension key that was never filled in
pub fn is_placeholder_key(key: &str) -> bool {
    let key = key.trim();
    key.is_empty()
        || PLACEHOLDER_KEYS.iter().any(|p| key.eq_ignore_ascii_case(p))
        || (key.starts_with('<') && key.ends_with('>'))
        || (key.starts_with('{') && key.ends_with('}'))
}

/// Redirect targets that would loop back to a blank or debug page are skipped
pub fn is_safe_redirect(url: &str) -> bool {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    !(url.is_empty()
        || url == "#"
        || lower == "about:blank"
        || lower.starts_with("javascript:")
        || lower.contains("debug"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ab_names_share_the_sanitised_id() {
        assert_eq!(ab_input("hero-1"), "ab_HERO_1");
        assert_eq!(ab_column("hero-1"), "ABVariant_HERO_1");
        assert_eq!(ab_variable("hero-1"), "@abVariant_HERO_1");
    }

    #[test]
    fn test_binding_variable() {
        assert_eq!(binding_variable("FirstName"), "@FirstName");
        assert_eq!(binding_variable(" First Name "), "@First_Name");
    }

    #[test]
    fn test_placeholder_keys() {
        for key in ["", "  ", "YOUR_DATA_EXTENSION_KEY", "data_extension_key", "<key>", "{DE}"] {
            assert!(is_placeholder_key(key), "{:?} should be a placeholder", key);
        }
        assert!(!is_placeholder_key("Leads_2024"));
    }

    #[test]
    fn test_redirect_guard() {
        for url in ["", "#", "about:blank", "JavaScript:void(0)", "https://x.com/debug"] {
            assert!(!is_safe_redirect(url), "{:?} should be rejected", url);
        }
        assert!(is_safe_redirect("https://example.com/thanks"));
    }
}
