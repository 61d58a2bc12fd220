//! Style map → CSS declaration text.
//!
//! Values are written as given. Style values are designer input and are not
//! escaped, so a value containing `;` or `"` ends up in the output verbatim.

use cloudpage_model::ident::{camel_to_kebab, kebab_to_camel};
use cloudpage_model::{StyleMap, StyleValue};

/// Per-call-site key filter
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleFilter<'a> {
    /// Keys skipped by exact match
    pub forbidden: &'a [&'a str],
    /// When set, only keys containing one of these fragments are kept
    pub allowed: Option<&'a [&'a str]>,
    /// Accept exactly the keys the other fields would reject
    pub inverted: bool,
}

impl<'a> StyleFilter<'a> {
    pub const ALL: StyleFilter<'static> = StyleFilter {
        forbidden: &[],
        allowed: None,
        inverted: false,
    };

    pub fn forbid(keys: &'a [&'a str]) -> Self {
        Self {
            forbidden: keys,
            allowed: None,
            inverted: false,
        }
    }

    pub fn allow(keys: &'a [&'a str]) -> Self {
        Self {
            forbidden: &[],
            allowed: Some(keys),
            inverted: false,
        }
    }

    /// The filter accepting every key this one rejects
    pub fn complement(self) -> Self {
        Self {
            inverted: !self.inverted,
            ..self
        }
    }

    pub fn accepts(&self, key: &str) -> bool {
        let accepted = !self.forbidden.contains(&key)
            && match self.allowed {
                Some(allowed) => allowed.iter().any(|fragment| key.contains(fragment)),
                None => true,
            };
        accepted != self.inverted
    }
}

/// Serialize truthy scalar entries as `kebab-key: value;` in declaration order
pub fn serialize_styles(styles: &StyleMap, filter: StyleFilter) -> String {
    declarations(styles, filter, false)
}

/// Like [`serialize_styles`] with `!important` on every declaration, for
/// overrides that must beat inline styles
pub fn serialize_important(styles: &StyleMap, filter: StyleFilter) -> String {
    declarations(styles, filter, true)
}

fn declarations(styles: &StyleMap, filter: StyleFilter, important: bool) -> String {
    let mut out: Vec<String> = Vec::with_capacity(styles.len());
    for (key, value) in styles.iter() {
        if !filter.accepts(key) {
            continue;
        }
        let css = match value.as_css() {
            Some(css) => css,
            None => continue,
        };
        if important {
            out.push(format!("{}: {} !important;", camel_to_kebab(key), css));
        } else {
            out.push(format!("{}: {};", camel_to_kebab(key), css));
        }
    }
    out.join(" ")
}

/// Parse declaration text back into a style map (inverse of [`serialize_styles`])
pub fn parse_declarations(css: &str) -> StyleMap {
    let mut styles = StyleMap::new();
    for declaration in css.split(';') {
        let Some((key, value)) = declaration.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        styles.insert(kebab_to_camel(key), StyleValue::Text(value.to_string()));
    }
    styles
}

/// `@media` block applying `overrides` to `selector` below the mobile breakpoint
pub fn mobile_override(selector: &str, overrides: &StyleMap) -> Option<String> {
    let body = serialize_important(overrides, StyleFilter::ALL);
    if body.is_empty() {
        return None;
    }
    Some(format!(
        "@media (max-width: {}px) {{ {} {{ {} }} }}",
        MOBILE_BREAKPOINT, selector, body
    ))
}

pub const MOBILE_BREAKPOINT: u32 = 768;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StyleMap {
        StyleMap::new()
            .with("backgroundColor", "#111")
            .with("marginTop", "10px")
            .with("color", "")
            .with("zIndex", 0)
            .with("fontSize", 18)
    }

    #[test]
    fn test_kebab_case_and_order() {
        assert_eq!(
            serialize_styles(&sample(), StyleFilter::ALL),
            "background-color: #111; margin-top: 10px; font-size: 18;"
        );
    }

    #[test]
    fn test_falsy_values_are_skipped() {
        let css = serialize_styles(&sample(), StyleFilter::ALL);
        assert!(!css.contains("color: ;"));
        assert!(!css.contains("z-index"));
    }

    #[test]
    fn test_forbidden_keys() {
        let css = serialize_styles(&sample(), StyleFilter::forbid(&["backgroundColor"]));
        assert_eq!(css, "margin-top: 10px; font-size: 18;");
    }

    #[test]
    fn test_allowed_keys_match_by_substring() {
        let css = serialize_styles(&sample(), StyleFilter::allow(&["margin", "font"]));
        assert_eq!(css, "margin-top: 10px; font-size: 18;");
    }

    #[test]
    fn test_complement_splits_every_key_once() {
        let filter = StyleFilter::allow(&["margin"]);
        for key in ["marginTop", "marginInlineStart", "backgroundColor", "fontSize"] {
            assert_ne!(filter.accepts(key), filter.complement().accepts(key), "{}", key);
        }
        assert_eq!(
            serialize_styles(&sample(), filter.complement()),
            "background-color: #111; font-size: 18;"
        );
    }

    #[test]
    fn test_round_trip_is_idempotent() {
        let first = serialize_styles(&sample(), StyleFilter::ALL);
        let second = serialize_styles(&parse_declarations(&first), StyleFilter::ALL);
        assert_eq!(first, second);

        let third = serialize_styles(&parse_declarations(&second), StyleFilter::ALL);
        assert_eq!(second, third);
    }

    #[test]
    fn test_mobile_override() {
        let overrides = StyleMap::new().with("fontSize", "14px");
        assert_eq!(
            mobile_override("#cp-a", &overrides).unwrap(),
            "@media (max-width: 768px) { #cp-a { font-size: 14px !important; } }"
        );
        assert!(mobile_override("#cp-a", &StyleMap::new()).is_none());
    }
}
