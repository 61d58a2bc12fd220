//! Identifier derivation for component ids.
//!
//! Component ids are free-form strings chosen by the editor. The generated
//! document uses them in three places: DOM ids, template variable names and
//! server-script form field names. Each place has its own legal alphabet.

/// Uppercased identifier fragment safe for template variables (`ab-1` → `AB_1`)
pub fn script_ident(id: &str) -> String {
    let ident: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();

    if ident.is_empty() {
        "_".to_string()
    } else {
        ident
    }
}

/// DOM id for a component's outer element
pub fn dom_id(id: &str) -> String {
    let safe: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    format!("cp-{}", safe)
}

/// Converts camelCase to kebab-case (`backgroundColor` → `background-color`)
pub fn camel_to_kebab(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Converts kebab-case to camelCase (`background-color` → `backgroundColor`)
pub fn kebab_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
