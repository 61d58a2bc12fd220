//! Authentication gate.
//!
//! The document assembler wraps the whole visible body in
//! `IF @isAuthenticated == "true"`; this module decides how the flag gets set
//! and what the `ELSE` branch shows.

use crate::ampscript::{
    end_if, equals, open_if, request_parameter, string_literal, AmpBlock, AmpStatement,
};
use crate::names::{
    is_placeholder_key, IS_AUTHENTICATED, LOGIN_ERROR, LOGIN_IDENTIFIER_INPUT, LOGIN_MARKER,
    LOGIN_PASSWORD_INPUT,
};
use crate::ssjs::{js_string, js_string_array, ServerScript};
use cloudpage_model::{CloudPage, PasswordSecurity, SecurityConfig, SsoSecurity};
use tracing::{debug, warn};

pub const DEFAULT_IDENTITY_PARAMETER: &str = "token";

/// Output of the gate emitter; every part is already rendered text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityScript {
    /// Server script run before the body
    pub server_script: Option<String>,
    /// Template block run before the body
    pub template_script: String,
    /// Markup for the unauthenticated branch
    pub body_html: String,
}

pub fn emit_security_script(page: &CloudPage) -> SecurityScript {
    match &page.meta.security {
        SecurityConfig::None => pass_through(),
        SecurityConfig::Sso(sso) => sso_gate(sso),
        SecurityConfig::Password(password) => password_gate(password),
    }
}

fn pass_through() -> SecurityScript {
    let mut block = AmpBlock::new();
    block.push(AmpStatement::set_str(IS_AUTHENTICATED, "true"));
    SecurityScript {
        server_script: None,
        template_script: block.render(),
        body_html: String::new(),
    }
}

fn sso_gate(sso: &SsoSecurity) -> SecurityScript {
    let login_url = sso.login_url.trim();
    let parameter = sso
        .identity_parameter
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_IDENTITY_PARAMETER);

    if login_url.is_empty() {
        warn!("SSO security without a login URL; page stays locked");
    }

    let redirect = format!(
        "Redirect(Concat({}, IIF(IndexOf({}, \"?\") > 0, \"&\", \"?\"), \"returnUrl=\", URLEncode(RequestParameter(\"PAGEURL\"))))",
        string_literal(login_url),
        string_literal(login_url)
    );

    let mut block = AmpBlock::new();
    block.var(vec!["@ssoIdentity".to_string()]);
    block.set("@ssoIdentity", request_parameter(parameter));
    block.push(AmpStatement::If {
        condition: "NOT EMPTY(@ssoIdentity)".to_string(),
        then: vec![AmpStatement::set_str(IS_AUTHENTICATED, "true")],
        otherwise: if login_url.is_empty() {
            vec![]
        } else {
            vec![AmpStatement::Raw(redirect)]
        },
    });

    let message = sso
        .redirect_message
        .as_deref()
        .unwrap_or("Redirecting to login...");
    let body_html = format!(
        "<div class=\"cp-login cp-sso\"><p>{}</p><p><a href=\"{}\">Continue to login</a></p></div>",
        message,
        login_url.replace('"', "&quot;")
    );

    debug!(parameter = %parameter, "Emitted SSO gate");
    SecurityScript {
        server_script: None,
        template_script: block.render(),
        body_html,
    }
}

fn password_gate(config: &PasswordSecurity) -> SecurityScript {
    let key = config.data_extension_key.trim();
    let identifier_field = non_empty(&config.identifier_field).unwrap_or("Email");
    let password_field = non_empty(&config.password_field).unwrap_or("Password");

    let mut script = ServerScript::new();
    script.open("try");
    script.open(&format!(
        "if (Request.Method == \"POST\" && Request.GetFormField({}) == \"1\")",
        js_string(LOGIN_MARKER)
    ));
    script.line(&format!(
        "var identifier = Request.GetFormField({}) || \"\";",
        js_string(LOGIN_IDENTIFIER_INPUT)
    ));
    script.line(&format!(
        "var password = Request.GetFormField({}) || \"\";",
        js_string(LOGIN_PASSWORD_INPUT)
    ));

    if is_placeholder_key(key) {
        warn!(key = %key, "Password security without a credentials data extension; logins always fail");
        script.set_variable(LOGIN_ERROR, "\"true\"");
    } else {
        script.open("if (identifier != \"\" && password != \"\")");
        script.line(&format!(
            "var rows = DataExtension.Init({}).Rows.Lookup({}, [identifier, password]);",
            js_string(key),
            js_string_array([identifier_field, password_field])
        ));
        script.open("if (rows && rows.length > 0)");
        script.set_variable(IS_AUTHENTICATED, "\"true\"");
        script.else_branch("else");
        script.set_variable(LOGIN_ERROR, "\"true\"");
        script.close();
        script.else_branch("else");
        script.set_variable(LOGIN_ERROR, "\"true\"");
        script.close();
    }
    script.close();
    script.else_branch("catch (e)");
    script.set_variable(LOGIN_ERROR, "\"true\"");
    script.close();

    let title = config.login_title.as_deref().unwrap_or("Restricted access");
    let identifier_label = config.identifier_label.as_deref().unwrap_or("Email");
    let password_label = config.password_label.as_deref().unwrap_or("Password");
    let button_text = config.button_text.as_deref().unwrap_or("Log in");
    let error_message = config
        .error_message
        .as_deref()
        .unwrap_or("Invalid credentials. Please try again.");

    let body_html = format!(
        concat!(
            "<div class=\"cp-login\">",
            "<h2>{title}</h2>",
            "{open_error}<p class=\"cp-login-error\">{error}</p>{end_error}",
            "<form method=\"post\" action=\"\">",
            "<input type=\"hidden\" name=\"{marker}\" value=\"1\">",
            "<div class=\"cp-field\"><label class=\"cp-label\" for=\"{identifier}\">{identifier_label}</label>",
            "<input class=\"cp-input\" type=\"text\" id=\"{identifier}\" name=\"{identifier}\" required></div>",
            "<div class=\"cp-field\"><label class=\"cp-label\" for=\"{password}\">{password_label}</label>",
            "<input class=\"cp-input\" type=\"password\" id=\"{password}\" name=\"{password}\" required></div>",
            "<button type=\"submit\" class=\"cp-button cp-submit\">{button}</button>",
            "</form></div>"
        ),
        title = title,
        open_error = open_if(&equals(LOGIN_ERROR, "true")),
        error = error_message,
        end_error = end_if(),
        marker = LOGIN_MARKER,
        identifier = LOGIN_IDENTIFIER_INPUT,
        identifier_label = identifier_label,
        password = LOGIN_PASSWORD_INPUT,
        password_label = password_label,
        button = button_text,
    );

    debug!(key = %key, "Emitted password gate");
    SecurityScript {
        server_script: Some(script.render()),
        template_script: String::new(),
        body_html,
    }
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(security: &str) -> CloudPage {
        CloudPage::from_json(&format!(r#"{{"meta": {{"security": {}}}}}"#, security))
            .expect("page")
    }

    #[test]
    fn test_none_always_authenticates() {
        let gate = emit_security_script(&page(r#"{"type": "none"}"#));
        assert_eq!(gate.server_script, None);
        assert!(gate.template_script.contains(r#"SET @isAuthenticated = "true""#));
        assert!(gate.body_html.is_empty());
    }

    #[test]
    fn test_sso_redirects_without_identity() {
        let gate = emit_security_script(&page(
            r#"{"type": "sso", "loginUrl": "https://login.example.com/auth", "identityParameter": "sid"}"#,
        ));
        println!("{}", gate.template_script);
        assert!(gate.template_script.contains(r#"SET @ssoIdentity = RequestParameter("sid")"#));
        assert!(gate.template_script.contains("IF NOT EMPTY(@ssoIdentity) THEN"));
        assert!(gate.template_script.contains(r#"Redirect(Concat("https://login.example.com/auth""#));
        assert!(gate.body_html.contains("https://login.example.com/auth"));
        assert!(gate.server_script.is_none());
    }

    #[test]
    fn test_password_gate_looks_up_credentials() {
        let gate = emit_security_script(&page(
            r#"{"type": "password", "dataExtensionKey": "Members", "identifierField": "Login", "passwordField": "Secret", "loginTitle": "Members only"}"#,
        ));
        let server = gate.server_script.expect("server script");
        println!("{}", server);
        assert!(server.contains(r#"DataExtension.Init("Members").Rows.Lookup(["Login", "Secret"], [identifier, password]);"#));
        assert!(server.contains(r#"Variable.SetValue("@isAuthenticated", "true");"#));
        assert!(server.contains(r#"Variable.SetValue("@loginError", "true");"#));

        assert!(gate.body_html.contains("<h2>Members only</h2>"));
        assert!(gate.body_html.contains(r#"name="cp_password""#));
        assert!(gate.body_html.contains(r#"%%[ IF @loginError == "true" THEN ]%%"#));
    }

    #[test]
    fn test_password_gate_without_key_never_authenticates() {
        let gate = emit_security_script(&page(r#"{"type": "password", "dataExtensionKey": "<key>"}"#));
        let server = gate.server_script.expect("server script");
        assert!(!server.contains("Rows.Lookup"));
        assert!(!server.contains("@isAuthenticated"));
    }
}
