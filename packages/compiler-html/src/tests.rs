use crate::{generate_document, GenerateOptions};
use cloudpage_model::CloudPage;

fn page(json: &str) -> CloudPage {
    CloudPage::from_json(json).expect("Failed to load page")
}

fn position(html: &str, needle: &str) -> usize {
    html.find(needle)
        .unwrap_or_else(|| panic!("Missing {:?} in generated document", needle))
}

#[test]
fn test_document_skeleton() {
    let page = page(
        r##"{
            "id": "p1",
            "name": "Spring",
            "meta": {
                "title": "Spring Sale",
                "description": "Big savings",
                "favicon": "https://cdn.example.com/favicon.ico",
                "language": "pt-BR"
            },
            "styles": {"customCss": ".promo { color: red; }", "themeColor": "#ff6600"},
            "components": [{"id": "t1", "type": "Title", "props": {"text": "Welcome"}}]
        }"##,
    );
    let html = generate_document(&page, &GenerateOptions::preview());

    println!("Generated HTML:\n{}", html);

    assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"pt-BR\">"));
    assert!(html.contains("<title>Spring Sale</title>"));
    assert!(html.contains(r#"<meta name="description" content="Big savings">"#));
    assert!(html.contains(r#"<meta property="og:title" content="Spring Sale">"#));
    assert!(html.contains(r#"<link rel="icon" href="https://cdn.example.com/favicon.ico">"#));
    assert!(html.contains(r##"<meta name="theme-color" content="#ff6600">"##));
    assert!(html.contains("Welcome"));
    assert!(html.trim_end().ends_with("</html>"));

    // custom CSS comes after the global rules so it can override them
    assert!(position(&html, ".cp-section {") < position(&html, ".promo { color: red; }"));
    assert!(position(&html, "</style>") < position(&html, "window.cpInitAccordion"));
}

#[test]
fn test_body_order() {
    let page = page(
        r#"{
            "id": "p2",
            "meta": {
                "tracking": {"gtm": {"enabled": true, "id": "GTM-XYZ"}},
                "customAmpscript": "SET @promo = \"SPRING\"",
                "dataExtensionKey": "Leads"
            },
            "cookieBanner": {"enabled": true},
            "components": [
                {"id": "w", "type": "WhatsApp", "props": {"phoneNumber": "5511999990000"}},
                {"id": "s", "type": "Stripe", "props": {"text": "Free shipping"}},
                {"id": "f", "type": "Form", "props": {"fields": {"email": {"enabled": true, "prefillFromUrl": true}}}}
            ]
        }"#,
    );
    let html = generate_document(&page, &GenerateOptions::published("https://studio.example.com"));

    println!("Generated HTML:\n{}", html);

    let order = [
        "<body>",
        "googletagmanager.com/ns.html?id=GTM-XYZ",
        "VAR @formSubmitted",
        r#"SET @isAuthenticated = "true""#,
        r#"SET @promo = "SPRING""#,
        r#"SET @email = RequestParameter("email")"#,
        r#"<script runat="server">"#,
        r#"%%[ IF @isAuthenticated == "true" THEN ]%%"#,
        r#"<div id="cp-loading""#,
        "Free shipping",
        r#"<main class="cp-page">"#,
        r#"id="cloudpage-form""#,
        "</main>",
        "https://wa.me/5511999990000",
        r#"id="cp-cookie-banner""#,
        "https://studio.example.com/api/pixel/p2",
        "</body>",
    ];
    for pair in order.windows(2) {
        assert!(
            position(&html, pair[0]) < position(&html, pair[1]),
            "{:?} should come before {:?}",
            pair[0],
            pair[1]
        );
    }

    // page-level components render once, outside the content flow
    assert_eq!(html.matches("Free shipping").count(), 1);
    assert_eq!(html.matches("https://wa.me/").count(), 1);
}

#[test]
fn test_custom_ampscript_with_delimiters_is_verbatim() {
    let page = page(
        r#"{"meta": {"customAmpscript": "%%[ SET @x = 1 ]%%"}, "components": []}"#,
    );
    let html = generate_document(&page, &GenerateOptions::preview());
    assert!(html.contains("\n%%[ SET @x = 1 ]%%\n"));
    assert_eq!(html.matches("SET @x = 1").count(), 1);
}

#[test]
fn test_custom_blocks_keep_blank_lines_and_indentation() {
    let page = page(
        r#"{
            "meta": {"customAmpscript": "%%[\nSET @greeting = \"Hi\n\n  there\"\n]%%"},
            "styles": {"customCss": ".a {\n\n        color: red;\n}"},
            "components": []
        }"#,
    );
    let html = generate_document(&page, &GenerateOptions::preview());
    assert!(html.contains("\n%%[\nSET @greeting = \"Hi\n\n  there\"\n]%%\n"));
    assert!(html.contains(".a {\n\n        color: red;\n}\n"));
}

#[test]
fn test_password_gate_shows_login_in_else_branch() {
    let page = page(
        r#"{
            "meta": {"security": {
                "type": "password",
                "dataExtensionKey": "Members",
                "identifierField": "Login",
                "passwordField": "Secret"
            }},
            "components": [{"id": "t", "type": "Title", "props": {"text": "Members area"}}]
        }"#,
    );
    let html = generate_document(&page, &GenerateOptions::preview());

    println!("Generated HTML:\n{}", html);

    assert!(html.contains(r#"Rows.Lookup(["Login", "Secret"]"#));
    assert!(!html.contains(r#"SET @isAuthenticated = "true""#));
    assert!(position(&html, "</main>") < position(&html, r#"<div class="cp-login">"#));
    assert!(position(&html, "Members area") < position(&html, r#"<div class="cp-login">"#));
}

#[test]
fn test_webfont_links() {
    let page = page(r#"{"styles": {"fontFamily": "Montserrat, sans-serif"}, "components": []}"#);
    let html = generate_document(&page, &GenerateOptions::preview());
    assert!(html.contains(r#"<link rel="preconnect" href="https://fonts.googleapis.com">"#));
    assert!(html.contains("family=Montserrat:wght@400;600;700"));

    let page = self::page(r#"{"styles": {"fontFamily": "Arial, sans-serif"}, "components": []}"#);
    let html = generate_document(&page, &GenerateOptions::preview());
    assert!(!html.contains("fonts.googleapis.com"));
}

#[test]
fn test_unreachable_components_do_not_render() {
    let page = page(
        r#"{"components": [
            {"id": "a", "type": "Paragraph", "props": {"text": "Visible"}},
            {"id": "b", "type": "Paragraph", "parentId": "ghost", "props": {"text": "Orphaned"}}
        ]}"#,
    );
    let html = generate_document(&page, &GenerateOptions::preview());
    assert!(html.contains("Visible"));
    assert!(!html.contains("Orphaned"));
}
