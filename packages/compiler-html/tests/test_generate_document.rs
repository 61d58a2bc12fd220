use cloudpage_compiler_html::{generate_document, Composer, GenerateOptions, RenderContext};
use cloudpage_model::{CloudPage, ComponentTree};

const LANDING_PAGE: &str = r#"{
    "id": "landing",
    "name": "Landing",
    "meta": {"security": {"type": "none"}},
    "components": [
        {"id": "hello", "type": "Title", "order": 0, "props": {"text": "Hello"}},
        {"id": "row", "type": "Columns", "order": 1, "props": {"columnCount": 2}},
        {"id": "intro", "type": "Paragraph", "parentId": "row", "column": 0, "props": {"text": "Sign up below"}},
        {"id": "signup", "type": "Form", "parentId": "row", "column": 1, "props": {
            "fields": {"email": {"enabled": true}},
            "buttonText": "Send"
        }}
    ]
}"#;

fn load(json: &str) -> CloudPage {
    CloudPage::from_json(json).expect("Failed to load page")
}

fn compose(page: &CloudPage, options: &GenerateOptions) -> String {
    let ctx = RenderContext::new(page, options);
    let tree = ComponentTree::new(&page.components);
    Composer::new(&tree, &ctx).render_page().to_html()
}

#[test]
fn test_end_to_end_preview() {
    let page = load(LANDING_PAGE);
    let html = generate_document(&page, &GenerateOptions::preview());

    println!("Generated HTML:\n{}", html);

    assert!(html.contains("Hello"));
    assert!(html.contains("grid-template-columns: repeat(2, 1fr);"));
    assert_eq!(html.matches(r#"class="cp-column""#).count(), 2);

    assert_eq!(html.matches("<form").count(), 1);
    assert_eq!(html.matches(r#"type="email""#).count(), 1);
    assert!(html.contains(">Send</button>"));

    // the trivial always-authenticated gate and nothing else
    assert!(html.contains(r#"SET @isAuthenticated = "true""#));
    assert!(!html.contains(r#"class="cp-login"#));
    assert!(!html.contains("Rows.Lookup"));

    assert!(!html.contains("/api/pixel/"));
    assert!(!html.contains("cp-pixel"));
}

#[test]
fn test_published_document_has_pixel() {
    let page = load(LANDING_PAGE);
    let html = generate_document(&page, &GenerateOptions::published("https://studio.example.com"));
    assert_eq!(
        html.matches(r#"<img src="https://studio.example.com/api/pixel/landing""#).count(),
        1
    );
}

#[test]
fn test_column_width_fallback_in_document() {
    for widths in ["[50, 20]", "[40, 40, 40]"] {
        let page = load(&format!(
            r#"{{"components": [{{"id": "row", "type": "Columns", "props": {{"columnCount": 3, "columnWidths": {}}}}}]}}"#,
            widths
        ));
        let html = generate_document(&page, &GenerateOptions::preview());
        assert!(
            html.contains("grid-template-columns: repeat(3, 1fr);"),
            "widths {} should fall back",
            widths
        );
        assert!(!html.contains("40fr"));
        assert!(!html.contains("50fr"));
    }

    let page = load(
        r#"{"components": [{"id": "row", "type": "Columns", "props": {"columnCount": 3, "columnWidths": [50, 25, 25]}}]}"#,
    );
    let html = generate_document(&page, &GenerateOptions::preview());
    assert!(html.contains("grid-template-columns: 50fr 25fr 25fr;"));
}

#[test]
fn test_data_binding_toggle() {
    let page = load(
        r#"{"components": [{"id": "greet", "type": "Title", "props": {"text": "Default", "dataBinding": "FirstName"}}]}"#,
    );

    let published = generate_document(&page, &GenerateOptions::published(""));
    assert!(published.contains("%%=v(@FirstName)=%%"));
    assert!(published.contains(r#"SET @FirstName = AttributeValue("FirstName")"#));

    let hidden = generate_document(
        &page,
        &GenerateOptions {
            hide_ampscript: true,
            ..Default::default()
        },
    );
    assert!(hidden.contains("Default"));
    assert!(!hidden.contains("%%=v("));

    let preview = generate_document(&page, &GenerateOptions::preview());
    assert!(preview.contains("Default"));
    assert!(!preview.contains("%%=v("));
}

#[test]
fn test_ab_branch_symmetry() {
    let tested = load(
        r#"{"components": [
            {"id": "hero-1", "type": "Title", "props": {"text": "Original headline"},
             "abTestEnabled": true, "abTestVariants": [{"text": "Challenger headline"}]}
        ]}"#,
    );
    let untested = load(
        r#"{"components": [
            {"id": "hero-1", "type": "Title", "props": {"text": "Original headline"}}
        ]}"#,
    );

    let html = generate_document(&tested, &GenerateOptions::published("https://studio.example.com"));

    println!("Generated HTML:\n{}", html);

    assert_eq!(html.matches(r#"data-ab-test="hero-1" data-variant="A""#).count(), 1);
    assert_eq!(html.matches(r#"data-ab-test="hero-1" data-variant="B""#).count(), 1);
    assert!(html.contains(r#"%%[ IF @abVariant_HERO_1 == "A" THEN ]%%"#));
    assert!(html.contains(r#"SET @abVariant_HERO_1 = RequestParameter("ab_HERO_1")"#));
    assert!(html.contains("Random(1, 2)"));
    assert!(html.contains("Challenger headline"));

    let preview = GenerateOptions::preview();
    let tested_preview = compose(&tested, &preview);
    assert!(!tested_preview.contains("data-variant"));
    assert!(!tested_preview.contains("Challenger headline"));
    assert_eq!(tested_preview, compose(&untested, &preview));
}

#[test]
fn test_ab_variant_is_posted_with_the_form() {
    let page = load(
        r#"{
            "meta": {"dataExtensionKey": "Leads"},
            "components": [
                {"id": "hero", "type": "Title", "props": {"text": "A"},
                 "abTestEnabled": true, "abTestVariants": [{"text": "B"}]},
                {"id": "f", "type": "Form", "props": {"fields": {"email": {"enabled": true}}}}
            ]
        }"#,
    );
    let html = generate_document(&page, &GenerateOptions::published("https://studio.example.com"));
    assert!(html.contains(r#"<input type="hidden" name="ab_HERO" value="%%=v(@abVariant_HERO)=%%">"#));
    assert!(html.contains(r#"record["ABVariant_HERO"] = f_ab_HERO;"#));
}

#[test]
fn test_tested_stripe_renders_both_variants() {
    let page = load(
        r#"{
            "meta": {"dataExtensionKey": "Leads"},
            "components": [
                {"id": "promo", "type": "Stripe", "props": {"text": "Base stripe"},
                 "abTestEnabled": true, "abTestVariants": [{"text": "Variant stripe"}]},
                {"id": "f", "type": "Form", "props": {"fields": {"email": {"enabled": true}}}}
            ]
        }"#,
    );
    let html = generate_document(&page, &GenerateOptions::published("https://studio.example.com"));

    assert!(html.contains(r#"%%[ IF @abVariant_PROMO == "A" THEN ]%%"#));
    assert_eq!(html.matches(r#"data-ab-test="promo" data-variant="A""#).count(), 1);
    assert_eq!(html.matches(r#"data-ab-test="promo" data-variant="B""#).count(), 1);
    assert!(html.contains("Base stripe"));
    assert!(html.contains("Variant stripe"));
    assert!(html.contains(r#"record["ABVariant_PROMO"] = f_ab_PROMO;"#));

    let variant = html.find("Variant stripe").expect("variant stripe");
    let main = html.find(r#"<main class="cp-page">"#).expect("main");
    assert!(variant < main);
    assert!(!html.contains("cp-section-stripe"));

    let preview = generate_document(&page, &GenerateOptions::preview());
    assert!(preview.contains("Base stripe"));
    assert!(!preview.contains("Variant stripe"));
}

#[test]
fn test_invalid_variant_patch_renders_base_only() {
    let page = load(
        r#"{"components": [
            {"id": "cols", "type": "Columns", "props": {"columnCount": 2},
             "abTestEnabled": true, "abTestVariants": [{"columnWidths": "wide"}]}
        ]}"#,
    );
    let html = generate_document(&page, &GenerateOptions::published(""));
    assert!(!html.contains("data-variant"));
    assert!(html.contains(r#"id="cp-cols""#));
}

#[test]
fn test_button_style_partition_in_document() {
    let page = load(
        r##"{"components": [
            {"id": "cta", "type": "Button", "props": {"text": "Buy", "styles": {"backgroundColor": "#111", "marginTop": "10px"}}}
        ]}"##,
    );
    let html = generate_document(&page, &GenerateOptions::preview());

    let wrapper_start = html.find(r#"class="cp-button-wrapper""#).expect("wrapper");
    let wrapper_tag = &html[wrapper_start..wrapper_start + html[wrapper_start..].find('>').unwrap()];
    assert!(wrapper_tag.contains("margin-top: 10px;"));
    assert!(!wrapper_tag.contains("background-color"));

    let anchor_start = html.find(r#"id="cp-cta""#).expect("button");
    let anchor_tag = &html[anchor_start..anchor_start + html[anchor_start..].find('>').unwrap()];
    assert!(anchor_tag.contains("background-color: #111;"));
    assert!(!anchor_tag.contains("margin-top"));
}

#[test]
fn test_prefilled_fields_match_prefill_block() {
    let page = load(
        r#"{"components": [
            {"id": "f", "type": "Form", "props": {
                "fields": {
                    "name": {"enabled": true, "prefillFromUrl": true},
                    "email": {"enabled": true, "prefillFromUrl": true},
                    "phone": {"enabled": true}
                },
                "customFields": [{"id": "cf-1", "name": "Company", "prefillFromUrl": true}]
            }}
        ]}"#,
    );
    let html = generate_document(&page, &GenerateOptions::published(""));

    for (variable, parameter) in [("@name", "name"), ("@email", "email"), ("@custom_CF_1", "Company")] {
        assert!(
            html.contains(&format!(r#"SET {} = RequestParameter("{}")"#, variable, parameter)),
            "missing prefill for {}",
            variable
        );
    }
    assert!(!html.contains(r#"RequestParameter("phone")"#));
    assert_eq!(html.matches("= RequestParameter(").count(), 3);
}

#[test]
fn test_conditional_field_wiring() {
    let page = load(
        r#"{"components": [
            {"id": "f", "type": "Form", "props": {
                "fields": {
                    "city": {"enabled": true},
                    "cpf": {"enabled": true, "required": true, "conditional": {"field": "city", "value": "São Paulo"}}
                }
            }}
        ]}"#,
    );
    let html = generate_document(&page, &GenerateOptions::preview());

    println!("Generated HTML:\n{}", html);

    assert!(html.contains(r#"data-conditional-field="city""#));
    assert!(html.contains(r#"data-conditional-value="São Paulo""#));
    assert!(html.contains(r#"data-conditional-required="true""#));
    assert!(html.contains(r#"data-mask="cpf""#));
    let cpf_input = html.find(r#"name="cpf""#).expect("cpf input");
    let cpf_tag = &html[cpf_input..cpf_input + html[cpf_input..].find('>').unwrap()];
    assert!(!cpf_tag.contains("required"));

    let cpf_label_start = html[..cpf_input].rfind("<label").expect("cpf label");
    let cpf_label = &html[cpf_label_start..cpf_label_start + html[cpf_label_start..].find("</label>").unwrap()];
    assert!(cpf_label.contains(r#"class="cp-required""#));
    assert_eq!(html.matches(r#"class="cp-required""#).count(), 1);
}

#[test]
fn test_invalid_video_degrades() {
    let page = load(
        r#"{"components": [
            {"id": "v", "type": "Video", "props": {"url": "https://example.com/clip.mp4"}},
            {"id": "t", "type": "Title", "props": {"text": "Still here"}}
        ]}"#,
    );
    let html = generate_document(&page, &GenerateOptions::preview());
    assert!(html.contains("Invalid video URL"));
    assert!(html.contains("Still here"));
}

#[test]
fn test_bad_prop_value_still_renders_the_page() {
    let page = load(
        r#"{"components": [
            {"id": "t", "type": "Title", "props": {"text": "Welcome"}},
            {"id": "b", "type": "Button", "props": {"text": "Buy now", "layout": {"alignment": "justify"}}}
        ]}"#,
    );
    let html = generate_document(&page, &GenerateOptions::preview());
    assert!(html.contains("Welcome"));
    assert!(html.contains("Buy now"));
}

#[test]
fn test_every_component_type_renders() {
    let page = load(
        r##"{"components": [
            {"id": "c1", "type": "Header", "props": {"title": "Brand"}},
            {"id": "c2", "type": "Banner", "props": {"imageUrl": "https://cdn.example.com/b.jpg"}},
            {"id": "c3", "type": "Subtitle", "props": {"text": "Sub"}},
            {"id": "c4", "type": "Image", "props": {"src": "https://cdn.example.com/i.jpg"}},
            {"id": "c5", "type": "FloatingImage", "props": {"src": "https://cdn.example.com/f.jpg", "text": "Side"}},
            {"id": "c6", "type": "Carousel", "props": {"slides": [{"imageUrl": "https://cdn.example.com/1.jpg"}]}},
            {"id": "c7", "type": "Countdown", "props": {"targetDate": "2031-01-01"}},
            {"id": "c8", "type": "Divider", "props": {}},
            {"id": "c9", "type": "Spacer", "props": {"height": 40}},
            {"id": "c10", "type": "DownloadButton", "props": {"fileUrl": "https://cdn.example.com/x.pdf"}},
            {"id": "c11", "type": "FloatingButton", "props": {"text": "Chat", "url": "#"}},
            {"id": "c12", "type": "Accordion", "props": {"items": [{"title": "Q", "content": "A"}]}},
            {"id": "c13", "type": "Tabs", "props": {"tabs": [{"title": "T", "content": "C"}]}},
            {"id": "c14", "type": "Voting", "props": {"options": [{"label": "Yes"}]}},
            {"id": "c15", "type": "NPS", "props": {}},
            {"id": "c16", "type": "Map", "props": {"address": "Lisbon"}},
            {"id": "c17", "type": "SocialIcons", "props": {"icons": [{"network": "instagram", "url": "https://instagram.com/x"}]}},
            {"id": "c18", "type": "FTPUpload", "props": {}},
            {"id": "c19", "type": "DataExtensionUpload", "props": {}},
            {"id": "c20", "type": "Calendly", "props": {"url": "https://calendly.com/x"}},
            {"id": "c21", "type": "AddToCalendar", "props": {"startDate": "2031-01-01T10:00:00Z"}},
            {"id": "c22", "type": "PopUp", "props": {"title": "Wait"}},
            {"id": "c23", "type": "CustomHTML", "props": {"html": "<b>raw</b>"}},
            {"id": "c24", "type": "Div", "props": {}},
            {"id": "c25", "type": "Footer", "props": {"companyName": "ACME"}}
        ]}"##,
    );
    let html = generate_document(&page, &GenerateOptions::preview());
    for component in &page.components {
        assert!(
            html.contains(&format!(r#"data-component="{}""#, component.id)),
            "{} ({}) did not render",
            component.id,
            component.component_type()
        );
    }
}
