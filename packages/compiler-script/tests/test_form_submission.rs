use cloudpage_compiler_script::{emit_form_submission_script, prefill_block, submission_fields};
use cloudpage_model::{CloudPage, FormSchema};

fn page(json: &str) -> CloudPage {
    CloudPage::from_json(json).expect("page")
}

const LEAD_PAGE: &str = r#"{
    "id": "lp",
    "meta": {"dataExtensionKey": "Leads_DE"},
    "components": [
        {"id": "hero", "type": "Title", "props": {"text": "Hi"},
         "abTestEnabled": true, "abTestVariants": [{"text": "Hello"}]},
        {"id": "score", "type": "NPS", "props": {}},
        {"id": "form", "type": "Form", "props": {
            "fields": {
                "name": {"enabled": true, "required": true},
                "email": {"enabled": true, "required": true, "prefillFromUrl": true},
                "city": {"enabled": true, "prefillFromUrl": true}
            },
            "customFields": [{"id": "cf-1", "name": "Company", "type": "text"}],
            "consent": {"enabled": true, "required": true},
            "redirectUrl": "https://example.com/thanks"
        }}
    ]
}"#;

#[test]
fn test_no_form_no_script() {
    let page = page(r#"{"components": [{"id": "t", "type": "Title", "props": {}}]}"#);
    assert!(emit_form_submission_script(&page).is_none());
}

#[test]
fn test_script_captures_every_field() {
    let page = page(LEAD_PAGE);
    let script = emit_form_submission_script(&page).expect("script");
    println!("{}", script);

    assert!(script.starts_with("<script runat=\"server\">\nPlatform.Load(\"Core\", \"1.1.1\");"));
    assert!(script.contains(r#"Request.GetFormField("__cp_submit") == "1""#));
    for (var, input) in [
        ("f_name", "name"),
        ("f_email", "email"),
        ("f_city", "city"),
        ("f_custom_CF_1", "custom_CF_1"),
        ("f_nps_score", "nps_score"),
        ("f_ab_HERO", "ab_HERO"),
    ] {
        assert!(
            script.contains(&format!("var {} = Request.GetFormField(\"{}\")", var, input)),
            "missing capture for {}",
            input
        );
    }
    assert!(script.contains(r#"var f_consent = Request.GetFormField("consent") ? "true" : "false";"#));
    assert!(script.contains(r#"record["Company"] = f_custom_CF_1;"#));
    assert!(script.contains(r#"record["NPSScore"] = f_nps_score;"#));
    assert!(script.contains(r#"record["ABVariant_HERO"] = f_ab_HERO;"#));
    assert!(script.contains(r#"DataExtension.Init("Leads_DE").Rows.Add(record);"#));
}

#[test]
fn test_write_is_guarded_by_discriminator_and_required_fields() {
    let script = emit_form_submission_script(&page(LEAD_PAGE)).expect("script");
    assert!(script.contains(r#"if (f_email != "" && f_name != "" && f_consent == "true") {"#));
    assert!(script.contains(r#"Variable.SetValue("@formSubmitted", "true");"#));
    assert!(script.contains(r#"Redirect("https://example.com/thanks", false);"#));
}

#[test]
fn test_placeholder_key_never_writes() {
    let json = LEAD_PAGE.replace("Leads_DE", "YOUR_DATA_EXTENSION_KEY");
    let script = emit_form_submission_script(&page(&json)).expect("script");
    assert!(!script.contains("Rows.Add"));
    assert!(!script.contains(r#"Variable.SetValue("@formSubmitted", "true");"#));
}

#[test]
fn test_debug_redirect_is_skipped() {
    let json = LEAD_PAGE.replace("https://example.com/thanks", "https://example.com/debug");
    let script = emit_form_submission_script(&page(&json)).expect("script");
    assert!(!script.contains("Redirect("));
}

#[test]
fn test_insert_by_name() {
    let json = LEAD_PAGE.replace(
        r#""dataExtensionKey": "Leads_DE""#,
        r#""dataExtensionKey": "Leads", "dataExtensionTargetMethod": "name""#,
    );
    let script = emit_form_submission_script(&page(&json)).expect("script");
    assert!(script.contains(r#"Platform.Function.InsertData("Leads", ["Name", "Email", "City", "Company", "Consent", "NPSScore", "ABVariant_HERO"], [f_name, f_email, f_city, f_custom_CF_1, f_consent, f_nps_score, f_ab_HERO]);"#));
}

#[test]
fn test_prefill_matches_flagged_fields() {
    let page = page(LEAD_PAGE);
    let (_, props) = page.form().expect("form");
    let schema = FormSchema::from_props(props);
    let block = prefill_block(&schema).expect("prefill");

    for field in schema.fields() {
        let statement = format!("SET {} = RequestParameter(", field.variable());
        assert_eq!(
            block.contains(&statement),
            field.prefill,
            "prefill mismatch for {}",
            field.input_name
        );
    }
    assert_eq!(block.matches("RequestParameter(").count(), 2);
}

#[test]
fn test_submission_fields_order() {
    let page = page(LEAD_PAGE);
    let (_, props) = page.form().expect("form");
    let columns: Vec<String> = submission_fields(&page, &FormSchema::from_props(props))
        .into_iter()
        .map(|f| f.column)
        .collect();
    assert_eq!(
        columns,
        vec!["Name", "Email", "City", "Company", "Consent", "NPSScore", "ABVariant_HERO"]
    );
}
