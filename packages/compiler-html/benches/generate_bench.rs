use cloudpage_compiler_html::{generate_document, GenerateOptions};
use cloudpage_model::CloudPage;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn load(json: &str) -> CloudPage {
    CloudPage::from_json(json).expect("Failed to load page")
}

fn generate_small_page(c: &mut Criterion) {
    let page = load(
        r#"{
            "id": "small",
            "components": [
                {"id": "hello", "type": "Title", "props": {"text": "Hello"}},
                {"id": "intro", "type": "Paragraph", "props": {"text": "Welcome"}},
                {"id": "cta", "type": "Button", "props": {"text": "Go", "url": "https://example.com"}}
            ]
        }"#,
    );
    let options = GenerateOptions::published("https://studio.example.com");

    c.bench_function("generate_small_page", |b| {
        b.iter(|| generate_document(black_box(&page), black_box(&options)))
    });
}

fn generate_form_page(c: &mut Criterion) {
    let page = load(
        r#"{
            "id": "leads",
            "meta": {"dataExtensionKey": "Leads", "security": {"type": "password", "dataExtensionKey": "Users", "identifierField": "Email", "passwordField": "Password"}},
            "components": [
                {"id": "hero", "type": "Title", "props": {"text": "Join", "dataBinding": "FirstName"},
                 "abTestEnabled": true, "abTestVariants": [{"text": "Sign up today"}]},
                {"id": "row", "type": "Columns", "props": {"columnCount": 2, "columnWidths": [60, 40]}},
                {"id": "copy", "type": "Paragraph", "parentId": "row", "column": 0, "props": {"text": "Details"}},
                {"id": "form", "type": "Form", "parentId": "row", "column": 1, "props": {
                    "fields": {
                        "name": {"enabled": true, "prefillFromUrl": true},
                        "email": {"enabled": true, "required": true},
                        "phone": {"enabled": true}
                    },
                    "customFields": [{"id": "cf-1", "name": "Company", "type": "select", "options": ["A", "B"]}]
                }},
                {"id": "score", "type": "NPS", "props": {}}
            ]
        }"#,
    );
    let options = GenerateOptions::published("https://studio.example.com");

    c.bench_function("generate_form_page", |b| {
        b.iter(|| generate_document(black_box(&page), black_box(&options)))
    });
}

fn generate_large_page(c: &mut Criterion) {
    // Many nested sections
    let mut components = Vec::new();
    for i in 0..50 {
        components.push(format!(
            r#"{{"id": "box-{i}", "type": "Div", "order": {i}, "props": {{}}}}"#
        ));
        components.push(format!(
            r#"{{"id": "cols-{i}", "type": "Columns", "parentId": "box-{i}", "props": {{"columnCount": 3}}}}"#
        ));
        for column in 0..3 {
            components.push(format!(
                r#"{{"id": "text-{i}-{column}", "type": "Paragraph", "parentId": "cols-{i}", "column": {column}, "props": {{"text": "Cell {column}"}}}}"#
            ));
        }
    }
    let page = load(&format!(r#"{{"id": "large", "components": [{}]}}"#, components.join(",")));
    let options = GenerateOptions::preview();

    c.bench_function("generate_large_page", |b| {
        b.iter(|| generate_document(black_box(&page), black_box(&options)))
    });
}

criterion_group!(benches, generate_small_page, generate_form_page, generate_large_page);
criterion_main!(benches);
