//! File upload widgets. Both post a `multipart/form-data` body to a
//! designer-configured endpoint; without one the widget renders disabled.

use super::{non_empty, script, styled_root};
use crate::markup::{Element, Node};
use cloudpage_compiler_script::ssjs::js_string;
use cloudpage_model::format_number;
use cloudpage_model::props::{DataExtensionUploadProps, FtpUploadProps};
use cloudpage_model::PageComponent;
use tracing::warn;

const DEFAULT_MAX_SIZE_MB: f64 = 10.0;

/// Fields posted alongside the file, in order
struct UploadForm<'a> {
    label: &'a str,
    accept: Option<&'a str>,
    button_text: &'a str,
    endpoint: Option<&'a str>,
    max_size_mb: f64,
    extra: Vec<(&'static str, String)>,
}

pub fn render_ftp_upload(component: &PageComponent, props: &FtpUploadProps) -> Node {
    let mut extra = Vec::new();
    if let Some(folder) = non_empty(props.folder.as_deref()) {
        extra.push(("folder", folder.to_string()));
    }
    upload_widget(
        component,
        UploadForm {
            label: non_empty(props.label.as_deref()).unwrap_or("Upload a file"),
            accept: non_empty(props.accept.as_deref()),
            button_text: non_empty(props.button_text.as_deref()).unwrap_or("Upload"),
            endpoint: non_empty(props.endpoint.as_deref()),
            max_size_mb: props.max_size_mb.filter(|m| *m > 0.0).unwrap_or(DEFAULT_MAX_SIZE_MB),
            extra,
        },
    )
}

pub fn render_de_upload(component: &PageComponent, props: &DataExtensionUploadProps) -> Node {
    let mut extra = Vec::new();
    if let Some(key) = non_empty(props.data_extension_key.as_deref()) {
        extra.push(("dataExtensionKey", key.to_string()));
    }
    upload_widget(
        component,
        UploadForm {
            label: non_empty(props.label.as_deref()).unwrap_or("Import a CSV file"),
            accept: Some(".csv,text/csv"),
            button_text: non_empty(props.button_text.as_deref()).unwrap_or("Import"),
            endpoint: non_empty(props.endpoint.as_deref()),
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            extra,
        },
    )
}

fn upload_widget(component: &PageComponent, form: UploadForm) -> Node {
    let input_id = format!("{}-file", component.dom_id());
    let mut root = styled_root(component, "div")
        .with_class("cp-upload")
        .with_child(
            Element::new("label")
                .with_class("cp-label")
                .with_attr("for", input_id.as_str())
                .with_text(form.label),
        )
        .with_child(
            Element::new("input")
                .with_attr("type", "file")
                .with_attr("id", input_id.as_str())
                .with_class("cp-input")
                .with_attr_opt("accept", form.accept),
        )
        .with_child(
            Element::new("button")
                .with_attr("type", "button")
                .with_class("cp-button cp-upload-button")
                .with_flag_if("disabled", form.endpoint.is_none())
                .with_text(form.button_text),
        )
        .with_child(Element::new("div").with_class("cp-upload-status").with_attr("aria-live", "polite"));

    let Some(endpoint) = form.endpoint else {
        warn!(component = %component.id, "Upload widget has no endpoint");
        return root.into();
    };
    root = root.with_attr("data-endpoint", endpoint);

    let appends: String = form
        .extra
        .iter()
        .map(|(key, value)| format!("\n      body.append({}, {});", js_string(key), js_string(value)))
        .collect();

    Node::Fragment(vec![
        root.into(),
        script(format!(
            r#"(function () {{
  var root = document.getElementById({id});
  if (!root) return;
  var input = root.querySelector("input[type=file]");
  var status = root.querySelector(".cp-upload-status");
  var maxBytes = {max} * 1024 * 1024;
  root.querySelector(".cp-upload-button").onclick = function () {{
    var file = input.files && input.files[0];
    if (!file) {{ status.textContent = "Choose a file first."; return; }}
    if (file.size > maxBytes) {{ status.textContent = "File is larger than {max} MB."; return; }}
    var body = new FormData();
    body.append("file", file);{appends}
    status.textContent = "Uploading...";
    fetch(root.getAttribute("data-endpoint"), {{ method: "POST", body: body }})
      .then(function (res) {{ status.textContent = res.ok ? "Upload complete." : "Upload failed."; }})
      .catch(function () {{ status.textContent = "Upload failed."; }});
  }};
}})();"#,
            id = js_string(&component.dom_id()),
            max = format_number(form.max_size_mb),
            appends = appends,
        )),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudpage_model::ComponentProps;

    #[test]
    fn test_upload_posts_to_endpoint() {
        let component: PageComponent = serde_json::from_str(
            r#"{"id": "u1", "type": "FTPUpload", "props": {"endpoint": "https://files.example.com/in", "folder": "leads", "maxSizeMb": 5}}"#,
        )
        .unwrap();
        let html = match &component.props {
            ComponentProps::FtpUpload(p) => render_ftp_upload(&component, p).to_html(),
            _ => unreachable!(),
        };
        println!("{}", html);
        assert!(html.contains(r#"data-endpoint="https://files.example.com/in""#));
        assert!(html.contains(r#"body.append("folder", "leads");"#));
        assert!(html.contains("var maxBytes = 5 * 1024 * 1024;"));
    }

    #[test]
    fn test_upload_without_endpoint_is_disabled() {
        let component: PageComponent = serde_json::from_str(
            r#"{"id": "u2", "type": "DataExtensionUpload", "props": {"dataExtensionKey": "LEADS"}}"#,
        )
        .unwrap();
        let html = match &component.props {
            ComponentProps::DataExtensionUpload(p) => render_de_upload(&component, p).to_html(),
            _ => unreachable!(),
        };
        assert!(html.contains("disabled"));
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"accept=".csv,text/csv""#));
    }
}
