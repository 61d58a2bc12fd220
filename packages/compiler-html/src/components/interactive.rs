//! Components with client-side behaviour. Each emits a script scoped to its
//! own DOM id; persisted state uses a storage key derived from the id.

use super::{non_empty, root, script, styled_root};
use crate::dates::parse_datetime;
use crate::markup::{Element, Node};
use cloudpage_compiler_css::{serialize_styles, StyleFilter};
use cloudpage_compiler_script::names::{FORM_ELEMENT_ID, NPS_INPUT};
use cloudpage_compiler_script::ssjs::js_string;
use cloudpage_model::format_number;
use cloudpage_model::props::{
    AccordionProps, CountdownProps, NpsProps, PopUpProps, PopUpTrigger, TabsProps, VotingProps,
};
use cloudpage_model::PageComponent;
use tracing::warn;

pub fn render_accordion(component: &PageComponent, props: &AccordionProps) -> Node {
    let items = props.items.iter().map(|item| {
        Node::from(
            Element::new("div")
                .with_class("cp-accordion-item")
                .with_child(
                    Element::new("button")
                        .with_attr("type", "button")
                        .with_class("cp-accordion-header")
                        .with_attr("aria-expanded", "false")
                        .with_text(item.title.as_str()),
                )
                .with_child(
                    Element::new("div")
                        .with_class("cp-accordion-body")
                        .with_text(item.content.as_str()),
                ),
        )
    });

    Node::Fragment(vec![
        styled_root(component, "div")
            .with_attr_opt("data-allow-multiple", props.allow_multiple.then_some("true"))
            .with_children(items)
            .into(),
        script(format!("cpInitAccordion({});", js_string(&component.dom_id()))),
    ])
}

pub fn render_tabs(component: &PageComponent, props: &TabsProps) -> Node {
    let dom_id = component.dom_id();
    let buttons = props.tabs.iter().enumerate().map(|(i, tab)| {
        Node::from(
            Element::new("button")
                .with_attr("type", "button")
                .with_class("cp-tab-button")
                .with_class_if("active", i == 0)
                .with_attr("role", "tab")
                .with_attr("data-tab", i.to_string())
                .with_text(tab.title.as_str()),
        )
    });
    let panels = props.tabs.iter().enumerate().map(|(i, tab)| {
        Node::from(
            Element::new("div")
                .with_class("cp-tab-panel")
                .with_class_if("active", i == 0)
                .with_attr("role", "tabpanel")
                .with_attr("data-tab", i.to_string())
                .with_text(tab.content.as_str()),
        )
    });

    Node::Fragment(vec![
        styled_root(component, "div")
            .with_child(
                Element::new("div")
                    .with_class("cp-tabs-nav")
                    .with_attr("role", "tablist")
                    .with_children(buttons),
            )
            .with_children(panels)
            .into(),
        script(format!("cpInitTabs({});", js_string(&dom_id))),
    ])
}

pub fn render_voting(component: &PageComponent, props: &VotingProps) -> Node {
    let dom_id = component.dom_id();
    let question = non_empty(props.question.as_deref()).unwrap_or("What do you think?");
    let thanks = non_empty(props.thank_you_message.as_deref()).unwrap_or("Thanks for voting!");

    let options = props.options.iter().enumerate().map(|(i, option)| {
        let key = option
            .id
            .as_deref()
            .map(str::to_string)
            .unwrap_or_else(|| format!("option-{}", i + 1));
        let mut button = Element::new("button")
            .with_attr("type", "button")
            .with_class("cp-vote-option")
            .with_attr("data-option", key)
            .with_child(Element::new("span").with_text(option.label.as_str()));
        if props.show_results {
            button = button.with_child(Element::new("div").with_class("cp-vote-bar"));
        }
        Node::from(button)
    });

    let voting = styled_root(component, "div")
        .with_child(Element::new("h3").with_class("cp-vote-question").with_text(question))
        .with_child(Element::new("div").with_class("cp-vote-options").with_children(options))
        .with_child(Element::new("p").with_class("cp-vote-thanks").with_text(thanks));

    Node::Fragment(vec![
        voting.into(),
        script(format!(
            r#"(function () {{
  var root = document.getElementById({id});
  if (!root) return;
  var key = {key};
  var options = root.querySelectorAll(".cp-vote-option");
  function read() {{
    try {{ return JSON.parse(localStorage.getItem(key)) || {{ counts: {{}} }}; }} catch (e) {{ return {{ counts: {{}} }}; }}
  }}
  function paint(state) {{
    var total = 0;
    for (var k in state.counts) total += state.counts[k];
    for (var i = 0; i < options.length; i++) {{
      var option = options[i].getAttribute("data-option");
      options[i].classList.toggle("selected", state.choice === option);
      var bar = options[i].querySelector(".cp-vote-bar");
      if (bar) bar.style.width = (total ? Math.round(100 * (state.counts[option] || 0) / total) : 0) + "%";
    }}
    root.querySelector(".cp-vote-thanks").style.display = state.choice ? "block" : "none";
  }}
  for (var i = 0; i < options.length; i++) {{
    options[i].onclick = function () {{
      var state = read();
      if (state.choice) return;
      var option = this.getAttribute("data-option");
      state.choice = option;
      state.counts[option] = (state.counts[option] || 0) + 1;
      localStorage.setItem(key, JSON.stringify(state));
      paint(state);
    }};
  }}
  paint(read());
}})();"#,
            id = js_string(&dom_id),
            key = js_string(&format!("cp-vote-{}", component.id)),
        )),
    ])
}

pub fn render_nps(component: &PageComponent, props: &NpsProps) -> Node {
    let dom_id = component.dom_id();
    let question = non_empty(props.question.as_deref())
        .unwrap_or("How likely are you to recommend us to a friend?");
    let thanks = non_empty(props.thank_you_message.as_deref()).unwrap_or("Thank you for your feedback!");

    let scores = (0..=10).map(|score| {
        Node::from(
            Element::new("button")
                .with_attr("type", "button")
                .with_class("cp-nps-score")
                .with_attr("data-score", score.to_string())
                .with_text(score.to_string()),
        )
    });

    let nps = styled_root(component, "div")
        .with_child(Element::new("h3").with_class("cp-nps-question").with_text(question))
        .with_child(Element::new("div").with_class("cp-nps-scale").with_children(scores))
        .with_child(
            Element::new("div")
                .with_class("cp-nps-labels")
                .with_child(Element::new("span").with_text(non_empty(props.low_label.as_deref()).unwrap_or("Not likely")))
                .with_child(Element::new("span").with_text(non_empty(props.high_label.as_deref()).unwrap_or("Very likely"))),
        )
        .with_child(
            Element::new("input")
                .with_attr("type", "hidden")
                .with_attr("name", NPS_INPUT)
                .with_attr("form", FORM_ELEMENT_ID)
                .with_attr("value", ""),
        )
        .with_child(Element::new("p").with_class("cp-nps-thanks").with_text(thanks));

    Node::Fragment(vec![
        nps.into(),
        script(format!(
            r#"(function () {{
  var root = document.getElementById({id});
  if (!root) return;
  var key = {key};
  var input = root.querySelector("input[name={input}]");
  var buttons = root.querySelectorAll(".cp-nps-score");
  function select(score) {{
    for (var i = 0; i < buttons.length; i++) {{
      buttons[i].classList.toggle("selected", buttons[i].getAttribute("data-score") === score);
    }}
    if (input) input.value = score;
    root.querySelector(".cp-nps-thanks").style.display = "block";
  }}
  for (var i = 0; i < buttons.length; i++) {{
    buttons[i].onclick = function () {{
      var score = this.getAttribute("data-score");
      try {{ sessionStorage.setItem(key, score); }} catch (e) {{}}
      select(score);
    }};
  }}
  try {{ var saved = sessionStorage.getItem(key); if (saved !== null) select(saved); }} catch (e) {{}}
}})();"#,
            id = js_string(&dom_id),
            key = js_string(&format!("cp-nps-{}", component.id)),
            input = NPS_INPUT,
        )),
    ])
}

pub fn render_countdown(component: &PageComponent, props: &CountdownProps) -> Node {
    let expired = non_empty(props.expired_message.as_deref()).unwrap_or("This offer has ended.");
    let mut countdown = styled_root(component, "div");
    if let Some(title) = non_empty(props.title.as_deref()) {
        countdown = countdown.with_child(Element::new("h3").with_class("cp-countdown-title").with_text(title));
    }

    let raw = props.target_date.as_deref().unwrap_or("");
    let Some(target) = parse_datetime(raw) else {
        warn!(component = %component.id, date = %raw, "Invalid countdown date");
        return countdown
            .with_child(
                Element::new("div")
                    .with_class("cp-countdown-expired")
                    .with_style("display: block;")
                    .with_text(expired),
            )
            .into();
    };

    let units = [("days", "Days"), ("hours", "Hours"), ("minutes", "Minutes"), ("seconds", "Seconds")]
        .into_iter()
        .map(|(unit, label)| {
            Node::from(
                Element::new("div")
                    .with_class("cp-countdown-unit")
                    .with_child(
                        Element::new("span")
                            .with_class("cp-countdown-value")
                            .with_attr("data-unit", unit)
                            .with_text("00"),
                    )
                    .with_child(Element::new("span").with_class("cp-countdown-label").with_text(label)),
            )
        });

    countdown = countdown
        .with_attr("data-target", target.timestamp_millis().to_string())
        .with_child(Element::new("div").with_class("cp-countdown-units").with_children(units))
        .with_child(Element::new("div").with_class("cp-countdown-expired").with_text(expired));

    Node::Fragment(vec![
        countdown.into(),
        script(format!(
            r#"(function () {{
  var root = document.getElementById({id});
  if (!root) return;
  var target = parseInt(root.getAttribute("data-target"), 10);
  function pad(n) {{ return n < 10 ? "0" + n : String(n); }}
  function set(unit, value) {{
    var el = root.querySelector('[data-unit="' + unit + '"]');
    if (el) el.textContent = pad(value);
  }}
  function tick() {{
    var left = target - Date.now();
    if (left <= 0) {{
      clearInterval(root._cpTimer);
      root.querySelector(".cp-countdown-units").style.display = "none";
      root.querySelector(".cp-countdown-expired").style.display = "block";
      return;
    }}
    set("days", Math.floor(left / 86400000));
    set("hours", Math.floor(left / 3600000) % 24);
    set("minutes", Math.floor(left / 60000) % 60);
    set("seconds", Math.floor(left / 1000) % 60);
  }}
  if (root._cpTimer) clearInterval(root._cpTimer);
  root._cpTimer = setInterval(tick, 1000);
  tick();
}})();"#,
            id = js_string(&component.dom_id()),
        )),
    ])
}

pub fn render_popup(component: &PageComponent, props: &PopUpProps) -> Node {
    let dom_id = component.dom_id();
    let mut dialog = Element::new("div")
        .with_class("cp-popup")
        .with_attr("role", "dialog")
        .with_attr("aria-modal", "true")
        .with_child(
            Element::new("button")
                .with_attr("type", "button")
                .with_class("cp-popup-close")
                .with_attr("aria-label", "Close")
                .with_text("&times;"),
        );
    if let Some(image) = non_empty(props.image_url.as_deref()) {
        dialog = dialog.with_child(Element::new("img").with_attr("src", image).with_attr("alt", ""));
    }
    if let Some(title) = non_empty(props.title.as_deref()) {
        dialog = dialog.with_child(Element::new("h3").with_text(title));
    }
    if let Some(content) = non_empty(props.content.as_deref()) {
        dialog = dialog.with_child(Element::new("div").with_class("cp-popup-content").with_text(content));
    }
    if let Some(text) = non_empty(props.button_text.as_deref()) {
        dialog = dialog.with_child(
            Element::new("a")
                .with_class("cp-button")
                .with_attr("href", non_empty(props.button_url.as_deref()).unwrap_or("#"))
                .with_text(text),
        );
    }
    dialog = dialog.with_style(serialize_styles(&props.common.styles, StyleFilter::ALL));

    let trigger = match props.trigger {
        PopUpTrigger::OnLoad => "load",
        PopUpTrigger::Delay => "delay",
        PopUpTrigger::ExitIntent => "exit",
    };
    let delay_ms = props.delay_seconds.filter(|d| *d > 0.0).unwrap_or(5.0) * 1000.0;

    Node::Fragment(vec![
        root(component, "div")
            .with_class("cp-popup-overlay")
            .with_child(dialog)
            .into(),
        script(format!(
            r#"(function () {{
  var root = document.getElementById({id});
  if (!root) return;
  var key = {key};
  function seen() {{ try {{ return sessionStorage.getItem(key) === "1"; }} catch (e) {{ return false; }} }}
  function open() {{
    if (seen()) return;
    root.classList.add("open");
    try {{ sessionStorage.setItem(key, "1"); }} catch (e) {{}}
  }}
  function close() {{ root.classList.remove("open"); }}
  root.querySelector(".cp-popup-close").onclick = close;
  root.onclick = function (e) {{ if (e.target === root) close(); }};
  var trigger = {trigger};
  if (trigger === "load") open();
  else if (trigger === "delay") setTimeout(open, {delay});
  else document.addEventListener("mouseout", function (e) {{ if (!e.relatedTarget && e.clientY <= 0) open(); }});
}})();"#,
            id = js_string(&dom_id),
            key = js_string(&format!("cp-popup-{}", component.id)),
            trigger = js_string(trigger),
            delay = format_number(delay_ms),
        )),
    ])
}
