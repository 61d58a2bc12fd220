//! Behaviour shared by every generated page, emitted once in `<head>`.
//!
//! Per-component scripts call into the functions defined here
//! (`cpInitAccordion`, `cpInitTabs`). Everything else wires itself up on
//! `DOMContentLoaded`: input masks, form validation, conditional fields and
//! the loading overlay shown while a form posts.

pub const CLIENT_SCRIPT: &str = r##"(function () {
  function each(list, fn) { for (var i = 0; i < list.length; i++) fn(list[i], i); }
  function digits(value) { return (value || "").replace(/\D/g, ""); }

  window.cpInitAccordion = function (id) {
    var root = document.getElementById(id);
    if (!root) return;
    var multiple = root.getAttribute("data-allow-multiple") === "true";
    var items = root.querySelectorAll(".cp-accordion-item");
    each(items, function (item) {
      var header = item.querySelector(".cp-accordion-header");
      header.onclick = function () {
        var open = !item.classList.contains("open");
        if (!multiple) {
          each(items, function (other) {
            other.classList.remove("open");
            other.querySelector(".cp-accordion-header").setAttribute("aria-expanded", "false");
          });
        }
        item.classList.toggle("open", open);
        header.setAttribute("aria-expanded", open ? "true" : "false");
      };
    });
  };

  window.cpInitTabs = function (id) {
    var root = document.getElementById(id);
    if (!root) return;
    var buttons = root.querySelectorAll(".cp-tab-button");
    var panels = root.querySelectorAll(".cp-tab-panel");
    each(buttons, function (button) {
      button.onclick = function () {
        var tab = button.getAttribute("data-tab");
        each(buttons, function (b) { b.classList.toggle("active", b === button); });
        each(panels, function (p) { p.classList.toggle("active", p.getAttribute("data-tab") === tab); });
      };
    });
  };

  var masks = {
    phone: function (value) {
      var d = digits(value).slice(0, 11);
      if (d.length <= 2) return d.length ? "(" + d : "";
      if (d.length <= 6) return "(" + d.slice(0, 2) + ") " + d.slice(2);
      if (d.length <= 10) return "(" + d.slice(0, 2) + ") " + d.slice(2, 6) + "-" + d.slice(6);
      return "(" + d.slice(0, 2) + ") " + d.slice(2, 7) + "-" + d.slice(7);
    },
    cpf: function (value) {
      var d = digits(value).slice(0, 11);
      if (d.length <= 3) return d;
      if (d.length <= 6) return d.slice(0, 3) + "." + d.slice(3);
      if (d.length <= 9) return d.slice(0, 3) + "." + d.slice(3, 6) + "." + d.slice(6);
      return d.slice(0, 3) + "." + d.slice(3, 6) + "." + d.slice(6, 9) + "-" + d.slice(9);
    }
  };

  function validCpf(value) {
    var d = digits(value);
    if (d.length !== 11 || /^(\d)\1{10}$/.test(d)) return false;
    for (var t = 9; t < 11; t++) {
      var sum = 0;
      for (var i = 0; i < t; i++) sum += parseInt(d.charAt(i), 10) * (t + 1 - i);
      var check = (sum * 10) % 11 % 10;
      if (check !== parseInt(d.charAt(t), 10)) return false;
    }
    return true;
  }

  function validate(input) {
    var value = input.type === "checkbox" ? (input.checked ? "on" : "") : (input.value || "").trim();
    var ok = true;
    if (input.required && !value) ok = false;
    else if (value && input.type === "email") ok = /^[^\s@]+@[^\s@]+\.[^\s@]+$/.test(value);
    else if (value && input.getAttribute("data-mask") === "phone") ok = digits(value).length >= 10;
    else if (value && input.getAttribute("data-mask") === "cpf") ok = validCpf(value);
    input.classList.toggle("cp-invalid", !ok);
    return ok;
  }

  function triggerValue(form, name) {
    var inputs = form.querySelectorAll('[name="' + name + '"]');
    var value = "";
    each(inputs, function (input) {
      if (input.type === "checkbox") { if (input.checked) value = "true"; }
      else if (input.type === "radio") { if (input.checked) value = input.value; }
      else value = input.value;
    });
    return (value || "").trim().toLowerCase();
  }

  function applyConditions(form) {
    each(form.querySelectorAll("[data-conditional-field]"), function (field) {
      var expected = (field.getAttribute("data-conditional-value") || "").trim().toLowerCase();
      var visible = triggerValue(form, field.getAttribute("data-conditional-field")) === expected;
      var required = field.getAttribute("data-conditional-required") === "true";
      field.classList.toggle("cp-hidden", !visible);
      each(field.querySelectorAll("input, select, textarea"), function (input) {
        input.required = visible && required;
        if (!visible) input.classList.remove("cp-invalid");
      });
    });
  }

  document.addEventListener("DOMContentLoaded", function () {
    each(document.querySelectorAll("input[data-mask]"), function (input) {
      var mask = masks[input.getAttribute("data-mask")];
      if (!mask) return;
      input.addEventListener("input", function () { input.value = mask(input.value); });
    });

    each(document.querySelectorAll("form[data-cp-form]"), function (form) {
      applyConditions(form);
      form.addEventListener("change", function () { applyConditions(form); });
      form.addEventListener("input", function () { applyConditions(form); });

      each(form.querySelectorAll("input, select, textarea"), function (input) {
        input.addEventListener("blur", function () { if (input.value) validate(input); });
      });

      form.addEventListener("submit", function (event) {
        var firstInvalid = null;
        each(form.querySelectorAll("input, select, textarea"), function (input) {
          if (input.type === "hidden" || input.closest(".cp-hidden")) return;
          if (!validate(input) && !firstInvalid) firstInvalid = input;
        });
        if (firstInvalid) {
          event.preventDefault();
          firstInvalid.focus();
          return;
        }
        var loading = document.getElementById("cp-loading");
        if (loading) loading.classList.add("active");
      });
    });
  });
})();"##;
