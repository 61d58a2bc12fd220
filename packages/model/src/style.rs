//! Style maps attached to components and columns.
//!
//! A [`StyleMap`] keeps the declaration order of the source JSON so that
//! serialized CSS is stable across runs.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single style value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Gradient(Gradient),
    Other(serde_json::Value),
}

impl StyleValue {
    /// Falsy values (empty string, zero, false, null) are never emitted
    pub fn is_truthy(&self) -> bool {
        match self {
            StyleValue::Bool(b) => *b,
            StyleValue::Number(n) => *n != 0.0 && !n.is_nan(),
            StyleValue::Text(s) => !s.is_empty(),
            StyleValue::Gradient(_) => true,
            StyleValue::Other(v) => !v.is_null(),
        }
    }

    /// CSS text for scalar truthy values
    pub fn as_css(&self) -> Option<String> {
        if !self.is_truthy() {
            return None;
        }
        match self {
            StyleValue::Bool(b) => Some(b.to_string()),
            StyleValue::Number(n) => Some(format_number(*n)),
            StyleValue::Text(s) => Some(s.clone()),
            StyleValue::Gradient(_) | StyleValue::Other(_) => None,
        }
    }

    /// Like [`StyleValue::as_css`] but bare numbers get a `px` unit
    pub fn as_length(&self) -> Option<String> {
        match self {
            StyleValue::Number(n) if *n != 0.0 => Some(format!("{}px", format_number(*n))),
            other => other.as_css(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            StyleValue::Text(s) => s.trim().trim_end_matches("px").parse().ok(),
            _ => None,
        }
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Text(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Text(s)
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Number(n)
    }
}

impl From<i32> for StyleValue {
    fn from(n: i32) -> Self {
        StyleValue::Number(n as f64)
    }
}

/// Formats a number without a trailing `.0` for integral values
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Two-stop gradient stored under the `gradient` style key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gradient {
    #[serde(rename = "type", default)]
    pub kind: GradientKind,
    #[serde(default)]
    pub angle: Option<f64>,
    pub start_color: String,
    pub end_color: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

/// Ordered map of camelCase style keys to values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMap {
    entries: Vec<(String, StyleValue)>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value; replaced keys keep their original position
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// CSS text of a truthy scalar value
    pub fn css(&self, key: &str) -> Option<String> {
        self.get(key).and_then(StyleValue::as_css)
    }

    pub fn gradient(&self) -> Option<&Gradient> {
        match self.get("gradient") {
            Some(StyleValue::Gradient(g)) => Some(g),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn remove(&mut self, key: &str) -> Option<StyleValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a copy of `self` with every entry of `overrides` applied on top
    pub fn merged(&self, overrides: &StyleMap) -> StyleMap {
        let mut merged = self.clone();
        for (key, value) in overrides.iter() {
            merged.insert(key, value.clone());
        }
        merged
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = StyleMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for StyleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct StyleMapVisitor;

impl<'de> Visitor<'de> for StyleMapVisitor {
    type Value = StyleMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of style keys to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<StyleMap, A::Error> {
        let mut map = StyleMap::new();
        while let Some((key, value)) = access.next_entry::<String, StyleValue>()? {
            map.insert(key, value);
        }
        Ok(map)
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<StyleMap, E> {
        Ok(StyleMap::new())
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<StyleMap, E> {
        Ok(StyleMap::new())
    }
}

impl<'de> Deserialize<'de> for StyleMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StyleMapVisitor)
    }
}
