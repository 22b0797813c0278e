// File: src/manifest.rs
// Purpose: Route manifest parsing from routes.toml

use crate::attributes::{AttributeKey, AttributeValue, StringMap};
use crate::error::{RouteError, ValidationError};
use crate::node::{RouteNode, DEFAULT_ORDER};
use crate::render::RenderOptions;
use crate::tree::RouteTree;
use crate::writer::{FileWriter, RouteWriter};
use anyhow::{bail, Context};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// Default manifest file name
pub const DEFAULT_MANIFEST: &str = "routes.toml";

const MAX_INDENT: usize = 16;

/// Route manifest (routes.toml)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteManifest {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

/// Where and how the module is written
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Destination handed to the writer (default: "router.js")
    #[serde(default = "default_destination")]
    pub destination: String,

    /// Emit redirect, alias and the other extended attributes
    #[serde(default)]
    pub extended: bool,

    /// Spaces per nesting level (default: 4)
    #[serde(default = "default_indent")]
    pub indent: usize,
}

/// One `[[routes]]` (or nested `[[routes.children]]`) table
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteEntry {
    pub path: String,

    pub component: String,

    #[serde(default = "default_order")]
    pub order: i32,

    /// Loose table, checked against the attribute allow-list when built
    #[serde(default)]
    pub attributes: IndexMap<String, toml::Value>,

    #[serde(default)]
    pub children: Vec<RouteEntry>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            destination: default_destination(),
            extended: false,
            indent: default_indent(),
        }
    }
}

// Default values
fn default_destination() -> String {
    "router.js".to_string()
}

fn default_indent() -> usize {
    4
}

fn default_order() -> i32 {
    DEFAULT_ORDER
}

impl FromStr for RouteManifest {
    type Err = anyhow::Error;

    /// Parse a manifest from TOML source
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let manifest: RouteManifest =
            toml::from_str(content).context("Failed to parse route manifest")?;
        manifest.check()?;
        Ok(manifest)
    }
}

impl RouteManifest {
    /// Load a manifest from file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        content
            .parse()
            .with_context(|| format!("Invalid route manifest {}", path.display()))
    }

    fn check(&self) -> anyhow::Result<()> {
        let indent = self.output.indent;
        if indent == 0 || indent > MAX_INDENT {
            bail!("output.indent must be between 1 and {}, got {}", MAX_INDENT, indent);
        }
        Ok(())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::default()
            .with_indent(self.output.indent)
            .with_extended(self.output.extended)
    }

    /// Number of route entries at every depth
    pub fn route_count(&self) -> usize {
        fn count(entries: &[RouteEntry]) -> usize {
            entries.iter().map(|e| 1 + count(&e.children)).sum()
        }
        count(&self.routes)
    }

    /// Builds a tree that commits to `output.destination` on disk
    pub fn build_tree(&self) -> Result<RouteTree<FileWriter>, RouteError> {
        self.build_tree_with(FileWriter)
    }

    /// Builds a tree that commits through `writer`
    pub fn build_tree_with<W: RouteWriter>(&self, writer: W) -> Result<RouteTree<W>, RouteError> {
        let mut tree = RouteTree::with_writer(self.output.destination.clone(), writer)
            .with_options(self.render_options());

        for entry in &self.routes {
            tree.insert(entry.to_node()?)?;
        }
        Ok(tree)
    }
}

impl RouteEntry {
    /// Builds the node and its subtree, validating every entry
    pub fn to_node(&self) -> Result<RouteNode, RouteError> {
        if self.path.is_empty() {
            return Err(ValidationError::EmptyPath.into());
        }

        let mut pairs = Vec::with_capacity(self.attributes.len());
        for (key, value) in &self.attributes {
            let parsed = AttributeKey::parse(key).ok_or_else(|| ValidationError::UnknownAttribute {
                path: self.path.clone(),
                key: key.clone(),
            })?;
            let value = attribute_value(value).ok_or_else(|| {
                ValidationError::InvalidAttributeValue {
                    path: self.path.clone(),
                    key: key.clone(),
                    expected: parsed.expected(),
                }
            })?;
            pairs.push((key.as_str(), value));
        }

        let mut node = RouteNode::from_pairs(
            self.path.clone(),
            self.component.clone(),
            pairs,
            self.order,
        )?;

        for child in &self.children {
            node.insert(child.to_node()?)?;
        }
        Ok(node)
    }
}

/// Converts a TOML value into an attribute value
///
/// Tables may hold strings, numbers and booleans; booleans become `"1"` or
/// `""` so `in_navigation = false` stays falsy. Returns `None` for shapes no
/// attribute accepts (numbers at the top level, nested tables, dates).
fn attribute_value(value: &toml::Value) -> Option<AttributeValue> {
    match value {
        toml::Value::String(s) => Some(AttributeValue::Text(s.clone())),
        toml::Value::Boolean(b) => Some(AttributeValue::Flag(*b)),
        toml::Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .map(AttributeValue::List),
        toml::Value::Table(table) => table
            .iter()
            .map(|(k, v)| map_entry(v).map(|v| (k.clone(), v)))
            .collect::<Option<StringMap>>()
            .map(AttributeValue::Map),
        _ => None,
    }
}

fn map_entry(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(true) => Some("1".to_string()),
        toml::Value::Boolean(false) => Some(String::new()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let manifest: RouteManifest = "".parse().unwrap();
        assert_eq!(manifest.output.destination, "router.js");
        assert_eq!(manifest.output.indent, 4);
        assert!(!manifest.output.extended);
        assert!(manifest.routes.is_empty());
    }

    #[test]
    fn test_entry_defaults() {
        let manifest: RouteManifest = r#"
            [[routes]]
            path = "/home"
            component = "Home"
        "#
        .parse()
        .unwrap();
        let entry = &manifest.routes[0];
        assert_eq!(entry.order, DEFAULT_ORDER);
        assert!(entry.attributes.is_empty());
        assert!(entry.children.is_empty());
    }

    #[test]
    fn test_rejects_bad_indent() {
        let err = "[output]\nindent = 0\n".parse::<RouteManifest>().unwrap_err();
        assert!(err.to_string().contains("output.indent"));
        assert!("[output]\nindent = 17\n".parse::<RouteManifest>().is_err());
    }

    #[test]
    fn test_rejects_unknown_top_level_fields() {
        assert!("[server]\nport = 1\n".parse::<RouteManifest>().is_err());
    }

    #[test]
    fn test_route_count() {
        let manifest: RouteManifest = r#"
            [[routes]]
            path = "/a"
            component = "A"

            [[routes.children]]
            path = "b"
            component = "B"

            [[routes]]
            path = "/c"
            component = "C"
        "#
        .parse()
        .unwrap();
        assert_eq!(manifest.route_count(), 3);
    }

    #[test]
    fn test_table_scalars_become_strings() {
        let value: toml::Value = toml::from_str::<toml::Table>(
            "meta = { in_navigation = true, hidden = false, rank = 3 }",
        )
        .unwrap()
        .remove("meta")
        .unwrap();
        assert_eq!(
            attribute_value(&value),
            Some(AttributeValue::map([("in_navigation", "1"), ("hidden", ""), ("rank", "3")]))
        );
    }

    #[test]
    fn test_unsupported_shapes() {
        assert_eq!(attribute_value(&toml::Value::Integer(5)), None);
        assert_eq!(
            attribute_value(&toml::Value::Array(vec![toml::Value::Integer(1)])),
            None
        );
        let nested: toml::Table = toml::from_str("a = { b = { c = \"d\" } }").unwrap();
        assert_eq!(attribute_value(&nested["a"]), None);
    }
}
