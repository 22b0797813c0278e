//! Rendering of route nodes into Vue Router configuration source
//!
//! Nodes are first lowered into a small intermediate representation
//! ([`Block`] / [`Field`] / [`FieldValue`]) and then written out by a single
//! recursive emitter. Field order, indentation and block terminators are
//! decided here and nowhere else.
//!
//! # Output Shape
//!
//! ```text
//! export default [
//!     {
//!         path: '/admin',
//!         name: 'admin',
//!         component: () => import('@/views/Admin.vue'),
//!         meta: {
//!             'title': 'Admin',
//!         },
//!         children: [
//!             {
//!                 path: 'crud',
//!                 name: '',
//!                 component: () => import('@/views/Crud.vue'),
//!             },
//!         ],
//!     },
//! ];
//! ```
//!
//! String values are wrapped in single quotes and are not escaped.

use crate::attributes::StringMap;
use crate::node::RouteNode;

/// Document prologue in front of the top-level route array
pub const DOCUMENT_OPEN: &str = "export default [";
/// Document epilogue after the top-level route array
pub const DOCUMENT_CLOSE: &str = "];";

/// Knobs for the serializer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per nesting level
    pub indent: usize,
    /// Also emit redirect, alias, components, beforeEnter, caseSensitive
    /// and pathToRegexpOptions
    pub extended: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            extended: false,
        }
    }
}

impl RenderOptions {
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_extended(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }
}

// ============================================================================
// Intermediate Representation
// ============================================================================

/// A scalar written inline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// `'value'`
    Str(String),
    /// Written verbatim (import expressions, booleans, guard expressions)
    Raw(String),
}

/// Right-hand side of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Literal(Literal),
    /// `['a', 'b']` on one line
    List(Vec<Literal>),
    /// `{ 'k': v, ... }`, one entry per line
    Object(Vec<(String, Literal)>),
    /// `[ {...}, ... ]`, nested one level deeper
    Blocks(Vec<Block>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: &'static str,
    pub value: FieldValue,
}

/// One `{ ... },` object literal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub fields: Vec<Field>,
}

impl Block {
    fn push(&mut self, key: &'static str, value: FieldValue) {
        self.fields.push(Field { key, value });
    }

    /// Pushes a string-map field unless the map is empty
    fn push_map(&mut self, key: &'static str, map: &StringMap, lit: fn(&str) -> Literal) {
        if map.is_empty() {
            return;
        }
        let entries = map.iter().map(|(k, v)| (k.clone(), lit(v))).collect();
        self.push(key, FieldValue::Object(entries));
    }
}

fn quoted(value: &str) -> Literal {
    Literal::Str(value.to_string())
}

fn lazy_import(component: &str) -> Literal {
    Literal::Raw(format!("() => import('{}')", component))
}

// ============================================================================
// Lowering
// ============================================================================

/// Orders siblings by `order`, ties keep insertion order
///
/// `sort_by_key` is a stable sort, so equal keys (including the default
/// `-1`) stay in the order they were added.
pub fn sort_siblings<'a, I>(nodes: I) -> Vec<&'a RouteNode>
where
    I: IntoIterator<Item = &'a RouteNode>,
{
    let mut sorted: Vec<&RouteNode> = nodes.into_iter().collect();
    sorted.sort_by_key(|node| node.order());
    sorted
}

/// Lowers a node and its subtree into a [`Block`]
///
/// Field order: path, name, component, meta, props, then the extended
/// attributes when enabled, then children. Empty maps and lists are omitted.
pub fn node_block(node: &RouteNode, options: &RenderOptions) -> Block {
    let mut block = Block::default();
    block.push("path", FieldValue::Literal(quoted(node.path())));
    block.push("name", FieldValue::Literal(quoted(node.name())));
    block.push("component", FieldValue::Literal(lazy_import(node.component())));
    block.push_map("meta", node.meta(), quoted);
    block.push_map("props", node.props(), quoted);

    if options.extended {
        push_extended(&mut block, node);
    }

    if node.child_count() > 0 {
        let children = sort_siblings(node.children())
            .into_iter()
            .map(|child| node_block(child, options))
            .collect();
        block.push("children", FieldValue::Blocks(children));
    }

    block
}

fn push_extended(block: &mut Block, node: &RouteNode) {
    let attrs = node.attributes();

    if let Some(target) = attrs.redirect() {
        block.push("redirect", FieldValue::Literal(quoted(target)));
    }
    if !attrs.alias().is_empty() {
        let aliases = attrs.alias().iter().map(|a| quoted(a)).collect();
        block.push("alias", FieldValue::List(aliases));
    }
    block.push_map("components", attrs.components(), lazy_import);
    if let Some(guard) = attrs.before_enter() {
        block.push("beforeEnter", FieldValue::Literal(Literal::Raw(guard.to_string())));
    }
    if let Some(case_sensitive) = attrs.case_sensitive() {
        block.push(
            "caseSensitive",
            FieldValue::Literal(Literal::Raw(case_sensitive.to_string())),
        );
    }
    block.push_map("pathToRegexpOptions", attrs.path_to_regexp_options(), quoted);
}

// ============================================================================
// Emitter
// ============================================================================

struct Emitter {
    out: String,
    unit: String,
}

impl Emitter {
    fn new(options: &RenderOptions) -> Self {
        Self {
            out: String::new(),
            unit: " ".repeat(options.indent),
        }
    }

    fn line(&mut self, level: usize, text: &str) {
        for _ in 0..level {
            self.out.push_str(&self.unit);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn block(&mut self, block: &Block, level: usize) {
        self.line(level, "{");
        for field in &block.fields {
            self.field(field, level + 1);
        }
        self.line(level, "},");
    }

    fn field(&mut self, field: &Field, level: usize) {
        let key = field.key;
        match &field.value {
            FieldValue::Literal(lit) => {
                self.line(level, &format!("{}: {},", key, inline(lit)));
            }
            FieldValue::List(items) => {
                let items: Vec<String> = items.iter().map(inline).collect();
                self.line(level, &format!("{}: [{}],", key, items.join(", ")));
            }
            FieldValue::Object(entries) => {
                self.line(level, &format!("{}: {{", key));
                for (k, v) in entries {
                    self.line(level + 1, &format!("'{}': {},", k, inline(v)));
                }
                self.line(level, "},");
            }
            FieldValue::Blocks(blocks) => {
                self.line(level, &format!("{}: [", key));
                for block in blocks {
                    self.block(block, level + 1);
                }
                self.line(level, "],");
            }
        }
    }
}

fn inline(lit: &Literal) -> String {
    match lit {
        Literal::Str(s) => format!("'{}'", s),
        Literal::Raw(s) => s.clone(),
    }
}

/// Renders a single block at nesting level zero
pub fn render_block(block: &Block, options: &RenderOptions) -> String {
    let mut emitter = Emitter::new(options);
    emitter.block(block, 0);
    emitter.out
}

/// Renders the full module: every block one level inside `export default [ ... ];`
pub fn render_document(blocks: &[Block], options: &RenderOptions) -> String {
    let mut emitter = Emitter::new(options);
    emitter.line(0, DOCUMENT_OPEN);
    for block in blocks {
        emitter.block(block, 1);
    }
    emitter.line(0, DOCUMENT_CLOSE);
    emitter.out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::RouteAttributes;
    use pretty_assertions::assert_eq;

    fn leaf(path: &str, component: &str) -> RouteNode {
        RouteNode::leaf(path, component).unwrap()
    }

    #[test]
    fn test_leaf_block_has_three_fields() {
        let block = node_block(&leaf("/home", "Home"), &RenderOptions::default());
        let keys: Vec<&str> = block.fields.iter().map(|f| f.key).collect();
        assert_eq!(keys, vec!["path", "name", "component"]);
    }

    #[test]
    fn test_render_leaf() {
        let text = render_block(
            &node_block(&leaf("/home", "Home"), &RenderOptions::default()),
            &RenderOptions::default(),
        );
        assert_eq!(
            text,
            "{\n    path: '/home',\n    name: '',\n    component: () => import('Home'),\n},\n"
        );
    }

    #[test]
    fn test_meta_and_props_are_quoted_objects() {
        let attrs = RouteAttributes::new()
            .with_name("user")
            .with_meta("title", "User")
            .with_prop("id", "7");
        let node = RouteNode::new("/user", "User", attrs, -1).unwrap();
        let options = RenderOptions::default().with_indent(2);
        let text = render_block(&node_block(&node, &options), &options);
        assert_eq!(
            text,
            concat!(
                "{\n",
                "  path: '/user',\n",
                "  name: 'user',\n",
                "  component: () => import('User'),\n",
                "  meta: {\n",
                "    'title': 'User',\n",
                "  },\n",
                "  props: {\n",
                "    'id': '7',\n",
                "  },\n",
                "},\n",
            )
        );
    }

    #[test]
    fn test_extended_attributes_only_when_enabled() {
        let attrs = RouteAttributes::new()
            .with_redirect("/home")
            .with_alias("/start")
            .with_alias("/begin")
            .with_component("sidebar", "Side")
            .with_before_enter("requireAuth")
            .with_case_sensitive(true)
            .with_path_to_regexp_option("strict", "true");
        let node = RouteNode::new("/", "Root", attrs, -1).unwrap();

        let plain = node_block(&node, &RenderOptions::default());
        assert_eq!(plain.fields.len(), 3);

        let options = RenderOptions::default().with_extended(true);
        let block = node_block(&node, &options);
        let keys: Vec<&str> = block.fields.iter().map(|f| f.key).collect();
        assert_eq!(
            keys,
            vec![
                "path",
                "name",
                "component",
                "redirect",
                "alias",
                "components",
                "beforeEnter",
                "caseSensitive",
                "pathToRegexpOptions",
            ]
        );

        let text = render_block(&block, &options);
        assert!(text.contains("    alias: ['/start', '/begin'],\n"));
        assert!(text.contains("        'sidebar': () => import('Side'),\n"));
        assert!(text.contains("    beforeEnter: requireAuth,\n"));
        assert!(text.contains("    caseSensitive: true,\n"));
    }

    #[test]
    fn test_sort_siblings_is_stable() {
        let nodes = vec![
            RouteNode::new("a", "A", RouteAttributes::new(), 3).unwrap(),
            leaf("b", "B"),
            RouteNode::new("c", "C", RouteAttributes::new(), 1).unwrap(),
            leaf("d", "D"),
            RouteNode::new("e", "E", RouteAttributes::new(), 1).unwrap(),
        ];
        let order: Vec<&str> = sort_siblings(&nodes).iter().map(|n| n.path()).collect();
        assert_eq!(order, vec!["b", "d", "c", "e", "a"]);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(
            render_document(&[], &RenderOptions::default()),
            "export default [\n];\n"
        );
    }
}
