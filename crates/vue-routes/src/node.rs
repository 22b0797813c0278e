//! A single route entry and its subtree
//!
//! A [`RouteNode`] owns its children outright; there is no link back to the
//! parent. Errors about a missing or duplicate child are reported with the
//! parent's own path.

use crate::attributes::{AttributeKey, AttributeValue, RouteAttributes, StringMap};
use crate::error::{Result, RouteError, ValidationError};
use crate::render::{self, RenderOptions};
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Order value meaning "no explicit order, keep insertion order"
pub const DEFAULT_ORDER: i32 = -1;

/// Path reported by the synthetic root of a [`RouteTree`](crate::RouteTree)
pub(crate) const ROOT_PATH: &str = "/";

/// One route: a path bound to a component, with optional attributes and children
///
/// # Examples
///
/// ```
/// use vue_routes::{RouteAttributes, RouteNode};
///
/// let mut admin = RouteNode::leaf("/admin", "Admin").unwrap();
/// admin.add_with("crud", "CrudView", RouteAttributes::new(), 5).unwrap();
/// admin.add_with("crud2", "Crud2View", RouteAttributes::new(), 2).unwrap();
///
/// assert!(admin.exists("crud"));
/// assert_eq!(admin.get("crud2").unwrap().order(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteNode {
    path: String,
    component: String,
    order: i32,
    #[serde(skip_serializing_if = "RouteAttributes::is_empty")]
    attributes: RouteAttributes,
    #[serde(
        skip_serializing_if = "IndexMap::is_empty",
        serialize_with = "serialize_children"
    )]
    children: IndexMap<String, RouteNode>,
}

fn serialize_children<S>(children: &IndexMap<String, RouteNode>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(children.values())
}

impl RouteNode {
    /// Creates a validated node
    ///
    /// Fails with [`ValidationError`] when the path or component is empty, or
    /// when `meta.in_navigation` is truthy but no name is given.
    pub fn new(
        path: impl Into<String>,
        component: impl Into<String>,
        attributes: RouteAttributes,
        order: i32,
    ) -> Result<Self> {
        let node = Self {
            path: path.into(),
            component: component.into(),
            order,
            attributes,
            children: IndexMap::new(),
        };
        node.validate()?;
        Ok(node)
    }

    /// Creates a node with no attributes and the default order
    pub fn leaf(path: impl Into<String>, component: impl Into<String>) -> Result<Self> {
        Self::new(path, component, RouteAttributes::new(), DEFAULT_ORDER)
    }

    /// Creates a node from untyped attribute pairs
    ///
    /// Keys must be in the allow-list (see [`AttributeKey`]); anything else is
    /// a [`ValidationError::UnknownAttribute`].
    ///
    /// # Examples
    ///
    /// ```
    /// use vue_routes::{AttributeValue, RouteNode};
    ///
    /// let node = RouteNode::from_pairs(
    ///     "/about",
    ///     "About",
    ///     [("name", AttributeValue::from("about"))],
    ///     -1,
    /// )
    /// .unwrap();
    /// assert_eq!(node.name(), "about");
    ///
    /// let err = RouteNode::from_pairs("/about", "About", [("title", "x".into())], -1);
    /// assert!(err.is_err());
    /// ```
    pub fn from_pairs<I, K>(
        path: impl Into<String>,
        component: impl Into<String>,
        pairs: I,
        order: i32,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, AttributeValue)>,
        K: AsRef<str>,
    {
        let path = path.into();
        if path.is_empty() {
            return Err(ValidationError::EmptyPath.into());
        }

        let mut attributes = RouteAttributes::new();
        for (key, value) in pairs {
            apply_attribute(&mut attributes, &path, key.as_ref(), value)?;
        }

        Self::new(path, component, attributes, order)
    }

    /// The synthetic root owned by a tree; never rendered itself
    pub(crate) fn root() -> Self {
        Self {
            path: ROOT_PATH.to_string(),
            component: "root".to_string(),
            order: DEFAULT_ORDER,
            attributes: RouteAttributes::new(),
            children: IndexMap::new(),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.path.is_empty() {
            return Err(ValidationError::EmptyPath);
        }
        if self.component.is_empty() {
            return Err(ValidationError::EmptyComponent {
                path: self.path.clone(),
            });
        }
        check_navigation(&self.path, &self.attributes)
    }

    // ========================================================================
    // Children
    // ========================================================================

    /// Adds a child with no attributes and the default order
    pub fn add(
        &mut self,
        path: impl Into<String>,
        component: impl Into<String>,
    ) -> Result<&mut RouteNode> {
        self.insert(Self::leaf(path, component)?)
    }

    /// Adds a child with attributes and an explicit order
    pub fn add_with(
        &mut self,
        path: impl Into<String>,
        component: impl Into<String>,
        attributes: RouteAttributes,
        order: i32,
    ) -> Result<&mut RouteNode> {
        self.insert(Self::new(path, component, attributes, order)?)
    }

    /// Inserts an already built node as the last child
    ///
    /// Fails with [`RouteError::DuplicatePath`] if a sibling already uses the
    /// same path; the children are not touched in that case.
    pub fn insert(&mut self, node: RouteNode) -> Result<&mut RouteNode> {
        match self.children.entry(node.path.clone()) {
            Entry::Occupied(entry) => Err(RouteError::DuplicatePath {
                parent: self.path.clone(),
                path: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                tracing::debug!(parent = %self.path, path = %node.path, order = node.order, "route added");
                Ok(entry.insert(node))
            }
        }
    }

    /// Removes a child and returns it; remaining children keep their order
    pub fn remove(&mut self, path: &str) -> Result<RouteNode> {
        match self.children.shift_remove(path) {
            Some(node) => {
                tracing::debug!(parent = %self.path, path, "route removed");
                Ok(node)
            }
            None => Err(self.not_found(path)),
        }
    }

    pub fn exists(&self, path: &str) -> bool {
        self.children.contains_key(path)
    }

    pub fn get(&self, path: &str) -> Result<&RouteNode> {
        self.children.get(path).ok_or_else(|| self.not_found(path))
    }

    pub fn get_mut(&mut self, path: &str) -> Result<&mut RouteNode> {
        let Self {
            path: parent,
            children,
            ..
        } = self;
        children.get_mut(path).ok_or_else(|| RouteError::NotFound {
            parent: parent.clone(),
            path: path.to_string(),
        })
    }

    fn not_found(&self, path: &str) -> RouteError {
        RouteError::NotFound {
            parent: self.path.clone(),
            path: path.to_string(),
        }
    }

    /// Direct children in insertion order (not sorted by `order`)
    pub fn children(&self) -> impl ExactSizeIterator<Item = &RouteNode> + '_ {
        self.children.values()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Number of descendants, not counting this node
    pub fn len(&self) -> usize {
        self.children.values().map(|child| 1 + child.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order walk over all descendants, paired with their depth
    ///
    /// Direct children are at depth 0. Siblings are visited in insertion order.
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            stack: self.children.values().rev().map(|child| (0, child)).collect(),
        }
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    /// Overwrites one allow-listed attribute
    ///
    /// The navigation-requires-name rule is checked against the result; on
    /// any failure the node keeps its previous attributes.
    pub fn set_attribute(&mut self, key: &str, value: impl Into<AttributeValue>) -> Result<()> {
        let mut updated = self.attributes.clone();
        apply_attribute(&mut updated, &self.path, key, value.into())?;
        check_navigation(&self.path, &updated)?;

        tracing::debug!(path = %self.path, key, "route attribute set");
        self.attributes = updated;
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn order(&self) -> i32 {
        self.order
    }

    /// The route name, empty when unset
    pub fn name(&self) -> &str {
        self.attributes.name().unwrap_or("")
    }

    pub fn meta(&self) -> &StringMap {
        self.attributes.meta()
    }

    pub fn props(&self) -> &StringMap {
        self.attributes.props()
    }

    pub fn attributes(&self) -> &RouteAttributes {
        &self.attributes
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Renders this node and its subtree with default options
    pub fn render(&self) -> String {
        self.render_with(&RenderOptions::default())
    }

    pub fn render_with(&self, options: &RenderOptions) -> String {
        render::render_block(&render::node_block(self, options), options)
    }
}

impl fmt::Display for RouteNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn apply_attribute(
    attributes: &mut RouteAttributes,
    path: &str,
    key: &str,
    value: AttributeValue,
) -> Result<(), ValidationError> {
    let parsed = AttributeKey::parse(key).ok_or_else(|| ValidationError::UnknownAttribute {
        path: path.to_string(),
        key: key.to_string(),
    })?;

    attributes
        .set(parsed, value)
        .map_err(|expected| ValidationError::InvalidAttributeValue {
            path: path.to_string(),
            key: key.to_string(),
            expected,
        })
}

fn check_navigation(path: &str, attributes: &RouteAttributes) -> Result<(), ValidationError> {
    if attributes.in_navigation() && attributes.name().is_none() {
        return Err(ValidationError::NavigationWithoutName {
            path: path.to_string(),
        });
    }
    Ok(())
}

/// Iterator returned by [`RouteNode::depth_first`]
pub struct DepthFirst<'a> {
    stack: Vec<(usize, &'a RouteNode)>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = (usize, &'a RouteNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.values().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RouteNode {
        let mut root = RouteNode::root();
        root.add("/home", "Home").unwrap();
        let admin = root.add("/admin", "Admin").unwrap();
        admin.add("users", "Users").unwrap();
        admin.add("roles", "Roles").unwrap().add("edit", "RoleEdit").unwrap();
        root
    }

    #[test]
    fn test_insert_returns_child() {
        let mut root = RouteNode::root();
        let child = root.add("/home", "Home").unwrap();
        assert_eq!(child.path(), "/home");
        assert_eq!(child.component(), "Home");
        assert_eq!(child.order(), DEFAULT_ORDER);
    }

    #[test]
    fn test_get_mut_allows_nested_add() {
        let mut root = sample();
        root.get_mut("/admin").unwrap().add("audit", "Audit").unwrap();
        assert!(root.get("/admin").unwrap().exists("audit"));
        assert!(matches!(
            root.get_mut("/missing"),
            Err(RouteError::NotFound { .. })
        ));
    }

    #[test]
    fn test_remove_keeps_sibling_order() {
        let mut root = RouteNode::root();
        for path in ["a", "b", "c", "d"] {
            root.add(path, "X").unwrap();
        }
        let removed = root.remove("b").unwrap();
        assert_eq!(removed.path(), "b");
        let paths: Vec<&str> = root.children().map(|c| c.path()).collect();
        assert_eq!(paths, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_len_counts_descendants() {
        let root = sample();
        assert_eq!(root.child_count(), 2);
        assert_eq!(root.len(), 5);
        assert!(RouteNode::root().is_empty());
    }

    #[test]
    fn test_depth_first_walk() {
        let root = sample();
        let walk: Vec<(usize, &str)> = root.depth_first().map(|(d, n)| (d, n.path())).collect();
        assert_eq!(
            walk,
            vec![
                (0, "/home"),
                (0, "/admin"),
                (1, "users"),
                (1, "roles"),
                (2, "edit"),
            ]
        );
    }

    #[test]
    fn test_set_attribute_rolls_back_on_failure() {
        let mut node = RouteNode::leaf("/docs", "Docs").unwrap();
        let err = node
            .set_attribute("meta", AttributeValue::map([("in_navigation", "1")]))
            .unwrap_err();
        assert!(matches!(
            err,
            RouteError::Validation(ValidationError::NavigationWithoutName { .. })
        ));
        assert!(node.meta().is_empty());

        node.set_attribute("name", "docs").unwrap();
        node.set_attribute("meta", AttributeValue::map([("in_navigation", "1")]))
            .unwrap();
        assert_eq!(node.name(), "docs");
        assert_eq!(node.meta().get("in_navigation").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_set_attribute_rejects_unknown_key() {
        let mut node = RouteNode::leaf("/docs", "Docs").unwrap();
        let err = node.set_attribute("path", "/other").unwrap_err();
        assert!(matches!(
            err,
            RouteError::Validation(ValidationError::UnknownAttribute { ref key, .. }) if key == "path"
        ));
        assert_eq!(node.path(), "/docs");
    }

    #[test]
    fn test_display_matches_render() {
        let node = RouteNode::leaf("/home", "Home").unwrap();
        assert_eq!(node.to_string(), node.render());
    }
}
