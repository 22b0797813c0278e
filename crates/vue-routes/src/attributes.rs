// File: src/attributes.rs
// Purpose: Allow-listed route attributes (name, meta, props, ...)

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Insertion-ordered string map used for `meta`, `props` and friends
pub type StringMap = IndexMap<String, String>;

/// Meta key that puts a route into the generated navigation
pub const IN_NAVIGATION: &str = "in_navigation";

/// The fixed set of attribute keys a route may carry
///
/// Anything else is rejected when a node is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    Name,
    Meta,
    Props,
    Components,
    Redirect,
    Alias,
    BeforeEnter,
    CaseSensitive,
    PathToRegexpOptions,
}

impl AttributeKey {
    /// Every recognized key, in rendering order
    pub const ALL: [AttributeKey; 9] = [
        AttributeKey::Name,
        AttributeKey::Meta,
        AttributeKey::Props,
        AttributeKey::Redirect,
        AttributeKey::Alias,
        AttributeKey::Components,
        AttributeKey::BeforeEnter,
        AttributeKey::CaseSensitive,
        AttributeKey::PathToRegexpOptions,
    ];

    /// Key as written in the generated JavaScript and in manifests
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKey::Name => "name",
            AttributeKey::Meta => "meta",
            AttributeKey::Props => "props",
            AttributeKey::Components => "components",
            AttributeKey::Redirect => "redirect",
            AttributeKey::Alias => "alias",
            AttributeKey::BeforeEnter => "beforeEnter",
            AttributeKey::CaseSensitive => "caseSensitive",
            AttributeKey::PathToRegexpOptions => "pathToRegexpOptions",
        }
    }

    /// Looks up a key by its exact (case-sensitive) name
    ///
    /// # Examples
    ///
    /// ```
    /// use vue_routes::AttributeKey;
    ///
    /// assert_eq!(AttributeKey::parse("beforeEnter"), Some(AttributeKey::BeforeEnter));
    /// assert_eq!(AttributeKey::parse("title"), None);
    /// ```
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    /// Shape of value this key accepts, for error messages
    pub(crate) fn expected(&self) -> &'static str {
        match self {
            AttributeKey::Name | AttributeKey::Redirect | AttributeKey::BeforeEnter => "a string",
            AttributeKey::Meta
            | AttributeKey::Props
            | AttributeKey::Components
            | AttributeKey::PathToRegexpOptions => "a table of strings",
            AttributeKey::Alias => "a string or a list of strings",
            AttributeKey::CaseSensitive => "a boolean",
        }
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Untyped attribute value, as it arrives from a manifest or a dynamic caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Flag(bool),
    Text(String),
    List(Vec<String>),
    Map(StringMap),
}

impl AttributeValue {
    /// Builds a map value from key/value pairs, keeping their order
    pub fn map<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        AttributeValue::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Flag(value)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(value: Vec<String>) -> Self {
        AttributeValue::List(value)
    }
}

impl From<StringMap> for AttributeValue {
    fn from(value: StringMap) -> Self {
        AttributeValue::Map(value)
    }
}

/// Loose truthiness used for meta flags: empty and `"0"` are false
pub fn is_truthy(value: &str) -> bool {
    !value.is_empty() && value != "0"
}

/// Attributes attached to a route
///
/// Every field corresponds to one [`AttributeKey`]; there is no way to store
/// a key outside the allow-list. Builder methods consume and return `self`.
///
/// # Examples
///
/// ```
/// use vue_routes::RouteAttributes;
///
/// let attrs = RouteAttributes::new()
///     .with_name("products")
///     .with_meta("in_navigation", "1")
///     .with_prop("page", "1");
///
/// assert_eq!(attrs.name(), Some("products"));
/// assert!(attrs.in_navigation());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    meta: StringMap,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    props: StringMap,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    components: StringMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    alias: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    before_enter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    case_sensitive: Option<bool>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    path_to_regexp_options: StringMap,
}

impl RouteAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a meta entry; later entries with the same key replace the value in place
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Adds a named view (`components: { <view>: () => import(<component>) }`)
    pub fn with_component(mut self, view: impl Into<String>, component: impl Into<String>) -> Self {
        self.components.insert(view.into(), component.into());
        self
    }

    pub fn with_redirect(mut self, target: impl Into<String>) -> Self {
        self.redirect = Some(target.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias.push(alias.into());
        self
    }

    /// Sets the navigation guard; the expression is emitted verbatim
    pub fn with_before_enter(mut self, expression: impl Into<String>) -> Self {
        self.before_enter = Some(expression.into());
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = Some(case_sensitive);
        self
    }

    pub fn with_path_to_regexp_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.path_to_regexp_options.insert(key.into(), value.into());
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The route name, `None` when unset or empty
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    pub fn meta(&self) -> &StringMap {
        &self.meta
    }

    pub fn props(&self) -> &StringMap {
        &self.props
    }

    pub fn components(&self) -> &StringMap {
        &self.components
    }

    pub fn redirect(&self) -> Option<&str> {
        self.redirect.as_deref()
    }

    pub fn alias(&self) -> &[String] {
        &self.alias
    }

    pub fn before_enter(&self) -> Option<&str> {
        self.before_enter.as_deref()
    }

    pub fn case_sensitive(&self) -> Option<bool> {
        self.case_sensitive
    }

    pub fn path_to_regexp_options(&self) -> &StringMap {
        &self.path_to_regexp_options
    }

    /// Whether `meta.in_navigation` is set to a truthy value
    pub fn in_navigation(&self) -> bool {
        self.meta
            .get(IN_NAVIGATION)
            .map(|v| is_truthy(v))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrites one attribute from an untyped value
    ///
    /// Returns the expected shape on a type mismatch. The receiver is left
    /// untouched in that case.
    pub(crate) fn set(&mut self, key: AttributeKey, value: AttributeValue) -> Result<(), &'static str> {
        match (key, value) {
            (AttributeKey::Name, AttributeValue::Text(v)) => self.name = Some(v),
            (AttributeKey::Redirect, AttributeValue::Text(v)) => self.redirect = Some(v),
            (AttributeKey::BeforeEnter, AttributeValue::Text(v)) => self.before_enter = Some(v),
            (AttributeKey::CaseSensitive, AttributeValue::Flag(v)) => self.case_sensitive = Some(v),
            (AttributeKey::Alias, AttributeValue::Text(v)) => self.alias = vec![v],
            (AttributeKey::Alias, AttributeValue::List(v)) => self.alias = v,
            (AttributeKey::Meta, AttributeValue::Map(v)) => self.meta = v,
            (AttributeKey::Props, AttributeValue::Map(v)) => self.props = v,
            (AttributeKey::Components, AttributeValue::Map(v)) => self.components = v,
            (AttributeKey::PathToRegexpOptions, AttributeValue::Map(v)) => {
                self.path_to_regexp_options = v
            }
            (key, _) => return Err(key.expected()),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_exact() {
        for key in AttributeKey::ALL {
            assert_eq!(AttributeKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(AttributeKey::parse("Name"), None);
        assert_eq!(AttributeKey::parse("before_enter"), None);
        assert_eq!(AttributeKey::parse(""), None);
    }

    #[test]
    fn test_truthiness() {
        assert!(is_truthy("1"));
        assert!(is_truthy("yes"));
        assert!(is_truthy("false"));
        assert!(!is_truthy(""));
        assert!(!is_truthy("0"));
    }

    #[test]
    fn test_in_navigation() {
        assert!(!RouteAttributes::new().in_navigation());
        assert!(!RouteAttributes::new().with_meta(IN_NAVIGATION, "0").in_navigation());
        assert!(RouteAttributes::new().with_meta(IN_NAVIGATION, "1").in_navigation());
    }

    #[test]
    fn test_meta_keeps_insertion_order() {
        let attrs = RouteAttributes::new()
            .with_meta("zeta", "1")
            .with_meta("alpha", "2")
            .with_meta("mid", "3");
        let keys: Vec<&str> = attrs.meta().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_set_rejects_wrong_shape() {
        let mut attrs = RouteAttributes::new().with_name("keep");
        let err = attrs
            .set(AttributeKey::Name, AttributeValue::Flag(true))
            .unwrap_err();
        assert_eq!(err, "a string");
        assert_eq!(attrs.name(), Some("keep"));

        attrs
            .set(AttributeKey::Alias, AttributeValue::from("/a"))
            .unwrap();
        assert_eq!(attrs.alias(), ["/a".to_string()]);
    }

    #[test]
    fn test_empty_name_reads_as_unset() {
        let attrs = RouteAttributes::new().with_name("");
        assert_eq!(attrs.name(), None);
        assert!(!attrs.is_empty());
        assert!(RouteAttributes::new().is_empty());
    }
}
