//! Route tree facade: flat API over a synthetic root, finalize barrier, commit
//!
//! # Lifecycle
//! ```text
//! RouteTree::new(destination)        state = Open
//!     → add / remove / get_mut ...   (mutations allowed)
//!     → render()                     (pure, any number of times)
//!     → commit()                     state = Finalized, render, writer.write
//!     → add / remove / get_mut       AlreadyFinalized
//!     → render() / commit()          still allowed
//! ```

use crate::attributes::{AttributeValue, RouteAttributes};
use crate::error::{Result, RouteError};
use crate::node::RouteNode;
use crate::render::{self, RenderOptions};
use crate::writer::{FileWriter, RouteWriter};
use std::fmt;

/// Open/Finalized state of a [`RouteTree`]; the transition is one-way
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeState {
    Open,
    Finalized,
}

/// A route tree bound to a destination and a writer
///
/// # Examples
///
/// ```
/// use vue_routes::{MemoryWriter, RouteAttributes, RouteTree};
///
/// let mut tree = RouteTree::with_writer("router.js", MemoryWriter::new());
/// tree.add("/home", "Home").unwrap();
/// tree.add("/admin", "Admin")
///     .unwrap()
///     .add_with("crud", "CrudView", RouteAttributes::new(), 5)
///     .unwrap();
///
/// let text = tree.render();
/// assert!(text.starts_with("export default ["));
///
/// tree.commit().unwrap();
/// assert!(tree.add("/late", "Late").is_err());
/// assert_eq!(tree.writer().last().unwrap().text, text);
/// ```
#[derive(Debug)]
pub struct RouteTree<W = FileWriter> {
    root: RouteNode,
    destination: String,
    state: TreeState,
    options: RenderOptions,
    writer: W,
}

impl RouteTree<FileWriter> {
    /// Creates an empty tree that commits to a file at `destination`
    pub fn new(destination: impl Into<String>) -> Self {
        Self::with_writer(destination, FileWriter)
    }
}

impl<W: RouteWriter> RouteTree<W> {
    /// Creates an empty tree that commits through `writer`
    pub fn with_writer(destination: impl Into<String>, writer: W) -> Self {
        Self {
            root: RouteNode::root(),
            destination: destination.into(),
            state: TreeState::Open,
            options: RenderOptions::default(),
            writer,
        }
    }

    /// Replaces the render options (functional builder)
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    fn ensure_open(&self) -> Result<()> {
        match self.state {
            TreeState::Open => Ok(()),
            TreeState::Finalized => Err(RouteError::AlreadyFinalized {
                destination: self.destination.clone(),
            }),
        }
    }

    // ========================================================================
    // Mutation (Open only)
    // ========================================================================

    /// Adds a top-level route and returns it for nested adds
    pub fn add(
        &mut self,
        path: impl Into<String>,
        component: impl Into<String>,
    ) -> Result<&mut RouteNode> {
        self.ensure_open()?;
        self.root.add(path, component)
    }

    pub fn add_with(
        &mut self,
        path: impl Into<String>,
        component: impl Into<String>,
        attributes: RouteAttributes,
        order: i32,
    ) -> Result<&mut RouteNode> {
        self.ensure_open()?;
        self.root.add_with(path, component, attributes, order)
    }

    /// Inserts a prebuilt node (and its subtree) at the top level
    pub fn insert(&mut self, node: RouteNode) -> Result<&mut RouteNode> {
        self.ensure_open()?;
        self.root.insert(node)
    }

    pub fn remove(&mut self, path: &str) -> Result<RouteNode> {
        self.ensure_open()?;
        self.root.remove(path)
    }

    /// Mutable access to a top-level route; refused once finalized
    pub fn get_mut(&mut self, path: &str) -> Result<&mut RouteNode> {
        self.ensure_open()?;
        self.root.get_mut(path)
    }

    /// Overwrites one allow-listed attribute of a top-level route
    pub fn set_attribute(
        &mut self,
        path: &str,
        key: &str,
        value: impl Into<AttributeValue>,
    ) -> Result<()> {
        self.ensure_open()?;
        self.root.get_mut(path)?.set_attribute(key, value)
    }

    // ========================================================================
    // Reads (any state)
    // ========================================================================

    pub fn exists(&self, path: &str) -> bool {
        self.root.exists(path)
    }

    pub fn get(&self, path: &str) -> Result<&RouteNode> {
        self.root.get(path)
    }

    /// Top-level routes in insertion order
    pub fn routes(&self) -> impl ExactSizeIterator<Item = &RouteNode> + '_ {
        self.root.children()
    }

    /// Total number of routes at every depth
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn state(&self) -> TreeState {
        self.state
    }

    pub fn is_finalized(&self) -> bool {
        self.state == TreeState::Finalized
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    // ========================================================================
    // Render / Commit
    // ========================================================================

    /// Renders the whole module; pure with respect to tree state
    pub fn render(&self) -> String {
        let blocks: Vec<_> = render::sort_siblings(self.root.children())
            .into_iter()
            .map(|node| render::node_block(node, &self.options))
            .collect();
        render::render_document(&blocks, &self.options)
    }

    /// Finalizes the tree and hands the rendered module to the writer
    ///
    /// Repeatable: later calls render the (now frozen) tree again and write
    /// it again. Writer failures propagate as [`RouteError::Write`]; the tree
    /// stays finalized either way.
    pub fn commit(&mut self) -> Result<()> {
        if self.is_finalized() {
            tracing::warn!(destination = %self.destination, "routes already committed, writing again");
        }
        self.state = TreeState::Finalized;

        let text = self.render();
        self.writer
            .write(&self.destination, &text)
            .map_err(|source| RouteError::Write {
                destination: self.destination.clone(),
                source,
            })?;

        tracing::info!(
            destination = %self.destination,
            writer = self.writer.name(),
            routes = self.len(),
            bytes = text.len(),
            "routes committed"
        );
        Ok(())
    }
}

impl<W: RouteWriter> fmt::Display for RouteTree<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
