//! # vue-routes
//!
//! Builds an in-memory tree of named, nested routes and renders it as a
//! Vue Router configuration module:
//!
//! ```text
//! export default [
//!     {
//!         path: '/home',
//!         name: '',
//!         component: () => import('Home'),
//!     },
//! ];
//! ```
//!
//! - [`RouteNode`]: one path entry, validated on construction, owning its children
//! - [`RouteTree`]: owns a synthetic root, exposes the flat add/remove/get API,
//!   and freezes after [`RouteTree::commit`]
//! - [`RouteWriter`]: the sink that receives `(destination, text)` on commit
//! - [`RouteManifest`]: the same tree described in TOML
//!
//! Nothing here matches live requests; the crate only emits configuration.
//!
//! ## Ordering
//!
//! Siblings are rendered by ascending `order`. Routes with equal order
//! (including the default `-1`) keep the order in which they were added.
//!
//! ## Example
//!
//! ```
//! use vue_routes::{MemoryWriter, RouteAttributes, RouteTree};
//!
//! let mut tree = RouteTree::with_writer("src/router/routes.js", MemoryWriter::new());
//! tree.add("/home", "Home").unwrap();
//! tree.add("/products/list", "ProductList").unwrap();
//!
//! let admin = tree.add("/admin", "Admin").unwrap();
//! admin.add_with("crud", "CrudView", RouteAttributes::new(), 5).unwrap();
//! admin.add_with("crud2", "Crud2View", RouteAttributes::new(), 2).unwrap();
//!
//! let text = tree.render();
//! assert!(text.find("'crud2'").unwrap() < text.find("'crud'").unwrap());
//!
//! tree.commit().unwrap();
//! assert!(tree.is_finalized());
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod attributes;
pub mod error;
pub mod manifest;
pub mod node;
pub mod render;
pub mod tree;
pub mod writer;

pub use attributes::{AttributeKey, AttributeValue, RouteAttributes, StringMap};
pub use error::{RouteError, ValidationError};
pub use manifest::{OutputConfig, RouteEntry, RouteManifest, DEFAULT_MANIFEST};
pub use node::{DepthFirst, RouteNode, DEFAULT_ORDER};
pub use render::RenderOptions;
pub use tree::{RouteTree, TreeState};
pub use writer::{Commit, FileWriter, MemoryWriter, RouteWriter};
