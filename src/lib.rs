//! g2vis - Render node-link JSON graphs as SVG, HTML charts or Graphviz DOT
//!
//! This library loads typed-attribute graphs from node-link JSON documents,
//! groups nodes and edges by a categorical type attribute, assigns palette
//! colors per type, computes a layout and renders the result with one of
//! three backends.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use g2vis::{pipeline, Backend, VisConfig};
//!
//! let config = VisConfig::new().with_seed(42);
//! pipeline::run(
//!     Path::new("graph.json"),
//!     Path::new("out/graph.svg"),
//!     Backend::Svg,
//!     &config,
//! )
//! .unwrap();
//! ```
//!
//! # Backends
//!
//! - SVG: static figure with per-type node/edge colors, labels and a legend
//! - HTML: standalone interactive scatter chart with hover text
//! - DOT: Graphviz source, with `::`-delimited attribute values quoted

pub mod color;
pub mod config;
pub mod error;
pub mod group;
pub mod label;
pub mod layout;
pub mod pipeline;
pub mod render;
pub mod sanitize;
pub mod store;
pub mod types;

pub use color::{combine_hex_values, Palette, PaletteKind};
pub use config::VisConfig;
pub use error::{Result, VisError};
pub use group::TypeGroups;
pub use layout::LayoutKind;
pub use render::Backend;
pub use types::{AttrMap, AttrValue, Edge, EdgeId, Graph, Node, NodeId};
