//! Force-directed graph visualization component.
//!
//! Renders the impact graph on an HTML canvas with:
//! - Physics-based node positioning that cools down until the layout settles
//! - Node dragging (pinned while held), panning and zooming
//! - Type-coloured nodes, directed edges and relationship labels
//! - A hover tooltip naming the node's type and name
//!
//! # Example
//!
//! ```ignore
//! use impact_graph::{ForceGraphCanvas, GraphData};
//!
//! let scene = Signal::derive(move || GraphData::from_snapshot(&snapshot.get(), &colors));
//! view! { <ForceGraphCanvas data=scene min_height=400.0 /> }
//! ```

mod component;
mod render;
pub mod scale;
mod state;
pub mod theme;
mod types;

pub use component::ForceGraphCanvas;
pub use theme::Theme;
pub use types::{GraphData, GraphLink, GraphNode};
