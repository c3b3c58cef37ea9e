//! Pipeline diagrams with pulsating animated edges.
//!
//! A [`Diagram`] is laid out by Graphviz into SVG, the SVG gets a constant animation stylesheet,
//! and the result can be wrapped in an interactive HTML viewer or flattened into a static GIF.
//!
//! - [`edge`]: per-edge animation classes and attributes
//! - [`render`]: layout + stylesheet injection
//! - [`html`]: the viewer page
//! - [`preview`]: the GIF flip-book
#![forbid(unsafe_code)]

pub mod controls;
pub mod dot;
pub mod dsl;
pub mod edge;
pub mod error;
pub mod html;
pub mod layout;
pub mod model;
pub mod palette;
pub mod pipeline;
pub mod preview;
pub mod render;
pub mod stylesheet;

pub use controls::ControlState;
pub use dsl::{ClusterBuilder, DiagramBuilder};
pub use edge::{EdgeDecoration, PulsatingEdge};
pub use error::{PulseError, PulseResult};
pub use html::{HtmlExporter, HtmlOptions};
pub use layout::{GraphvizLayout, LayoutEngine, is_dot_on_path};
pub use model::{Cluster, Diagram, Direction, Edge, Node};
pub use palette::{PulseColor, SpeedPreset, Theme};
pub use pipeline::{Artifacts, Pipeline, PipelineOpts};
#[cfg(feature = "preview")]
pub use preview::ResvgRasterizer;
pub use preview::{
    PreviewOpts, PreviewOutcome, RasterFrame, Rasterizer, default_rasterizer, generate_preview,
    generate_preview_with,
};
pub use render::{annotate_svg_file, render, render_with};
pub use stylesheet::{ANIMATION_STYLE_BLOCK, inject_animation_styles};
