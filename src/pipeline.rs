use std::path::PathBuf;

use crate::{
    error::PulseResult,
    html::{HtmlExporter, HtmlOptions},
    layout::{GraphvizLayout, LayoutEngine},
    model::Diagram,
    preview::{PreviewOpts, PreviewOutcome, Rasterizer, default_rasterizer, generate_preview_with},
    render::render_with,
};

#[derive(Clone, Debug, Default)]
pub struct PipelineOpts {
    /// Skip the HTML viewer when false.
    pub html: bool,
    pub html_output: Option<PathBuf>,
    /// Defaults to the diagram name.
    pub title: Option<String>,
    pub preview: Option<PreviewOpts>,
}

impl PipelineOpts {
    pub fn with_html() -> Self {
        Self {
            html: true,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifacts {
    pub svg: PathBuf,
    pub html: Option<PathBuf>,
    pub gif: Option<PathBuf>,
}

/// Diagram → animated SVG → HTML viewer → optional GIF preview.
pub struct Pipeline {
    engine: Box<dyn LayoutEngine>,
    rasterizer: Option<Box<dyn Rasterizer>>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Box::new(GraphvizLayout::default()))
    }
}

impl Pipeline {
    pub fn new(engine: Box<dyn LayoutEngine>) -> Self {
        Self {
            engine,
            rasterizer: default_rasterizer(),
        }
    }

    pub fn with_rasterizer(mut self, rasterizer: Option<Box<dyn Rasterizer>>) -> Self {
        self.rasterizer = rasterizer;
        self
    }

    #[tracing::instrument(skip_all, fields(diagram = %diagram.name))]
    pub fn run(&self, diagram: &Diagram, opts: &PipelineOpts) -> PulseResult<Artifacts> {
        let svg = render_with(diagram, self.engine.as_ref())?;

        let html = if opts.html {
            let title = opts.title.clone().unwrap_or_else(|| diagram.name.clone());
            let exporter = HtmlExporter::new(&svg).with_options(HtmlOptions { title });
            Some(exporter.export(opts.html_output.as_deref())?)
        } else {
            None
        };

        let gif = match &opts.preview {
            Some(preview) => {
                match generate_preview_with(self.rasterizer.as_deref(), &svg, preview)? {
                    PreviewOutcome::Written(p) => Some(p),
                    PreviewOutcome::Unavailable(_) => None,
                }
            }
            None => None,
        };

        Ok(Artifacts { svg, html, gif })
    }
}
