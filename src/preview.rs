//! Static GIF preview of a rendered diagram.
//!
//! CSS keyframes cannot be captured by rasterizing once, so the GIF is a flip-book of identical
//! frames. Browsers should get the SVG or the HTML viewer instead.

use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use image::{
    Delay, Frame, ImageFormat, RgbaImage,
    codecs::gif::{GifEncoder, Repeat},
};

use crate::error::{PulseError, PulseResult, ensure_parent_dir};

#[cfg(feature = "preview")]
const MAX_DIM: u32 = 16_384;
const GIF_SPEED: i32 = 10;

/// Straight (non-premultiplied) RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterFrame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub trait Rasterizer {
    fn rasterize(&self, svg: &[u8], scale: f32) -> PulseResult<RasterFrame>;
}

/// Rasterizes with `resvg`, using system fonts for labels.
#[cfg(feature = "preview")]
#[derive(Clone, Copy, Debug, Default)]
pub struct ResvgRasterizer;

#[cfg(feature = "preview")]
impl Rasterizer for ResvgRasterizer {
    fn rasterize(&self, svg: &[u8], scale: f32) -> PulseResult<RasterFrame> {
        let mut opts = usvg::Options::default();
        opts.fontdb_mut().load_system_fonts();
        let tree = usvg::Tree::from_data(svg, &opts)
            .map_err(|e| PulseError::raster(format!("parse svg tree: {e}")))?;

        let size = tree.size();
        let to_px = |v: f32| -> PulseResult<u32> {
            let px = (v * scale).ceil();
            if !px.is_finite() || px <= 0.0 {
                return Err(PulseError::raster("svg has invalid width/height"));
            }
            Ok((px as u32).max(1))
        };
        let width = to_px(size.width())?;
        let height = to_px(size.height())?;
        if width > MAX_DIM || height > MAX_DIM {
            return Err(PulseError::raster(format!(
                "svg raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
            )));
        }

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| PulseError::raster("failed to allocate svg pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for px in pixmap.pixels() {
            let c = px.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Ok(RasterFrame {
            width,
            height,
            rgba,
        })
    }
}

/// The rasterizer compiled into this build, if any.
pub fn default_rasterizer() -> Option<Box<dyn Rasterizer>> {
    #[cfg(feature = "preview")]
    {
        Some(Box::new(ResvgRasterizer))
    }
    #[cfg(not(feature = "preview"))]
    {
        None
    }
}

#[derive(Clone, Debug)]
pub struct PreviewOpts {
    /// Defaults to the SVG path with a `.gif` extension.
    pub output: Option<PathBuf>,
    pub duration_secs: u32,
    pub fps: u32,
    pub scale: f32,
    /// Parent of the scratch directory. Defaults to the system temp dir.
    pub scratch_root: Option<PathBuf>,
}

impl Default for PreviewOpts {
    fn default() -> Self {
        Self {
            output: None,
            duration_secs: 10,
            fps: 15,
            scale: 2.0,
            scratch_root: None,
        }
    }
}

impl PreviewOpts {
    pub fn validate(&self) -> PulseResult<()> {
        if self.fps == 0 {
            return Err(PulseError::validation("preview fps must be non-zero"));
        }
        if self.duration_secs == 0 {
            return Err(PulseError::validation("preview duration must be non-zero"));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(PulseError::validation("preview scale must be positive"));
        }
        Ok(())
    }

    pub fn frame_count(&self) -> u32 {
        self.duration_secs.saturating_mul(self.fps)
    }

    fn scratch_dir(&self) -> PulseResult<tempfile::TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("pulseflow-preview");
        match &self.scratch_root {
            Some(root) => builder
                .tempdir_in(root)
                .map_err(|e| PulseError::io(root, e)),
            None => builder
                .tempdir()
                .map_err(|e| PulseError::io(std::env::temp_dir(), e)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreviewOutcome {
    Written(PathBuf),
    /// Rasterization is not available in this build; nothing was written.
    Unavailable(String),
}

impl PreviewOutcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            PreviewOutcome::Written(p) => Some(p),
            PreviewOutcome::Unavailable(_) => None,
        }
    }
}

pub fn generate_preview(svg_path: &Path, opts: &PreviewOpts) -> PulseResult<PreviewOutcome> {
    let rasterizer = default_rasterizer();
    generate_preview_with(rasterizer.as_deref(), svg_path, opts)
}

#[tracing::instrument(skip(rasterizer, opts), fields(svg = %svg_path.display()))]
pub fn generate_preview_with(
    rasterizer: Option<&dyn Rasterizer>,
    svg_path: &Path,
    opts: &PreviewOpts,
) -> PulseResult<PreviewOutcome> {
    let Some(rasterizer) = rasterizer else {
        let reason = "svg rasterization is not available (build with the `preview` feature)";
        tracing::warn!("{reason}; skipping gif preview");
        return Ok(PreviewOutcome::Unavailable(reason.to_string()));
    };
    opts.validate()?;

    let output = opts
        .output
        .clone()
        .unwrap_or_else(|| svg_path.with_extension("gif"));

    let svg = std::fs::read(svg_path).map_err(|e| PulseError::io(svg_path, e))?;

    // Dropping the guard removes the directory on every exit path.
    let scratch = opts.scratch_dir()?;

    let frame = rasterizer.rasterize(&svg, opts.scale)?;
    let png_path = scratch.path().join("base.png");
    image::save_buffer_with_format(
        &png_path,
        &frame.rgba,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", png_path.display()))?;

    let base = image::open(&png_path)
        .with_context(|| format!("read png '{}'", png_path.display()))?
        .to_rgba8();

    let staged = scratch.path().join("preview.gif");
    write_flipbook_gif(&staged, &base, opts.frame_count(), opts.fps)?;

    ensure_parent_dir(&output)?;
    std::fs::copy(&staged, &output).map_err(|e| PulseError::io(&output, e))?;

    tracing::info!(
        path = %output.display(),
        frames = opts.frame_count(),
        "wrote gif preview (static: CSS animation needs a browser, open the svg or html instead)"
    );
    Ok(PreviewOutcome::Written(output))
}

fn write_flipbook_gif(path: &Path, base: &RgbaImage, frames: u32, fps: u32) -> PulseResult<()> {
    let file = File::create(path).map_err(|e| PulseError::io(path, e))?;
    let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), GIF_SPEED);
    encoder
        .set_repeat(Repeat::Infinite)
        .context("set gif repeat")?;

    let delay = Delay::from_numer_denom_ms(1000, fps);
    for _ in 0..frames {
        encoder
            .encode_frame(Frame::from_parts(base.clone(), 0, 0, delay))
            .with_context(|| format!("encode gif frame into '{}'", path.display()))?;
    }
    Ok(())
}
