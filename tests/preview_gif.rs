use std::{fs::File, io::BufReader, path::Path};

use image::{AnimationDecoder as _, codecs::gif::GifDecoder};
use pulseflow::{PreviewOpts, PreviewOutcome, generate_preview_with};

const SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="8">
<rect width="16" height="8" fill="#ffffff"/>
<path d="M1,4 L15,4" stroke="#00cc66" stroke-width="2"/>
</svg>"##;

fn write_svg(dir: &Path) -> std::path::PathBuf {
    let p = dir.join("flow.svg");
    std::fs::write(&p, SVG).unwrap();
    p
}

#[cfg(feature = "preview")]
#[test]
fn two_seconds_at_ten_fps_is_twenty_identical_frames() {
    use pulseflow::{ResvgRasterizer, generate_preview};

    let dir = tempfile::tempdir().unwrap();
    let svg = write_svg(dir.path());
    let opts = PreviewOpts {
        duration_secs: 2,
        fps: 10,
        ..PreviewOpts::default()
    };

    let outcome = generate_preview(&svg, &opts).unwrap();
    let gif_path = outcome.path().unwrap().to_path_buf();
    assert_eq!(gif_path, dir.path().join("flow.gif"));

    let decoder = GifDecoder::new(BufReader::new(File::open(&gif_path).unwrap())).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 20);

    let first = frames[0].buffer();
    assert_eq!(first.dimensions(), (32, 16));
    for f in &frames {
        assert_eq!(f.buffer(), first);
        assert_eq!(f.delay().numer_denom_ms(), (100, 1));
    }

    // Same rasterizer through the explicit entry point.
    let explicit = generate_preview_with(
        Some(&ResvgRasterizer),
        &svg,
        &PreviewOpts {
            output: Some(dir.path().join("out/explicit.gif")),
            duration_secs: 1,
            fps: 2,
            ..PreviewOpts::default()
        },
    )
    .unwrap();
    assert!(explicit.path().unwrap().exists());
}

#[test]
fn missing_rasterizer_returns_unavailable_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let svg = write_svg(dir.path());
    let out = dir.path().join("never.gif");

    let outcome = generate_preview_with(
        None,
        &svg,
        &PreviewOpts {
            output: Some(out.clone()),
            ..PreviewOpts::default()
        },
    )
    .unwrap();

    assert!(matches!(outcome, PreviewOutcome::Unavailable(_)));
    assert!(!out.exists());
    assert!(!dir.path().join("flow.gif").exists());
}
