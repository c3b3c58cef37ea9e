use std::path::{Path, PathBuf};

use crate::{
    error::{PulseResult, ensure_parent_dir, read_text, write_text},
    layout::{GraphvizLayout, LayoutEngine},
    model::Diagram,
    stylesheet::inject_animation_styles,
};

/// Lay out `diagram` with Graphviz and write the animated SVG to its output path.
pub fn render(diagram: &Diagram) -> PulseResult<PathBuf> {
    render_with(diagram, &GraphvizLayout::default())
}

#[tracing::instrument(skip_all, fields(diagram = %diagram.name))]
pub fn render_with(diagram: &Diagram, engine: &dyn LayoutEngine) -> PulseResult<PathBuf> {
    diagram.validate()?;

    let path = diagram.output_path();
    let base_svg = engine.render_svg(diagram)?;

    ensure_parent_dir(&path)?;
    write_text(&path, &base_svg)?;
    tracing::debug!(path = %path.display(), "wrote base svg");

    annotate_svg_file(&path)?;
    Ok(path)
}

/// Rewrite an existing SVG file in place with the animation stylesheet. Returns whether the style
/// block was inserted.
pub fn annotate_svg_file(path: &Path) -> PulseResult<bool> {
    let svg = read_text(path)?;
    let injected = inject_animation_styles(&svg);
    write_text(path, &injected.svg)?;
    tracing::info!(
        path = %path.display(),
        styled = injected.inserted,
        "annotated svg"
    );
    Ok(injected.inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dsl::DiagramBuilder, edge::PulsatingEdge, error::PulseError,
        stylesheet::ANIMATION_STYLE_BLOCK,
    };

    struct FixedSvg(&'static str);

    impl LayoutEngine for FixedSvg {
        fn render_svg(&self, _diagram: &Diagram) -> PulseResult<String> {
            Ok(self.0.to_string())
        }
    }

    fn diagram_at(path: &Path) -> Diagram {
        DiagramBuilder::new("Render Test")
            .filename(path)
            .node("a", "A")
            .node("b", "B")
            .edge("a", "b", PulsatingEdge::default())
            .build()
            .unwrap()
    }

    #[test]
    fn render_writes_annotated_svg_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let d = diagram_at(&dir.path().join("nested/out"));
        let base = "<svg width=\"10\"><g/></svg>";

        let path = render_with(&d, &FixedSvg(base)).unwrap();
        assert_eq!(path, dir.path().join("nested/out.svg"));

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, format!("<svg width=\"10\">{ANIMATION_STYLE_BLOCK}<g/></svg>"));
    }

    #[test]
    fn markerless_output_is_written_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let d = diagram_at(&dir.path().join("empty.svg"));
        let path = render_with(&d, &FixedSvg("")).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "");
    }

    #[test]
    fn annotate_missing_file_is_io_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = annotate_svg_file(&dir.path().join("missing.svg")).unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    }

    #[test]
    fn invalid_diagram_is_rejected_before_layout() {
        struct Unreachable;
        impl LayoutEngine for Unreachable {
            fn render_svg(&self, _diagram: &Diagram) -> PulseResult<String> {
                panic!("layout must not run for an invalid diagram");
            }
        }

        let mut d = Diagram::new("Bad");
        d.edges
            .push(crate::model::Edge::new("x", "y", PulsatingEdge::default()));
        let err = render_with(&d, &Unreachable).unwrap_err();
        assert!(matches!(err, PulseError::Validation(_)));
    }
}
