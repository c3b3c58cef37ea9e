use std::{
    io::Write as _,
    process::{Command, Stdio},
};

use crate::{
    dot::to_dot,
    error::{PulseError, PulseResult},
    model::Diagram,
};

/// Turns a diagram into a base SVG document. Node and edge geometry are entirely the engine's
/// responsibility.
pub trait LayoutEngine {
    fn render_svg(&self, diagram: &Diagram) -> PulseResult<String>;
}

/// Runs the system Graphviz `dot` binary, feeding DOT on stdin and reading SVG from stdout.
#[derive(Clone, Debug)]
pub struct GraphvizLayout {
    pub program: String,
}

impl Default for GraphvizLayout {
    fn default() -> Self {
        Self {
            program: "dot".to_string(),
        }
    }
}

pub fn is_dot_on_path() -> bool {
    GraphvizLayout::default().is_available()
}

impl GraphvizLayout {
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-V")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    pub fn render_dot(&self, dot: &str) -> PulseResult<String> {
        let mut child = Command::new(&self.program)
            .arg("-Tsvg")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                PulseError::layout(format!(
                    "failed to spawn '{}' (is Graphviz installed and on PATH?): {e}",
                    self.program
                ))
            })?;

        {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| PulseError::layout("failed to open dot stdin (unexpected)"))?;
            stdin.write_all(dot.as_bytes()).map_err(|e| {
                PulseError::layout(format!("failed to write graph to dot stdin: {e}"))
            })?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| PulseError::layout(format!("failed to wait for dot to finish: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PulseError::layout(format!(
                "dot exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| PulseError::layout(format!("dot produced non-UTF-8 output: {e}")))
    }
}

impl LayoutEngine for GraphvizLayout {
    #[tracing::instrument(skip_all, fields(diagram = %diagram.name))]
    fn render_svg(&self, diagram: &Diagram) -> PulseResult<String> {
        let dot = to_dot(diagram);
        tracing::debug!(bytes = dot.len(), "running graphviz");
        self.render_dot(&dot)
    }
}
