//! Self-contained HTML viewer around an animated SVG.
//!
//! The page carries its own CSS and script and fetches nothing. Buttons toggle classes on the
//! `#diagram` container; see [`ControlState`] for the class-list semantics.

use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
};

use crate::{
    controls::{ControlState, PAUSED_CLASS},
    error::{PulseResult, ensure_parent_dir, read_text, write_text},
    palette::{PulseColor, SpeedPreset, Theme},
};

pub const DEFAULT_TITLE: &str = "Animated Data Pipeline";
pub const CONTAINER_ID: &str = "diagram";

const PAGE_CHROME_CSS: &str = r#"
        body {
            font-family: Arial, sans-serif;
            margin: 20px;
            background-color: #f5f5f5;
        }

        h1 {
            color: #333;
            margin-bottom: 20px;
        }

        .controls {
            margin-bottom: 20px;
            padding: 15px;
            background-color: #fff;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }

        .diagram-container {
            border: 1px solid #ddd;
            padding: 20px;
            border-radius: 8px;
            background-color: white;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
            overflow: auto;
        }

        button {
            padding: 8px 15px;
            margin-right: 10px;
            cursor: pointer;
            background-color: #4a86e8;
            color: white;
            border: none;
            border-radius: 4px;
            font-weight: bold;
        }

        button:hover {
            background-color: #3a76d8;
        }
"#;

#[derive(Clone, Debug)]
pub struct HtmlOptions {
    pub title: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn speed_css(out: &mut String) {
    out.push_str("\n        /* Animation speeds */\n");
    for speed in SpeedPreset::ALL {
        let m = speed.multiplier();
        let duration = if m == 1.0 {
            "var(--pulse-speed, 3s)".to_string()
        } else {
            format!("calc(var(--pulse-speed, 3s) * {m})")
        };
        let _ = writeln!(
            out,
            "        .{} .pulsating-arrow, .{} .pulsating-arrow path {{ animation-duration: {duration}; }}",
            speed.css_class(),
            speed.css_class()
        );
    }
    let _ = writeln!(
        out,
        "        .{PAUSED_CLASS} .pulsating-arrow, .{PAUSED_CLASS} .pulsating-arrow path {{ animation-play-state: paused; }}"
    );
}

fn theme_css(out: &mut String) {
    out.push_str("\n        /* Color themes */\n");
    for theme in Theme::ALL {
        for color in PulseColor::ALL {
            let _ = writeln!(
                out,
                "        .{t} .{c}, .{t} .{c} path {{ stroke: {hex}; }}",
                t = theme.css_class(),
                c = color.css_class(),
                hex = color.themed_hex(theme)
            );
        }
        out.push('\n');
    }
}

fn controls_markup(out: &mut String) {
    out.push_str("    <div class=\"controls\">\n");
    out.push_str("        <h3>Animation Controls</h3>\n");
    out.push_str("        <button id=\"pause-btn\">Pause</button>\n");
    out.push_str("        <button id=\"play-btn\">Play</button>\n");
    for speed in SpeedPreset::ALL {
        let _ = writeln!(
            out,
            "        <button id=\"{}\">{}</button>",
            speed.css_class(),
            speed.label()
        );
    }
    out.push_str("\n        <h3>Color Themes</h3>\n");
    for theme in Theme::ALL {
        let _ = writeln!(
            out,
            "        <button id=\"{}\">{}</button>",
            theme.css_class(),
            theme.label()
        );
    }
    out.push_str("    </div>\n");
}

/// One click handler that removes `others` and adds `selected` on the container.
fn exclusive_handler(out: &mut String, selected: &str, others: &[String]) {
    let removed = others
        .iter()
        .map(|c| format!("'{c}'"))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = write!(
        out,
        r#"
        document.getElementById('{selected}').addEventListener('click', function() {{
            const diagram = document.getElementById('{CONTAINER_ID}');
            diagram.classList.remove({removed});
            diagram.classList.add('{selected}');
        }});
"#
    );
}

fn script(out: &mut String) {
    out.push_str("    <script>\n        // Animation controls");
    let _ = write!(
        out,
        r#"
        document.getElementById('pause-btn').addEventListener('click', function() {{
            document.getElementById('{CONTAINER_ID}').classList.add('{PAUSED_CLASS}');
        }});

        document.getElementById('play-btn').addEventListener('click', function() {{
            document.getElementById('{CONTAINER_ID}').classList.remove('{PAUSED_CLASS}');
        }});
"#
    );

    for speed in SpeedPreset::ALL {
        let others: Vec<String> = SpeedPreset::ALL
            .into_iter()
            .filter(|s| *s != speed)
            .map(SpeedPreset::css_class)
            .collect();
        exclusive_handler(out, &speed.css_class(), &others);
    }

    out.push_str("\n        // Theme controls");
    for theme in Theme::ALL {
        let others: Vec<String> = Theme::ALL
            .into_iter()
            .filter(|t| *t != theme)
            .map(Theme::css_class)
            .collect();
        exclusive_handler(out, &theme.css_class(), &others);
    }
    out.push_str("    </script>\n");
}

/// Compose the viewer page around `svg`, which is embedded verbatim.
pub fn compose_html(svg: &str, opts: &HtmlOptions) -> String {
    let title = escape_html(&opts.title);
    let mut out = String::with_capacity(svg.len() + 8 * 1024);

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "    <title>{title}</title>");
    out.push_str("    <style>");
    out.push_str(PAGE_CHROME_CSS);
    speed_css(&mut out);
    theme_css(&mut out);
    out.push_str("    </style>\n</head>\n<body>\n");
    let _ = writeln!(out, "    <h1>{title}</h1>\n");

    controls_markup(&mut out);

    let _ = writeln!(
        out,
        "\n    <div class=\"{}\" id=\"{CONTAINER_ID}\">",
        ControlState::default().class_attr()
    );
    out.push_str(svg);
    out.push_str("\n    </div>\n\n");

    script(&mut out);
    out.push_str("</body>\n</html>\n");
    out
}

/// Wraps one SVG file in the interactive viewer page.
#[derive(Clone, Debug)]
pub struct HtmlExporter {
    svg_path: PathBuf,
    opts: HtmlOptions,
}

impl HtmlExporter {
    pub fn new(svg_path: impl Into<PathBuf>) -> Self {
        Self {
            svg_path: svg_path.into(),
            opts: HtmlOptions::default(),
        }
    }

    pub fn with_options(mut self, opts: HtmlOptions) -> Self {
        self.opts = opts;
        self
    }

    pub fn default_output_path(&self) -> PathBuf {
        self.svg_path.with_extension("html")
    }

    /// Write the page to `output` (default: the SVG path with an `.html` extension).
    #[tracing::instrument(skip_all, fields(svg = %self.svg_path.display()))]
    pub fn export(&self, output: Option<&Path>) -> PulseResult<PathBuf> {
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.default_output_path());

        let svg = read_text(&self.svg_path)?;
        let html = compose_html(&svg, &self.opts);

        ensure_parent_dir(&output)?;
        write_text(&output, &html)?;
        tracing::info!(path = %output.display(), "wrote html viewer");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SVG: &str = "<svg width=\"1\"><g class=\"edge pulsating-arrow red-pulse\"/></svg>";

    #[test]
    fn page_embeds_svg_verbatim_in_default_container() {
        let html = compose_html(SVG, &HtmlOptions::default());
        assert!(html.contains(r#"class="diagram-container theme-default""#));
        assert!(html.contains(SVG));
        assert!(html.contains("<title>Animated Data Pipeline</title>"));
    }

    #[test]
    fn speed_rules_scale_base_period() {
        let html = compose_html(SVG, &HtmlOptions::default());
        assert!(html.contains(
            ".speed-normal .pulsating-arrow, .speed-normal .pulsating-arrow path { animation-duration: var(--pulse-speed, 3s); }"
        ));
        assert!(html.contains("animation-duration: calc(var(--pulse-speed, 3s) * 2);"));
        assert!(html.contains("animation-duration: calc(var(--pulse-speed, 3s) * 0.5);"));
        assert!(html.contains(".paused .pulsating-arrow"));
        assert!(html.contains("animation-play-state: paused;"));
    }

    #[test]
    fn every_theme_rebinds_every_color() {
        let html = compose_html(SVG, &HtmlOptions::default());
        for theme in Theme::ALL {
            for color in PulseColor::ALL {
                let rule = format!(
                    ".{} .{}, .{} .{} path {{ stroke: {}; }}",
                    theme.css_class(),
                    color.css_class(),
                    theme.css_class(),
                    color.css_class(),
                    color.themed_hex(theme)
                );
                assert!(html.contains(&rule), "missing {rule}");
            }
        }
    }

    #[test]
    fn speed_buttons_remove_the_other_two() {
        let html = compose_html(SVG, &HtmlOptions::default());
        let fast = html
            .split("getElementById('speed-fast').addEventListener")
            .nth(1)
            .unwrap();
        let handler = &fast[..fast.find("});").unwrap()];
        assert!(handler.contains("classList.remove('speed-normal', 'speed-slow');"));
        assert!(handler.contains("classList.add('speed-fast');"));
    }

    #[test]
    fn theme_buttons_remove_the_other_two() {
        let html = compose_html(SVG, &HtmlOptions::default());
        assert!(html.contains("classList.remove('theme-default', 'theme-pastel');"));
        assert!(html.contains("classList.add('theme-neon');"));
        assert!(html.contains("<button id=\"theme-pastel\">Pastel</button>"));
    }

    #[test]
    fn pause_and_play_touch_only_paused() {
        let html = compose_html(SVG, &HtmlOptions::default());
        assert!(html.contains("document.getElementById('diagram').classList.add('paused');"));
        assert!(html.contains("document.getElementById('diagram').classList.remove('paused');"));
    }

    #[test]
    fn title_is_escaped() {
        let html = compose_html(
            SVG,
            &HtmlOptions {
                title: "A <b> & \"C\"".to_string(),
            },
        );
        assert!(html.contains("<title>A &lt;b&gt; &amp; &quot;C&quot;</title>"));
    }

    #[test]
    fn export_defaults_to_html_sibling() {
        let dir = tempfile::tempdir().unwrap();
        let svg_path = dir.path().join("pipe.svg");
        std::fs::write(&svg_path, SVG).unwrap();

        let out = HtmlExporter::new(&svg_path).export(None).unwrap();
        assert_eq!(out, dir.path().join("pipe.html"));
        assert!(std::fs::read_to_string(out).unwrap().contains(SVG));
    }

    #[test]
    fn export_missing_svg_propagates_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = HtmlExporter::new(dir.path().join("absent.svg"))
            .export(Some(&dir.path().join("absent.html")))
            .unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
        assert!(!dir.path().join("absent.html").exists());
    }
}
