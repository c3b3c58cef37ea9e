//! The animation `<style>` block and its insertion into rendered SVG text.

/// Inserted once into every rendered diagram. Graphviz puts edge classes on the edge's `<g>`, so
/// each rule also targets the group's `path`.
pub const ANIMATION_STYLE_BLOCK: &str = r#"
<style>
    @keyframes pulse {
        0% { stroke-width: 1; stroke-opacity: 0.8; }
        50% { stroke-width: 3; stroke-opacity: 1; }
        100% { stroke-width: 1; stroke-opacity: 0.8; }
    }

    .pulsating-arrow, .pulsating-arrow path {
        animation: pulse var(--pulse-speed, 3s) infinite;
    }

    .blue-pulse, .blue-pulse path {
        stroke: #0066cc;
        --pulse-speed: 3s;
    }

    .green-pulse, .green-pulse path {
        stroke: #00cc66;
        --pulse-speed: 2.5s;
    }

    .red-pulse, .red-pulse path {
        stroke: #cc3300;
        --pulse-speed: 2s;
    }

    .orange-pulse, .orange-pulse path {
        stroke: #ff9900;
        --pulse-speed: 4s;
    }

    .purple-pulse, .purple-pulse path {
        stroke: #9900cc;
        --pulse-speed: 5s;
    }
</style>
"#;

pub const SVG_OPEN_MARKER: &str = "<svg ";

/// Byte offset of the first `<svg ` outside `<!-- ... -->` comments. An unterminated comment hides
/// everything after it.
fn find_open_marker(svg: &str) -> Option<usize> {
    let mut from = 0;
    loop {
        let rest = &svg[from..];
        let marker = rest.find(SVG_OPEN_MARKER);
        match rest.find("<!--") {
            Some(c) if marker.is_none_or(|m| c < m) => {
                let body = from + c + "<!--".len();
                from = body + svg[body..].find("-->")? + "-->".len();
            }
            _ => return marker.map(|m| from + m),
        }
    }
}

/// Byte offset just past the `>` that closes the first `<svg ` tag. Quoted attribute values may
/// contain `>`.
fn open_tag_end(svg: &str) -> Option<usize> {
    let start = find_open_marker(svg)?;
    let mut quote: Option<u8> = None;
    for (i, b) in svg.bytes().enumerate().skip(start + SVG_OPEN_MARKER.len()) {
        match (quote, b) {
            (Some(q), _) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'>') => return Some(i + 1),
            (None, _) => {}
        }
    }
    None
}

/// Result of [`inject_animation_styles`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Injection {
    pub svg: String,
    pub inserted: bool,
}

/// Insert [`ANIMATION_STYLE_BLOCK`] right after the first opening `<svg ...>` tag. Tags inside XML
/// comments are skipped.
///
/// Text without a complete `<svg ` tag is returned unchanged. Everything outside the inserted
/// block is byte-identical to the input.
pub fn inject_animation_styles(svg: &str) -> Injection {
    let Some(at) = open_tag_end(svg) else {
        tracing::warn!("svg has no opening <svg> tag; animation styles not inserted");
        return Injection {
            svg: svg.to_string(),
            inserted: false,
        };
    };

    let mut out = String::with_capacity(svg.len() + ANIMATION_STYLE_BLOCK.len());
    out.push_str(&svg[..at]);
    out.push_str(ANIMATION_STYLE_BLOCK);
    out.push_str(&svg[at..]);
    Injection {
        svg: out,
        inserted: true,
    }
}
