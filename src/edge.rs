use crate::palette::PulseColor;

pub const PULSATING_CLASS: &str = "pulsating-arrow";
pub const DEFAULT_EDGE_COLOR: &str = "blue";
pub const DEFAULT_PULSE_SPEED: &str = "3s";

/// Animation style of one edge.
///
/// Neither field is validated: an unknown color produces a class name with no stylesheet rule and
/// the edge keeps the layout engine's stroke.
///
/// `pulse_speed` is metadata only. It travels to Graphviz as a `data-pulse-speed` attribute, which
/// Graphviz does not write into the SVG, so the animation period always comes from the color's
/// stylesheet rule.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PulsatingEdge {
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_speed")]
    pub pulse_speed: String,
}

fn default_color() -> String {
    DEFAULT_EDGE_COLOR.to_string()
}

fn default_speed() -> String {
    DEFAULT_PULSE_SPEED.to_string()
}

impl Default for PulsatingEdge {
    fn default() -> Self {
        Self {
            color: default_color(),
            pulse_speed: default_speed(),
        }
    }
}

impl PulsatingEdge {
    pub fn new(color: impl Into<String>, pulse_speed: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            pulse_speed: pulse_speed.into(),
        }
    }

    pub fn with_color(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            ..Self::default()
        }
    }

    pub fn palette_color(&self) -> Option<PulseColor> {
        PulseColor::from_name(&self.color)
    }

    pub fn decoration(&self) -> EdgeDecoration {
        EdgeDecoration {
            classes: vec![PULSATING_CLASS.to_string(), format!("{}-pulse", self.color)],
            attributes: vec![
                ("stroke".to_string(), self.color.clone()),
                ("data-pulse-speed".to_string(), self.pulse_speed.clone()),
            ],
        }
    }
}

/// CSS classes and presentation attributes attached to an edge's SVG element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeDecoration {
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
}

impl EdgeDecoration {
    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}
