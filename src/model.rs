use std::{
    collections::BTreeSet,
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::{
    edge::PulsatingEdge,
    error::{PulseError, PulseResult},
};

/// A named graph of nodes, clusters and animated edges, rendered once to one SVG file.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Diagram {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<PathBuf>,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub clusters: Vec<Cluster>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
        }
    }

    pub fn labeled(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: Some(label.into()),
        }
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// A labelled group of nodes, drawn as a boxed subgraph. Clusters nest.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Cluster {
    pub label: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub clusters: Vec<Cluster>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    #[serde(flatten)]
    pub style: PulsatingEdge,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, style: PulsatingEdge) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            style,
        }
    }
}

/// Graphviz `rankdir`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Direction {
    #[default]
    LeftRight,
    RightLeft,
    TopBottom,
    BottomTop,
}

impl Direction {
    pub fn rankdir(self) -> &'static str {
        match self {
            Direction::LeftRight => "LR",
            Direction::RightLeft => "RL",
            Direction::TopBottom => "TB",
            Direction::BottomTop => "BT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rankdir())
    }
}

impl FromStr for Direction {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LR" => Ok(Direction::LeftRight),
            "RL" => Ok(Direction::RightLeft),
            "TB" => Ok(Direction::TopBottom),
            "BT" => Ok(Direction::BottomTop),
            _ => Err(PulseError::validation(format!(
                "invalid direction '{s}' (expected one of LR, RL, TB, BT)"
            ))),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = PulseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Direction> for String {
    fn from(value: Direction) -> Self {
        value.rankdir().to_string()
    }
}

/// Appends `.svg` unless the path already ends with it.
pub fn svg_filename(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.extension().is_some_and(|ext| ext == "svg") {
        return path.to_path_buf();
    }
    let mut s = path.as_os_str().to_os_string();
    s.push(".svg");
    PathBuf::from(s)
}

impl Diagram {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filename: None,
            direction: Direction::default(),
            nodes: Vec::new(),
            clusters: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn with_filename(mut self, filename: impl AsRef<Path>) -> Self {
        self.filename = Some(svg_filename(filename));
        self
    }

    /// Where the SVG is written. Always ends in `.svg`.
    pub fn output_path(&self) -> PathBuf {
        match &self.filename {
            Some(f) => svg_filename(f),
            None => {
                let stem = self
                    .name
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join("_")
                    .to_lowercase();
                PathBuf::from(format!("{stem}.svg"))
            }
        }
    }

    /// Top-level nodes first, then cluster members depth-first.
    pub fn all_nodes(&self) -> Vec<&Node> {
        fn walk<'a>(cluster: &'a Cluster, out: &mut Vec<&'a Node>) {
            out.extend(cluster.nodes.iter());
            for sub in &cluster.clusters {
                walk(sub, out);
            }
        }

        let mut out: Vec<&Node> = self.nodes.iter().collect();
        for cluster in &self.clusters {
            walk(cluster, &mut out);
        }
        out
    }

    pub fn validate(&self) -> PulseResult<()> {
        if self.name.trim().is_empty() {
            return Err(PulseError::validation("diagram name must be non-empty"));
        }

        let mut ids = BTreeSet::new();
        for node in self.all_nodes() {
            if node.id.trim().is_empty() {
                return Err(PulseError::validation("node id must be non-empty"));
            }
            if !ids.insert(node.id.as_str()) {
                return Err(PulseError::validation(format!(
                    "duplicate node id '{}'",
                    node.id
                )));
            }
        }

        for edge in &self.edges {
            for end in [&edge.from, &edge.to] {
                if !ids.contains(end.as_str()) {
                    return Err(PulseError::validation(format!(
                        "edge {} -> {} references unknown node '{end}'",
                        edge.from, edge.to
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn from_json_str(json: &str) -> PulseResult<Self> {
        let diagram: Diagram =
            serde_json::from_str(json).map_err(|e| PulseError::serde(e.to_string()))?;
        diagram.validate()?;
        Ok(diagram)
    }

    /// Load a diagram description from a JSON file. A relative `filename` is resolved against the
    /// JSON file's directory.
    pub fn load_json(path: &Path) -> PulseResult<Self> {
        let text = crate::error::read_text(path)?;
        let mut diagram = Self::from_json_str(&text)?;
        let resolved = match (&diagram.filename, path.parent()) {
            (Some(f), Some(base)) if f.is_relative() => Some(base.join(f)),
            _ => None,
        };
        if resolved.is_some() {
            diagram.filename = resolved;
        }
        Ok(diagram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_diagram() -> Diagram {
        let mut d = Diagram::new("Two Nodes");
        d.nodes = vec![Node::new("a"), Node::new("b")];
        d.edges = vec![Edge::new("a", "b", PulsatingEdge::default())];
        d
    }

    #[test]
    fn output_path_always_has_svg_extension() {
        assert_eq!(
            Diagram::new("Simple Data Pipeline").output_path(),
            PathBuf::from("simple_data_pipeline.svg")
        );
        assert_eq!(
            Diagram::new("x").with_filename("out/pipe").output_path(),
            PathBuf::from("out/pipe.svg")
        );
        assert_eq!(
            Diagram::new("x").with_filename("pipe.svg").output_path(),
            PathBuf::from("pipe.svg")
        );
        assert_eq!(svg_filename("pipe.png"), PathBuf::from("pipe.png.svg"));
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("tb".parse::<Direction>().unwrap(), Direction::TopBottom);
        assert_eq!("LR".parse::<Direction>().unwrap(), Direction::LeftRight);
        assert!("diagonal".parse::<Direction>().is_err());
        assert_eq!(Direction::BottomTop.to_string(), "BT");
    }

    #[test]
    fn validate_accepts_well_formed_diagram() {
        two_node_diagram().validate().unwrap();
    }

    #[test]
    fn validate_rejects_duplicates_across_clusters() {
        let mut d = two_node_diagram();
        d.clusters.push(Cluster {
            label: "dup".into(),
            nodes: vec![Node::new("a")],
            clusters: vec![],
        });
        let err = d.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate node id 'a'"));
    }

    #[test]
    fn validate_rejects_dangling_edges() {
        let mut d = two_node_diagram();
        d.edges.push(Edge::new("b", "c", PulsatingEdge::default()));
        assert!(d.validate().unwrap_err().to_string().contains("'c'"));
    }

    #[test]
    fn validate_rejects_empty_name() {
        let mut d = two_node_diagram();
        d.name = "  ".into();
        assert!(d.validate().is_err());
    }

    #[test]
    fn json_round_trips_edges_with_flattened_style() {
        let json = r#"{
            "name": "Flow",
            "direction": "tb",
            "clusters": [{"label": "Sources", "nodes": [{"id": "db", "label": "Source DB"}]}],
            "nodes": [{"id": "s3"}],
            "edges": [{"from": "db", "to": "s3", "color": "green"}]
        }"#;
        let d = Diagram::from_json_str(json).unwrap();
        assert_eq!(d.direction, Direction::TopBottom);
        assert_eq!(d.edges[0].style, PulsatingEdge::new("green", "3s"));
        assert_eq!(d.all_nodes().len(), 2);
        assert_eq!(d.all_nodes()[1].display_label(), "Source DB");
    }

    #[test]
    fn load_json_resolves_filename_next_to_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("flow.json");
        std::fs::write(
            &json,
            r#"{"name": "Flow", "filename": "out/flow", "nodes": [{"id": "a"}]}"#,
        )
        .unwrap();
        let d = Diagram::load_json(&json).unwrap();
        assert_eq!(d.output_path(), dir.path().join("out/flow.svg"));
    }

    #[test]
    fn bad_json_is_a_serde_error() {
        let err = Diagram::from_json_str("{").unwrap_err();
        assert!(matches!(err, PulseError::Serde(_)));
        let err = Diagram::from_json_str(r#"{"name":"x","direction":"up"}"#).unwrap_err();
        assert!(matches!(err, PulseError::Serde(_)));
    }
}
