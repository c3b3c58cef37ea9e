use std::path::Path;

use crate::{
    edge::PulsatingEdge,
    error::PulseResult,
    model::{Cluster, Diagram, Direction, Edge, Node},
};

pub struct DiagramBuilder {
    diagram: Diagram,
}

impl DiagramBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            diagram: Diagram::new(name),
        }
    }

    pub fn filename(mut self, filename: impl AsRef<Path>) -> Self {
        self.diagram = self.diagram.with_filename(filename);
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.diagram.direction = direction;
        self
    }

    pub fn node(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.diagram.nodes.push(Node::labeled(id, label));
        self
    }

    pub fn cluster(mut self, cluster: Cluster) -> Self {
        self.diagram.clusters.push(cluster);
        self
    }

    pub fn edge(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        style: PulsatingEdge,
    ) -> Self {
        self.diagram.edges.push(Edge::new(from, to, style));
        self
    }

    /// Chain `a -> b -> c ...` with the same style on every hop.
    pub fn chain(mut self, ids: &[&str], style: PulsatingEdge) -> Self {
        for pair in ids.windows(2) {
            self.diagram
                .edges
                .push(Edge::new(pair[0], pair[1], style.clone()));
        }
        self
    }

    pub fn build(self) -> PulseResult<Diagram> {
        self.diagram.validate()?;
        Ok(self.diagram)
    }
}

pub struct ClusterBuilder {
    cluster: Cluster,
}

impl ClusterBuilder {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            cluster: Cluster {
                label: label.into(),
                ..Cluster::default()
            },
        }
    }

    pub fn node(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.cluster.nodes.push(Node::labeled(id, label));
        self
    }

    pub fn cluster(mut self, sub: Cluster) -> Self {
        self.cluster.clusters.push(sub);
        self
    }

    pub fn build(self) -> Cluster {
        self.cluster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_assembles_clustered_pipeline() {
        let d = DiagramBuilder::new("Complex Data Pipeline")
            .filename("complex_pipeline")
            .direction(Direction::TopBottom)
            .cluster(
                ClusterBuilder::new("Data Sources")
                    .node("db", "Transactional DB")
                    .node("events", "Events Store")
                    .build(),
            )
            .cluster(ClusterBuilder::new("Ingestion").node("stream", "Data Stream").build())
            .edge("db", "stream", PulsatingEdge::new("blue", "4s"))
            .edge("events", "stream", PulsatingEdge::new("blue", "2s"))
            .build()
            .unwrap();

        assert_eq!(d.output_path(), Path::new("complex_pipeline.svg"));
        assert_eq!(d.clusters.len(), 2);
        assert_eq!(d.edges[1].style.pulse_speed, "2s");
    }

    #[test]
    fn chain_links_consecutive_nodes() {
        let d = DiagramBuilder::new("Chain")
            .node("a", "A")
            .node("b", "B")
            .node("c", "C")
            .chain(&["a", "b", "c"], PulsatingEdge::with_color("red"))
            .build()
            .unwrap();
        let pairs: Vec<_> = d
            .edges
            .iter()
            .map(|e| (e.from.as_str(), e.to.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a", "b"), ("b", "c")]);
    }

    #[test]
    fn build_surfaces_validation_errors() {
        assert!(
            DiagramBuilder::new("Broken")
                .node("a", "A")
                .edge("a", "ghost", PulsatingEdge::default())
                .build()
                .is_err()
        );
    }
}
