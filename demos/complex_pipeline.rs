use std::path::PathBuf;

use pulseflow::{
    ClusterBuilder, DiagramBuilder, Direction, Pipeline, PipelineOpts, PulsatingEdge,
    is_dot_on_path,
};

fn main() -> anyhow::Result<()> {
    if !is_dot_on_path() {
        eprintln!("skipping: graphviz `dot` not found on PATH");
        return Ok(());
    }

    let sources = ClusterBuilder::new("Data Sources")
        .node("db", "Transactional DB")
        .node("events", "Events Store")
        .build();
    let ingestion = ClusterBuilder::new("Ingestion")
        .node("stream", "Data Stream")
        .node("ingest_fn", "Ingest Function")
        .build();
    let storage = ClusterBuilder::new("Storage")
        .node("raw", "Raw Data")
        .node("processed", "Processed Data")
        .build();
    let processing = ClusterBuilder::new("Processing")
        .node("etl", "ETL Jobs")
        .node("spark", "Spark Cluster")
        .build();
    let analytics = ClusterBuilder::new("Analytics")
        .node("warehouse", "Data Warehouse")
        .node("reporting_fn", "Reporting")
        .build();

    // Per-edge speeds ride along as `data-pulse-speed`; the color rule sets the period.
    let diagram = DiagramBuilder::new("Complex Data Pipeline")
        .filename("complex_pipeline.svg")
        .direction(Direction::TopBottom)
        .cluster(sources)
        .cluster(ingestion)
        .cluster(storage)
        .cluster(processing)
        .cluster(analytics)
        .edge("db", "stream", PulsatingEdge::new("blue", "4s"))
        .edge("events", "stream", PulsatingEdge::new("blue", "2s"))
        .chain(&["stream", "ingest_fn", "raw"], PulsatingEdge::with_color("green"))
        .edge("raw", "etl", PulsatingEdge::with_color("red"))
        .edge("raw", "spark", PulsatingEdge::with_color("red"))
        .edge("etl", "processed", PulsatingEdge::with_color("orange"))
        .edge("spark", "processed", PulsatingEdge::with_color("orange"))
        .chain(
            &["processed", "warehouse", "reporting_fn"],
            PulsatingEdge::with_color("purple"),
        )
        .build()?;

    let opts = PipelineOpts {
        html_output: Some(PathBuf::from("complex_pipeline.html")),
        ..PipelineOpts::with_html()
    };
    let artifacts = Pipeline::default().run(&diagram, &opts)?;
    println!("wrote {}", artifacts.svg.display());
    if let Some(html) = &artifacts.html {
        println!("wrote {}", html.display());
    }
    Ok(())
}
