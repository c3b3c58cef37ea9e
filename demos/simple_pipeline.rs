use pulseflow::{DiagramBuilder, Pipeline, PipelineOpts, PulsatingEdge, is_dot_on_path};

fn main() -> anyhow::Result<()> {
    if !is_dot_on_path() {
        eprintln!("skipping: graphviz `dot` not found on PATH");
        return Ok(());
    }

    let diagram = DiagramBuilder::new("Simple Data Pipeline")
        .filename("simple_pipeline.svg")
        .node("source", "Source DB")
        .node("stream", "Data Stream")
        .node("storage", "Raw Storage")
        .node("analytics", "Analytics")
        .edge("source", "stream", PulsatingEdge::with_color("blue"))
        .edge("stream", "storage", PulsatingEdge::with_color("green"))
        .edge("storage", "analytics", PulsatingEdge::with_color("red"))
        .build()?;

    let artifacts = Pipeline::default().run(&diagram, &PipelineOpts::with_html())?;
    println!("wrote {}", artifacts.svg.display());
    if let Some(html) = &artifacts.html {
        println!("wrote {}", html.display());
    }
    Ok(())
}
