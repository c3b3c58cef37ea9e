use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use pulseflow::{
    Diagram, HtmlExporter, HtmlOptions, Pipeline, PipelineOpts, PreviewOpts, PreviewOutcome,
    generate_preview,
};

#[derive(Parser, Debug)]
#[command(name = "pulseflow", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a diagram JSON to animated SVG (requires Graphviz `dot` on PATH).
    Render(RenderArgs),
    /// Wrap an existing SVG in the interactive HTML viewer.
    Html(HtmlArgs),
    /// Write a static GIF preview of an SVG.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input diagram JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// HTML output path (default: next to the SVG).
    #[arg(long)]
    html: Option<PathBuf>,

    /// Do not write the HTML viewer.
    #[arg(long, conflicts_with = "html")]
    no_html: bool,

    /// Page title (default: diagram name).
    #[arg(long)]
    title: Option<String>,

    /// Also write a static GIF preview.
    #[arg(long)]
    gif: bool,

    #[command(flatten)]
    preview: PreviewTiming,
}

#[derive(Parser, Debug)]
struct HtmlArgs {
    /// Input SVG.
    #[arg(long)]
    svg: PathBuf,

    /// Output HTML path (default: SVG path with `.html`).
    #[arg(long)]
    out: Option<PathBuf>,

    #[arg(long)]
    title: Option<String>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input SVG.
    #[arg(long)]
    svg: PathBuf,

    #[command(flatten)]
    timing: PreviewTiming,
}

#[derive(clap::Args, Debug)]
struct PreviewTiming {
    /// GIF output path (default: SVG path with `.gif`).
    #[arg(long = "gif-out")]
    out: Option<PathBuf>,

    /// Preview length in seconds.
    #[arg(long, default_value_t = 10)]
    duration: u32,

    /// Preview frames per second.
    #[arg(long, default_value_t = 15)]
    fps: u32,
}

impl PreviewTiming {
    fn opts(&self) -> PreviewOpts {
        PreviewOpts {
            output: self.out.clone(),
            duration_secs: self.duration,
            fps: self.fps,
            ..PreviewOpts::default()
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Html(args) => cmd_html(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let diagram = Diagram::load_json(&args.in_path)
        .with_context(|| format!("load diagram '{}'", args.in_path.display()))?;

    let opts = PipelineOpts {
        html: !args.no_html,
        html_output: args.html,
        title: args.title,
        preview: args.gif.then(|| args.preview.opts()),
    };

    let artifacts = Pipeline::default().run(&diagram, &opts)?;

    eprintln!("wrote {}", artifacts.svg.display());
    if let Some(html) = &artifacts.html {
        eprintln!("wrote {}", html.display());
    }
    if let Some(gif) = &artifacts.gif {
        eprintln!("wrote {} (static preview)", gif.display());
    }
    Ok(())
}

fn cmd_html(args: HtmlArgs) -> anyhow::Result<()> {
    let mut exporter = HtmlExporter::new(&args.svg);
    if let Some(title) = args.title {
        exporter = exporter.with_options(HtmlOptions { title });
    }
    let out = exporter.export(args.out.as_deref())?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    match generate_preview(&args.svg, &args.timing.opts())? {
        PreviewOutcome::Written(path) => {
            eprintln!("wrote {}", path.display());
            eprintln!("note: the gif is static; open the svg or html in a browser for animation");
        }
        PreviewOutcome::Unavailable(reason) => eprintln!("no preview written: {reason}"),
    }
    Ok(())
}
