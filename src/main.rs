use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use g2vis::{pipeline, Backend, LayoutKind, PaletteKind, VisConfig};

#[derive(Parser)]
#[command(name = "g2vis", about = "Render node-link JSON graphs", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a static SVG figure
    Svg(RenderArgs),
    /// Render an interactive HTML chart
    Html(RenderArgs),
    /// Emit Graphviz DOT source
    Dot(RenderArgs),
}

#[derive(Args)]
struct RenderArgs {
    /// Path to a node-link graph JSON document
    #[arg(short, long)]
    input: PathBuf,

    /// Path the rendered output is written to
    #[arg(short, long)]
    output: PathBuf,

    /// Layout algorithm (spring, circular)
    #[arg(long, default_value = "spring")]
    layout: String,

    /// Node attribute used as node label (default: the type attribute)
    #[arg(long)]
    label_attr: Option<String>,

    /// Draw edge labels
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    edge_labels: bool,

    /// Draw colors from the larger web-chart palette
    #[arg(long)]
    chart_palette: bool,

    /// Seed for color assignment and spring layout, for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Chart title (HTML backend)
    #[arg(long)]
    title: Option<String>,
}

impl RenderArgs {
    fn config(&self) -> g2vis::Result<VisConfig> {
        let layout: LayoutKind = self.layout.parse()?;
        let mut config = VisConfig::new()
            .with_layout(layout)
            .with_edge_label(self.edge_labels);
        if let Some(key) = &self.label_attr {
            config = config.with_label_key(key.clone());
        }
        if self.chart_palette {
            config = config.with_palette(PaletteKind::Chart);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(title) = &self.title {
            config = config.with_title(title.clone());
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let (backend, args) = match &cli.command {
        Command::Svg(args) => (Backend::Svg, args),
        Command::Html(args) => (Backend::Html, args),
        Command::Dot(args) => (Backend::Dot, args),
    };

    let result = args
        .config()
        .and_then(|config| pipeline::run(&args.input, &args.output, backend, &config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
