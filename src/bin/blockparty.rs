use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "blockparty", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the square state service.
    Serve(ServeArgs),
    /// Print spiral positions (and optionally adjacency) as JSON.
    Layout(LayoutArgs),
    /// Render a square state JSON file as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Listen address (overrides BLOCKPARTY_BIND).
    #[arg(long)]
    bind: Option<String>,

    /// State file (overrides BLOCKPARTY_STATE_FILE).
    #[arg(long)]
    state_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Number of squares.
    #[arg(long)]
    count: usize,

    /// Include the neighbour list of every square.
    #[arg(long)]
    adjacency: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input square state JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Square edge length in pixels.
    #[arg(long, default_value_t = 60)]
    square_size: u32,

    /// Gap between squares in pixels.
    #[arg(long, default_value_t = 5)]
    gap: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Layout(args) => cmd_layout(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("BLOCKPARTY_LOG_JSON")
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false);
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = blockparty::ServerConfig::from_env();
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(state_file) = args.state_file {
        config.state_file = state_file;
    }
    blockparty::serve(config)
        .await
        .context("run state service")?;
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let positions = blockparty::compute_positions(args.count);
    let mut doc = serde_json::json!({
        "count": args.count,
        "extent": blockparty::GridExtent::of(&positions),
        "positions": positions,
    });
    if args.adjacency {
        let index = blockparty::NeighborIndex::build(&positions);
        let adjacency: Vec<Vec<usize>> = (0..positions.len())
            .map(|i| index.neighbors(i).into_iter().collect())
            .collect();
        doc["adjacency"] = serde_json::json!(adjacency);
    }

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &doc).context("write layout JSON")?;
    writeln!(stdout).context("write layout JSON")?;
    Ok(())
}

fn read_state_json(path: &Path) -> anyhow::Result<blockparty::SquareState> {
    let f = File::open(path).with_context(|| format!("open square state '{}'", path.display()))?;
    let state: blockparty::SquareState = serde_json::from_reader(BufReader::new(f))
        .with_context(|| "parse square state JSON")?;
    Ok(state)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let state = read_state_json(&args.in_path)?;
    state.validate()?;

    let opts = blockparty::RenderOpts {
        square_size: args.square_size,
        gap: args.gap,
        ..blockparty::RenderOpts::default()
    };
    let img = blockparty::render_snapshot(&state.squares, opts)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} squares, {}x{})",
        args.out.display(),
        state.len(),
        img.width(),
        img.height()
    );
    Ok(())
}
