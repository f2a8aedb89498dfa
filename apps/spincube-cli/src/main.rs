use clap::{Parser, Subcommand};
use spincube_demo::{CubeDemo, DemoConfig, DemoSnapshot, FrameOutcome, FrameQueue, FrameScheduler};
use spincube_render::DebugTextRenderer;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spincube-cli", about = "Headless driver for the rotating cube demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON config file overriding the default scene parameters
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, crate info and the effective config
    Info,
    /// Run the frame loop headless with the debug text renderer
    Run {
        /// Number of frames to render
        #[arg(short, long, default_value = "100")]
        frames: u64,
        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
        /// Print every rendered frame
        #[arg(long)]
        dump: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<DemoConfig> {
    match path {
        Some(path) => Ok(DemoConfig::load(path)?),
        None => Ok(DemoConfig::default()),
    }
}

fn print_snapshot(snap: &DemoSnapshot) {
    println!("Frames: {} (running={})", snap.frames, snap.running);
    println!(
        "Cube rotation: x={:.4} y={:.4} z={:.4}",
        snap.rotation.x, snap.rotation.y, snap.rotation.z
    );
    println!(
        "Camera: pos=({:.1}, {:.1}, {:.1}) fov={} aspect={}",
        snap.camera_position.x, snap.camera_position.y, snap.camera_position.z, snap.fov, snap.aspect
    );
    println!("Scene children: {}", snap.child_count);
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Info => {
            println!("spincube-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("demo: {}", spincube_demo::crate_info());
            println!("scene: {}", spincube_scene::crate_info());
            println!("render: {}", spincube_render::crate_info());
            println!("config: {}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Run { frames, json, dump } => {
            let mut demo =
                CubeDemo::with_config(DebugTextRenderer::new(), FrameQueue::new(), &config)?;

            // The first frame is the host's to request; every later one is
            // requested by the demo itself.
            demo.scheduler_mut().request_frame();
            let mut rendered = 0;
            while rendered < frames && demo.scheduler_mut().take() {
                if let FrameOutcome::Rendered(text) = demo.animate()? {
                    if dump {
                        print!("{text}");
                    }
                }
                rendered += 1;
            }
            tracing::info!(rendered, pending = demo.scheduler().pending(), "run finished");

            let snap = demo.snapshot();
            if json {
                println!("{}", serde_json::to_string_pretty(&snap)?);
            } else {
                print_snapshot(&snap);
            }
        }
    }

    Ok(())
}
