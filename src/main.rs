use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use lensing_sim::driver::{self, RunOptions};
use lensing_sim::SceneConfig;
use std::io;

/// Light rays bending around a point mass
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
  /// Number of frames to simulate (runs until Ctrl-C when omitted)
  #[arg(short, long)]
  frames: Option<u64>,
  /// Fixed time step in seconds
  #[arg(long, default_value_t = driver::TARGET_FRAME_TIME)]
  dt: f64,
  /// Step by wall-clock time instead of a fixed step
  #[arg(long, default_value_t = false)]
  realtime: bool,
  /// Mass of the attractor
  #[arg(short, long, default_value_t = 50.0)]
  mass: f64,
  /// Seconds an absorbed ray stays visible before it is dropped
  #[arg(long)]
  grace: Option<f64>,
  /// Frames between status lines (0 disables them)
  #[arg(long, default_value_t = 60)]
  report_every: u64,
  /// Reset the scene every N frames
  #[arg(long)]
  reset_every: Option<u64>,
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Generate shell completion scripts
  Completions {
    /// The shell to generate the script for
    #[arg(value_enum)]
    shell: Shell,
  },
}

fn main() {
  let args = Args::parse();

  if let Some(Commands::Completions { shell }) = args.command {
    let mut cmd = Args::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    return;
  }

  env_logger::init();

  let options = RunOptions {
    config: SceneConfig {
      attractor_mass: args.mass,
      absorbed_grace: args.grace,
      ..SceneConfig::default()
    },
    frames: args.frames,
    dt: args.dt,
    realtime: args.realtime,
    report_every: args.report_every,
    reset_every: args.reset_every,
  };

  match driver::run(&options) {
    Ok(summary) => println!(
      "{} frames, {} rays spawned, {} live ({} absorbed)",
      summary.frames, summary.spawned, summary.live, summary.absorbed
    ),
    Err(e) => {
      eprintln!("Error: {e}");
      std::process::exit(1);
    }
  }
}
