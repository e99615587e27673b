use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[clap(
    version = "0.1.0",
    author = "Alexander Heilmeier <alexander.heilmeier@tum.de>",
    name = "RS-REPLAY",
    about = "A timeline-driven replay engine for race timing data written in Rust"
)]
pub struct SimOpts {
    // FLAGS ---------------------------------------------------------------------------------------
    /// Activate debug printing
    #[clap(short, long)]
    pub debug: bool,

    /// Activate real-time playback (ticks are executed with the tick period of the chosen speed
    /// and the running order is printed after every tick)
    #[clap(short, long)]
    pub realtime: bool,

    // OPTIONS -------------------------------------------------------------------------------------
    /// Set path to the session file (JSON with the arrays drivers, positions, laps, messages)
    #[clap(short, long)]
    pub session_path: PathBuf,

    /// Set playback speed multiplier, should be in the range [1, 10]
    #[clap(short = 'v', long, default_value = "1")]
    pub speed: u32,

    /// Set number of ticks to play (default: as many as required to replay the timeline once)
    #[clap(short, long)]
    pub no_ticks: Option<u32>,

    /// Set tick period in ms at speed 1, should be in the range [1, 60000]
    #[clap(short, long, default_value = "2000")]
    pub base_interval_ms: u64,

    /// Set path to write the final snapshot to (JSON)
    #[clap(short, long)]
    pub output_path: Option<PathBuf>,
}
