use clap::Parser;
use std::path::PathBuf;

/// Chart when each task in a timing log ran, and which tasks ran back to back
#[derive(Parser, Debug)]
#[command(name = "timereport")]
#[command(about = "Render execution timing logs as a Gantt chart", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Timing log to read, one task per line
    #[arg(short = 'f', long)]
    pub file: PathBuf,

    /// Write the chart as SVG (`.svg` is appended when missing)
    #[arg(short = 's', long)]
    pub svg: Option<String>,

    /// Open the chart in the default viewer
    #[arg(long)]
    pub view: bool,

    /// Print a plain-text summary of the timeline
    ///
    /// This is the default when neither --svg nor --view is given.
    #[arg(long)]
    pub summary: bool,

    /// Chart style config file (TOML)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show connection and normalization diagnostics (-vv for more)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn wants_summary(&self) -> bool {
        self.summary || (self.svg.is_none() && !self.view)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}
