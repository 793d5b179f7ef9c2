use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "tictactoe")]
#[command(about = "❌⭕ Two-player tic-tac-toe in the terminal")]
#[command(version)]
pub struct Cli {
    /// JSON settings file (tick rate, effects, colors)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Where tracing output goes; stdout belongs to the game
    #[arg(long, default_value = "tictactoe.log")]
    pub log_file: PathBuf,

    /// Do not ring the terminal bell
    #[arg(short, long)]
    pub mute: bool,

    /// Go straight to the board
    #[arg(long)]
    pub skip_welcome: bool,

    /// Frame interval in milliseconds
    #[arg(long)]
    pub tick_ms: Option<u64>,
}

impl Cli {
    /// Flags win over whatever the config file says.
    pub fn apply(&self, config: &mut Config) {
        if self.mute {
            config.sound = false;
        }
        if self.skip_welcome {
            config.welcome = false;
        }
        if let Some(ms) = self.tick_ms {
            config.tick_ms = ms;
        }
    }
}
