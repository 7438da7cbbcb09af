use std::path::PathBuf;

use clap::{ArgAction, Parser};

pub const USAGE: &str = "Usage: atlas-diff <file1> <file2>";

#[derive(Parser, Debug)]
#[command(
    name = "atlas-diff",
    version,
    about = "Side-by-side terminal diff viewer for two files",
    disable_version_flag = true
)]
pub struct Cli {
    /// Left-hand file
    pub file1: Option<PathBuf>,

    /// Right-hand file
    pub file2: Option<PathBuf>,

    /// Color theme (atlas, one-dark, dracula, solarized-dark)
    #[arg(long)]
    pub theme: Option<String>,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: (),
}

impl Cli {
    /// Both paths, or `None` when either is missing.
    pub fn paths(&self) -> Option<(&PathBuf, &PathBuf)> {
        Some((self.file1.as_ref()?, self.file2.as_ref()?))
    }
}
