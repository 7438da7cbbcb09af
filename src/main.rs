mod action;
mod app;
mod cli;
mod components;
mod config;
mod diff;
mod event;
mod input;
mod layout;
mod logging;
mod state;
mod theme;
mod tui;

use anyhow::Result;
use clap::Parser;

use crate::app::App;
use crate::cli::{Cli, USAGE};
use crate::input::SourceText;
use crate::theme::Theme;

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restore so the user gets their shell back
        let _ = tui::restore();
        default_hook(panic_info);
    }));
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install().ok();
    install_panic_hook();

    let cli = Cli::parse();

    let Some((path1, path2)) = cli.paths() else {
        println!("{USAGE}");
        return Ok(());
    };

    let _log_guard = match logging::init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("atlas-diff: {e:#}");
            None
        }
    };

    // Read both files before touching the terminal
    let (left, right) = match (SourceText::load(path1), SourceText::load(path2)) {
        (Ok(left), Ok(right)) => (left, right),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("atlas-diff: {e:#}");
            std::process::exit(1);
        }
    };

    let mut config = config::load_config();
    if let Some(ref theme_name) = cli.theme {
        config.theme = Theme::from_name(theme_name);
    }

    tracing::info!(theme = %config.theme.name, "starting session");
    let mut app = App::new(left, right, config.theme);

    let mut terminal = match tui::init() {
        Ok(t) => t,
        Err(e) => {
            tui::restore()?;
            eprintln!("atlas-diff: {e:#}");
            std::process::exit(1);
        }
    };
    let result = app.run(&mut terminal).await;
    tui::restore()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "session ended with an error");
        eprintln!("atlas-diff: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}
