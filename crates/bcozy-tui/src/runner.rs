//! Main TUI runner: terminal lifecycle and event loop

use bcozy_app::config::Settings;
use bcozy_app::Engine;
use bcozy_core::prelude::*;

use super::terminal::WindowTitle;
use super::{event, render, terminal};

/// Run the TUI until the user quits or a termination signal arrives
pub async fn run(settings: Settings) -> Result<()> {
    terminal::install_panic_hook();

    let mut engine = Engine::new(settings);
    info!("bcozy TUI starting with {} units", engine.state.board.len());

    let title = WindowTitle::follow(&mut engine.state.localization);
    let mut term = ratatui::init();
    let result = run_loop(&mut term, &mut engine, &title);

    engine.shutdown().await;
    ratatui::restore();

    if let Err(e) = &result {
        error!("TUI loop failed: {}", e);
    }
    result
}

/// Main event loop
///
/// Each pass delivers pushed unit updates, drains queued messages,
/// renders, then waits briefly for terminal input.
fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    engine: &mut Engine,
    title: &WindowTitle,
) -> Result<()> {
    while !engine.should_quit() {
        engine.drain_remote_updates();
        engine.drain_pending_messages();
        title.apply()?;

        terminal.draw(|frame| render::view(frame, &engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }
    Ok(())
}
