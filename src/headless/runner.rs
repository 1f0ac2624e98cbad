//! Headless mode runner - main event loop without TUI

use std::io::BufRead;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};

use bcozy_app::config::Settings;
use bcozy_app::message::Message;
use bcozy_app::state::AppState;
use bcozy_app::{Engine, EngineEvent};
use bcozy_core::prelude::*;
use bcozy_core::Locale;

/// How often pushed unit updates are delivered
const DRAIN_INTERVAL: Duration = Duration::from_millis(50);

/// A parsed stdin line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlessCommand {
    AddGroup(String),
    RemoveGroup(String),
    Login { user: String, password: String },
    Logout,
    Language(Locale),
    Quit,
}

/// Parse one stdin line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> std::result::Result<Option<HeadlessCommand>, String> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let parsed = match command {
        "" => return Ok(None),
        "q" | "quit" => HeadlessCommand::Quit,
        "logout" => HeadlessCommand::Logout,
        "add" => HeadlessCommand::AddGroup(rest.to_string()),
        "remove" if !rest.is_empty() => HeadlessCommand::RemoveGroup(rest.to_string()),
        "login" => {
            let (user, password) = rest.split_once(' ').unwrap_or((rest, ""));
            if user.is_empty() {
                return Err("usage: login <user> <password>".to_string());
            }
            HeadlessCommand::Login {
                user: user.to_string(),
                password: password.to_string(),
            }
        }
        "lang" => match Locale::ALL
            .iter()
            .find(|l| l.tag() == rest || l.tag().split('_').next() == Some(rest))
        {
            Some(locale) => HeadlessCommand::Language(*locale),
            None => return Err(format!("unknown language {:?}", rest)),
        },
        other => return Err(format!("unknown command {:?}", other)),
    };
    Ok(Some(parsed))
}

/// Messages that carry out `command` against the current state
fn command_messages(state: &AppState, command: HeadlessCommand) -> Vec<Message> {
    match command {
        HeadlessCommand::AddGroup(label) => {
            let mut messages: Vec<Message> = state
                .groups
                .input
                .chars()
                .map(|_| Message::GroupInputBackspace)
                .collect();
            messages.extend(label.chars().map(Message::GroupInput));
            messages.push(Message::SubmitGroup);
            messages
        }
        HeadlessCommand::RemoveGroup(label) => {
            match state.groups.groups.iter().position(|g| g.label == label) {
                Some(index) => vec![Message::SelectGroup(index), Message::RemoveSelectedGroup],
                None => {
                    warn!("No group labelled {:?}", label);
                    Vec::new()
                }
            }
        }
        HeadlessCommand::Login { user, password } => {
            let mut messages = vec![Message::Logout, Message::LoginStart];
            messages.extend(user.chars().map(Message::LoginInput));
            messages.push(Message::LoginSwitchField);
            messages.extend(password.chars().map(Message::LoginInput));
            messages.push(Message::LoginSubmit);
            messages
        }
        HeadlessCommand::Logout => vec![Message::Logout],
        HeadlessCommand::Language(locale) => {
            vec![Message::SelectLanguage(locale), Message::ApplyLanguage]
        }
        HeadlessCommand::Quit => vec![Message::Quit],
    }
}

/// Run in headless mode - output JSON events instead of TUI
pub async fn run_headless(settings: Settings) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("bcozy starting in HEADLESS mode");
    info!("═══════════════════════════════════════════════════════");

    let mut engine = Engine::new(settings);
    let mut events = engine.subscribe();

    let (cmd_tx, cmd_rx) = mpsc::channel::<HeadlessCommand>(32);
    std::thread::spawn(move || read_stdin_blocking(cmd_tx));

    let result = headless_event_loop(&mut engine, &mut events, cmd_rx).await;

    engine.shutdown().await;
    forward_events(&mut events);

    info!("bcozy headless mode exiting");
    result
}

async fn headless_event_loop(
    engine: &mut Engine,
    events: &mut broadcast::Receiver<EngineEvent>,
    mut cmd_rx: mpsc::Receiver<HeadlessCommand>,
) -> Result<()> {
    let mut drain = tokio::time::interval(DRAIN_INTERVAL);
    drain.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut stdin_open = true;

    while !engine.should_quit() {
        tokio::select! {
            msg = engine.msg_rx.recv() => match msg {
                Some(msg) => engine.process_message(msg),
                None => {
                    info!("Message channel closed");
                    break;
                }
            },
            cmd = cmd_rx.recv(), if stdin_open => match cmd {
                Some(cmd) => {
                    for msg in command_messages(&engine.state, cmd) {
                        engine.process_message(msg);
                    }
                }
                None => {
                    info!("Stdin closed, running until a signal arrives");
                    stdin_open = false;
                }
            },
            _ = drain.tick() => {
                engine.drain_remote_updates();
                engine.process_message(Message::Tick);
            }
        }

        forward_events(events);
    }

    Ok(())
}

fn forward_events(events: &mut broadcast::Receiver<EngineEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => super::emit(&event),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!("Headless output lagged, {} events dropped", skipped);
            }
            Err(_) => break,
        }
    }
}

fn read_stdin_blocking(cmd_tx: mpsc::Sender<HeadlessCommand>) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };
        match parse_command(&line) {
            Ok(Some(cmd)) => {
                let quit = cmd == HeadlessCommand::Quit;
                if cmd_tx.blocking_send(cmd).is_err() || quit {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Ignoring stdin line: {}", e),
        }
    }
    info!("Stdin reader exiting");
}
