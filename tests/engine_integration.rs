//! End-to-end tests driving the Engine against an in-process middleware

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::timeout;

use bcozy_app::config::{init_config_file, load_settings, Settings};
use bcozy_app::{Engine, EngineEvent, Message};
use bcozy_core::{Locale, UnitKind, UNKNOWN_ID};
use bcozy_remote::sim::{InMemoryGroupBackend, SimulatedUnit, StaticUserRegistry};
use bcozy_remote::test_utils::{power_snapshot, power_unit};
use bcozy_remote::{serve_groups, Middleware, UnitRemote};

const STEP_TIMEOUT: Duration = Duration::from_secs(2);

struct Home {
    kettle: Arc<SimulatedUnit>,
    spare: Arc<SimulatedUnit>,
    middleware: Middleware,
}

fn home() -> Home {
    let kettle = power_unit("pcs-kettle", 0.0);
    let spare = Arc::new(SimulatedUnit::without_data(
        "pcs-spare",
        UnitKind::PowerConsumptionSensor,
    ));
    let backend = InMemoryGroupBackend::with_groups(["Admins"]).refuse("Guests");
    let middleware = Middleware {
        units: vec![
            kettle.clone() as Arc<dyn UnitRemote>,
            spare.clone() as Arc<dyn UnitRemote>,
        ],
        groups: serve_groups(backend),
        users: Arc::new(StaticUserRegistry::new([("Ada", "secret")])),
    };
    Home {
        kettle,
        spare,
        middleware,
    }
}

/// Feed queued messages into the engine until `done` holds
async fn pump_until(engine: &mut Engine, done: impl Fn(&Engine) -> bool) {
    while !done(engine) {
        let msg = timeout(STEP_TIMEOUT, engine.msg_rx.recv())
            .await
            .expect("engine stalled")
            .expect("message channel closed");
        engine.process_message(msg);
    }
}

fn collect(rx: &mut broadcast::Receiver<EngineEvent>) -> Vec<EngineEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn type_group(engine: &mut Engine, label: &str) {
    for c in label.chars() {
        engine.process_message(Message::GroupInput(c));
    }
    engine.process_message(Message::SubmitGroup);
}

fn has_group(engine: &Engine, label: &str) -> bool {
    engine.state.groups.groups.iter().any(|g| g.label == label)
}

#[tokio::test]
async fn test_startup_shows_placeholder_for_unsynchronized_unit() {
    let home = home();
    let engine = Engine::with_middleware(Settings::default(), home.middleware.clone());

    let titles: Vec<_> = engine
        .state
        .board
        .panes()
        .iter()
        .map(|p| p.display().title.clone())
        .collect();
    assert_eq!(titles, vec!["Test Outlet".to_string(), UNKNOWN_ID.to_string()]);
    assert_eq!(home.spare.observer_count(), 1);
    assert!(has_group(&engine, "Admins"));
}

#[tokio::test]
async fn test_pushed_power_draw_toggles_activity() {
    let home = home();
    let mut engine = Engine::with_middleware(Settings::default(), home.middleware.clone());
    let mut events = engine.subscribe();

    home.kettle.publish(power_snapshot("pcs-kettle", "Kettle", 17.5));
    engine.drain_remote_updates();
    home.kettle.publish(power_snapshot("pcs-kettle", "Kettle", 0.0));
    engine.drain_remote_updates();

    let activity: Vec<_> = collect(&mut events)
        .into_iter()
        .filter_map(|e| match e {
            EngineEvent::UnitUpdated {
                headline, active, ..
            } => Some((headline, active)),
            _ => None,
        })
        .collect();
    assert_eq!(
        activity,
        vec![("17.5 W".to_string(), true), ("0.0 W".to_string(), false)]
    );
}

#[tokio::test]
async fn test_add_group_updates_table_and_clears_input() {
    let home = home();
    let mut engine = Engine::with_middleware(Settings::default(), home.middleware.clone());
    let mut events = engine.subscribe();

    type_group(&mut engine, "Kitchen");
    assert!(engine.state.groups.is_busy());
    pump_until(&mut engine, |e| {
        !e.state.groups.is_busy() && has_group(e, "Kitchen")
    })
    .await;

    assert!(engine.state.groups.input.is_empty());
    assert!(!engine.state.groups.input_invalid);
    assert!(collect(&mut events).iter().any(
        |e| matches!(e, EngineEvent::GroupsChanged { groups } if groups.contains(&"Kitchen".to_string()))
    ));
}

#[tokio::test]
async fn test_refused_group_keeps_input_and_reports() {
    let home = home();
    let mut engine = Engine::with_middleware(Settings::default(), home.middleware.clone());
    let mut events = engine.subscribe();

    type_group(&mut engine, "Guests");
    pump_until(&mut engine, |e| !e.state.groups.is_busy()).await;

    assert_eq!(engine.state.groups.input, "Guests");
    assert!(engine.state.groups.input_invalid);
    assert!(!has_group(&engine, "Guests"));
    assert!(collect(&mut events).iter().any(|e| matches!(
        e,
        EngineEvent::NoticeShown { text, severity } if severity == "error" && text.starts_with("Could not save")
    )));
}

#[tokio::test]
async fn test_empty_group_name_never_reaches_registry() {
    let home = home();
    let mut engine = Engine::with_middleware(Settings::default(), home.middleware.clone());

    type_group(&mut engine, "   ");

    assert!(!engine.state.groups.is_busy());
    assert!(engine.state.groups.input_invalid);
    assert_eq!(engine.state.groups.groups.len(), 1);
}

#[tokio::test]
async fn test_remove_group() {
    let home = home();
    let mut engine = Engine::with_middleware(Settings::default(), home.middleware.clone());

    engine.process_message(Message::SelectGroup(0));
    engine.process_message(Message::RemoveSelectedGroup);
    pump_until(&mut engine, |e| {
        !e.state.groups.is_busy() && !has_group(e, "Admins")
    })
    .await;

    assert!(engine.state.groups.groups.is_empty());
}

#[tokio::test]
async fn test_login_and_logout() {
    let home = home();
    let mut engine = Engine::with_middleware(Settings::default(), home.middleware.clone());
    let mut events = engine.subscribe();

    engine.process_message(Message::LoginStart);
    for c in "Ada".chars() {
        engine.process_message(Message::LoginInput(c));
    }
    engine.process_message(Message::LoginSwitchField);
    for c in "secret".chars() {
        engine.process_message(Message::LoginInput(c));
    }
    engine.process_message(Message::LoginSubmit);
    pump_until(&mut engine, |e| !e.state.login.authenticating).await;

    assert_eq!(engine.state.login.logged_in_user.as_deref(), Some("Ada"));

    engine.process_message(Message::Logout);
    assert!(engine.state.login.logged_in_user.is_none());

    let session: Vec<_> = collect(&mut events)
        .into_iter()
        .filter(|e| matches!(e, EngineEvent::LoggedIn { .. } | EngineEvent::LoggedOut { .. }))
        .collect();
    assert_eq!(
        session,
        vec![
            EngineEvent::LoggedIn { user: "Ada".into() },
            EngineEvent::LoggedOut { user: "Ada".into() },
        ]
    );
}

#[tokio::test]
async fn test_wrong_password_marks_input() {
    let home = home();
    let mut engine = Engine::with_middleware(Settings::default(), home.middleware.clone());

    engine.process_message(Message::LoginStart);
    for c in "Ada".chars() {
        engine.process_message(Message::LoginInput(c));
    }
    engine.process_message(Message::LoginSubmit);
    pump_until(&mut engine, |e| !e.state.login.authenticating).await;

    assert!(engine.state.login.logged_in_user.is_none());
    assert!(engine.state.login.input_wrong);
}

#[tokio::test]
async fn test_shutdown_releases_every_observer() {
    let home = home();
    let mut engine = Engine::with_middleware(Settings::default(), home.middleware.clone());
    let mut events = engine.subscribe();

    engine.shutdown().await;

    assert_eq!(home.kettle.observer_count(), 0);
    assert_eq!(home.spare.observer_count(), 0);
    assert!(collect(&mut events).contains(&EngineEvent::Shutdown));
}

#[tokio::test]
async fn test_config_file_drives_engine_locale() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("bcozy").join("config.toml");

    assert!(init_config_file(&path).unwrap());
    assert!(!init_config_file(&path).unwrap());
    assert_eq!(load_settings(&path).ui.language, Locale::English);

    std::fs::write(&path, "[ui]\nlanguage = \"de\"\n").unwrap();
    let settings = load_settings(&path);
    let home = home();
    let engine = Engine::with_middleware(settings, home.middleware.clone());
    assert_eq!(engine.state.localization.locale(), Locale::German);
}
