//! Headless mode - JSON event output without a terminal UI
//!
//! Engine events are written to stdout as NDJSON, one object per line,
//! each carrying an `event` tag and a millisecond `timestamp`:
//!
//! ```json
//! {"event":"unit_updated","pane_id":3,"unit_id":"pcs-living-tv","title":"TV","headline":"87.5 W","active":true,"timestamp":1704700001000}
//! {"event":"groups_changed","groups":["Admins","Kitchen"],"timestamp":1704700002000}
//! ```
//!
//! Commands are read from stdin, one per line:
//!
//! | Command | Effect |
//! |---------|--------|
//! | `add <label>` | Add an authorization group |
//! | `remove <label>` | Remove the group with that label |
//! | `login <user> <password>` | Log in |
//! | `logout` | Log out |
//! | `lang <en\|de>` | Switch the display language |
//! | `q`, `quit` | Exit |

pub mod runner;

use std::io::{self, Write};

use chrono::Utc;
use serde::Serialize;
use tracing::error;

use bcozy_app::EngineEvent;

#[derive(Serialize)]
struct HeadlessLine<'a> {
    #[serde(flatten)]
    event: &'a EngineEvent,
    timestamp: i64,
}

/// Write `event` to stdout as one JSON line
pub fn emit(event: &EngineEvent) {
    let line = HeadlessLine {
        event,
        timestamp: Utc::now().timestamp_millis(),
    };
    match serde_json::to_string(&line) {
        Ok(json) => {
            let mut stdout = io::stdout().lock();
            if writeln!(stdout, "{}", json).and_then(|_| stdout.flush()).is_err() {
                error!("Failed to write headless event to stdout");
            }
        }
        Err(e) => error!("Failed to serialize headless event: {}", e),
    }
}
