use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use cinematch_core::{update, AppState, Msg};
use cinematch_engine::EngineHandle;
use engine_logging::{engine_debug, engine_info};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::input::{parse_line, UserInput};
use super::ui;

/// Pace of the message loop when the user is idle.
const TICK_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    engine_logging::initialize(&config.log_destination, config.log_level);
    engine_info!("Starting cinematch with {:?}", config.service);

    let engine = EngineHandle::new(config.service, config.probe).context("failed to start engine")?;
    let mut app = App::new(EffectRunner::new(engine));

    let (input_tx, input_rx) = mpsc::channel::<UserInput>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if input_tx.send(parse_line(&line)).is_err() {
                return;
            }
        }
        let _ = input_tx.send(UserInput::Quit);
    });

    let mut stdout = io::stdout();
    app.present(&mut stdout)?;

    loop {
        let mut inbox = match input_rx.recv_timeout(TICK_INTERVAL) {
            Ok(UserInput::Quit) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Ok(UserInput::Messages(messages)) => messages,
            Err(mpsc::RecvTimeoutError::Timeout) => vec![Msg::Tick],
        };
        inbox.extend(app.effects.drain());

        let mut dirty = false;
        for msg in inbox {
            dirty |= app.dispatch(msg);
        }
        if dirty {
            app.present(&mut stdout)?;
        }
    }

    engine_info!("Shutting down");
    Ok(())
}

struct App {
    state: AppState,
    effects: EffectRunner,
}

impl App {
    fn new(effects: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            effects,
        }
    }

    /// Applies one message and hands its effects to the engine. Returns whether a
    /// re-render is due.
    fn dispatch(&mut self, msg: Msg) -> bool {
        if !matches!(msg, Msg::Tick) {
            engine_debug!("dispatch {:?}", msg);
        }
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.effects.enqueue(effects);
        was_dirty
    }

    fn present(&self, out: &mut impl Write) -> io::Result<()> {
        for line in ui::render::render(&self.state.view()) {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}
