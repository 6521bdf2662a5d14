use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use engine_logging::{engine_info, engine_warn};
use prep_core::{update, ChecklistState, Msg, Palette};
use prep_engine::EngineHandle;

use crate::commands::{parse_command, Command, HELP};
use crate::effects::EffectRunner;
use crate::render::render;
use crate::settings::{read_session_token, AppSettings, TOKEN_ENV_VAR};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run_app(settings: AppSettings) -> anyhow::Result<()> {
    let token = read_session_token(&settings, std::env::var(TOKEN_ENV_VAR).ok())?;
    let engine = EngineHandle::new(&settings.api_settings(), token)
        .context("failed to start the checklist engine")?;

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    spawn_stdin_reader(cmd_tx);

    let mut app = App::new(EffectRunner::new(engine), settings.palette());
    println!("{HELP}");
    app.dispatch(Msg::UpcomingRequested);
    app.render_if_dirty();

    loop {
        match cmd_rx.recv_timeout(POLL_INTERVAL) {
            Ok(Command::Quit) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::ToggleRow(row)) => app.toggle_row(row),
            Ok(Command::Send(msg)) => app.dispatch(msg),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }
        app.pump_engine();
        app.render_if_dirty();
    }

    engine_info!("Exiting");
    Ok(())
}

fn spawn_stdin_reader(cmd_tx: mpsc::Sender<Command>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_command(&line) {
                Ok(Some(command)) => {
                    if cmd_tx.send(command).is_err() {
                        return;
                    }
                }
                Ok(None) => {}
                Err(err) => println!("{err}"),
            }
        }
        let _ = cmd_tx.send(Command::Quit);
    });
}

struct App {
    state: ChecklistState,
    runner: EffectRunner,
    palette: Palette,
}

impl App {
    fn new(runner: EffectRunner, palette: Palette) -> Self {
        Self {
            state: ChecklistState::new(),
            runner,
            palette,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn toggle_row(&mut self, row: usize) {
        let item_id = self
            .state
            .view()
            .rows
            .into_iter()
            .find(|r| r.number == row)
            .map(|r| r.item_id);
        match item_id {
            Some(item_id) => self.dispatch(Msg::ItemToggled { item_id }),
            None => {
                engine_warn!("Toggle for missing row {}", row);
                println!("No row {row} in the open checklist.");
            }
        }
    }

    fn pump_engine(&mut self) {
        for msg in self.runner.poll() {
            self.dispatch(msg);
        }
    }

    fn render_if_dirty(&mut self) {
        if !self.state.consume_dirty() {
            return;
        }
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "\n{}", render(&self.state.view(), &self.palette));
        let _ = stdout.flush();
    }
}
