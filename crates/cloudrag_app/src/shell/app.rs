use std::io::{self, Write};
use std::sync::mpsc;

use cloudrag_core::{update, AppState, Msg};
use engine_logging::{engine_debug, engine_info};

use super::effects::EffectRunner;
use super::input::{self, Command};
use super::{render, ShellEvent};

pub(crate) struct Shell<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
    input_closed: bool,
}

impl<W: Write> Shell<W> {
    pub(crate) fn new(runner: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::new(),
            runner,
            out,
            input_closed: false,
        }
    }

    /// Process events until `quit`, or until input is closed and nothing is in flight.
    pub(crate) fn run(&mut self, rx: mpsc::Receiver<ShellEvent>) -> anyhow::Result<()> {
        let initial = self.state.view();
        write!(self.out, "{}", render::render(&initial))?;
        self.prompt_if_idle()?;

        while let Ok(event) = rx.recv() {
            match event {
                ShellEvent::Line(line) => {
                    if !self.handle_line(&line)? {
                        break;
                    }
                }
                ShellEvent::InputClosed => self.input_closed = true,
                ShellEvent::Msg(msg) => {
                    self.trace_stale(&msg);
                    self.apply(vec![msg])?;
                    self.prompt_if_idle()?;
                }
            }
            if self.input_closed && !self.state.is_loading() {
                break;
            }
        }

        engine_info!("Shell exiting");
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.out
    }

    /// Returns `false` when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> io::Result<bool> {
        match input::parse(line) {
            Ok(Command::Quit) => return Ok(false),
            Ok(Command::Help) => writeln!(self.out, "{}", input::HELP)?,
            Ok(command) if command.is_action() && self.state.is_loading() => {
                engine_debug!("Ignoring `{}` while another request is in flight", line.trim());
                writeln!(self.out, "{}", render::busy_line(&self.state.view()))?;
            }
            Ok(Command::Actions(msgs)) => self.apply(msgs)?,
            Err(hint) => writeln!(self.out, "{hint}")?,
        }
        self.prompt_if_idle()?;
        Ok(true)
    }

    /// Run messages through `update`, hand effects to the engine, render once.
    fn apply(&mut self, msgs: Vec<Msg>) -> io::Result<()> {
        let mut changed = false;
        for msg in msgs {
            let state = std::mem::take(&mut self.state);
            let (mut state, effects) = update(state, msg);
            changed |= state.consume_dirty();
            self.state = state;
            self.runner.enqueue(effects);
        }

        if changed {
            let view = self.state.view();
            write!(self.out, "{}", render::render(&view))?;
        }
        Ok(())
    }

    fn trace_stale(&self, msg: &Msg) {
        if let Msg::ActionCompleted { request_id, .. } = msg {
            if self.state.pending_request_id() != Some(*request_id) {
                engine_debug!("Dropping stale completion for request {}", request_id);
            }
        }
    }

    fn prompt_if_idle(&mut self) -> io::Result<()> {
        if !self.state.is_loading() && !self.input_closed {
            write!(self.out, "{}", render::PROMPT)?;
        }
        self.out.flush()
    }
}
