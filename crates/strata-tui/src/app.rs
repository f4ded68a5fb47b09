//! App — synchronous, blocking event loop.
//!
//! One frame is drawn, then the loop blocks on the next terminal event.
//! All browsing state lives in the NavigationController; this file maps keys
//! to actions and owns terminal setup/teardown. The render thread runs
//! independently of this loop, so playback continues while we block on input.

use std::io;

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use strata_core::{AudioServer, NavigationController};

use crate::action::Action;
use crate::ui;

pub struct App<S: AudioServer> {
    controller: NavigationController<S>,
}

impl<S: AudioServer> App<S> {
    pub fn new(controller: NavigationController<S>) -> Self {
        Self { controller }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Restore the terminal on every exit path before surfacing errors.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.controller.reap_finished();
            terminal.draw(|frame| ui::draw(frame, &self.controller))?;

            // Blocks until the user does something; resize events fall
            // through to the next draw.
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind == KeyEventKind::Release {
                continue;
            }

            match action_for(key) {
                Some(Action::Quit) => break,
                Some(action) => self.dispatch(action),
                None => {}
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, action: Action) {
        debug!("action: {action:?}");
        let c = &mut self.controller;
        match action {
            Action::SelectUp(n) => c.select_up(n),
            Action::SelectDown(n) => c.select_down(n),
            Action::SelectFirst => c.select_first(),
            Action::SelectLast => c.select_last(),
            Action::Shallower => {
                c.move_shallower();
            }
            Action::Deeper => {
                c.move_deeper();
            }
            Action::Activate => c.activate(),
            Action::Stop => c.stop(),
            Action::Quit => {}
        }
    }
}

fn action_for(key: KeyEvent) -> Option<Action> {
    let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
        5
    } else {
        1
    };
    let action = match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Action::SelectUp(step),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Action::SelectDown(step),
        KeyCode::PageUp => Action::SelectUp(10),
        KeyCode::PageDown => Action::SelectDown(10),
        KeyCode::Home | KeyCode::Char('g') => Action::SelectFirst,
        KeyCode::End | KeyCode::Char('G') => Action::SelectLast,
        KeyCode::Left | KeyCode::Char('h') => Action::Shallower,
        KeyCode::Right | KeyCode::Char('l') => Action::Deeper,
        KeyCode::Enter | KeyCode::Char(' ') => Action::Activate,
        KeyCode::Char('s') => Action::Stop,
        _ => return None,
    };
    Some(action)
}
