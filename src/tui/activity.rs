//! Activity lifecycle for the TUI.
//!
//! Each screen is an Activity with its own Application instance. The
//! ActivityManager drives the active one until it asks to exit.

use std::io::Stdout;

use color_eyre::eyre::{Result, eyre};
use ratatui::{Terminal, prelude::CrosstermBackend};

use super::activities::MainActivity;
use crate::runtime::Session;

/// Shared context passed to activities.
pub struct Context {
    pub session: Session,
}

/// Exit reasons for activity transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum ExitReason {
    Quit,
}

/// Activity lifecycle trait.
pub trait Activity {
    /// Initialize the activity with context from the manager.
    fn on_create(&mut self, context: Context);

    /// Draw the UI and handle one tick of events.
    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()>;

    /// Returns Some(reason) once the activity wants to exit.
    fn will_umount(&self) -> Option<&ExitReason>;

    /// Clean up and return the context to the manager.
    fn on_destroy(&mut self) -> Option<Context>;
}

/// Manages activity lifecycle.
pub struct ActivityManager {
    context: Option<Context>,
}

impl ActivityManager {
    pub fn new(context: Context) -> Self {
        Self {
            context: Some(context),
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut activity: Box<dyn Activity> = Box::<MainActivity>::default();
        let context = self
            .context
            .take()
            .ok_or_else(|| eyre!("activity context already taken"))?;
        activity.on_create(context);

        loop {
            activity.on_draw(terminal)?;

            if let Some(ExitReason::Quit) = activity.will_umount() {
                self.context = activity.on_destroy();
                return Ok(());
            }
        }
    }
}
