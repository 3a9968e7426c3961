//! user-admin-tui - browse, search, select, delete and edit a remote user list
//!
//! The list is fetched once at startup; every change afterwards lives in
//! memory only.

mod action;
mod app;
mod component;
mod components;
mod config;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::tui::Tui;
use anyhow::Result;
use crossterm::event::Event;
use std::time::Duration;

fn main() -> Result<()> {
    let config = Config::load();
    if let Err(err) = logging::init(&config) {
        eprintln!("Logging disabled: {:#}", err);
    }
    tracing::info!(source = %config.source_url, "starting");

    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    let mut app = App::new(config);
    app.init()?;

    let result = run_app(&mut tui, &mut app);

    tui.exit()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "exiting with error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    tracing::info!("exiting");
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!(error = %e, "draw failed");
            }
        })?;

        let action = match tui.next_event()? {
            Some(Event::Key(key)) => app.handle_key_event(key)?,
            Some(Event::Resize(w, h)) => Some(Action::Resize(w, h)),
            Some(_) => None,
            None => Some(Action::Tick),
        };

        // An action may produce a follow-up action
        let mut current = action;
        while let Some(a) = current {
            current = app.update(a)?;
        }
    }

    Ok(())
}
