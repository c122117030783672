//! Terminal UI for the Tably room wizard.
//!
//! A single-screen ratatui flow driven by the core wizard controller. The
//! run loop owns the terminal, polls input on a short timeout so the
//! controller's timers keep ticking, and runs backend calls on worker
//! threads so the UI never blocks on the network.

mod app;
mod ui;

pub use app::{App, InputResult};

use anyhow::{bail, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::{info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tably_core::cli::Cli;
use tably_core::client::{CreatedRoom, RoomService, SuggestionCategory, SuggestionSource};
use tably_core::hints::{HintStore, SHARE_CODE_HINT};
use tably_core::steps::WizardStep;

/// Run the wizard. Returns the created room, if the user got that far.
pub fn run(cli: &Cli, hints: &mut dyn HintStore) -> Result<Option<CreatedRoom>> {
    if !io::stdout().is_tty() {
        bail!("The Tably wizard needs an interactive terminal (try --dump-tui)");
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(cli.resume_step.as_deref(), cli.mode);
    let result = run_loop(&mut terminal, &mut app, cli, hints);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    cli: &Cli,
    hints: &mut dyn HintStore,
) -> Result<Option<CreatedRoom>> {
    // Dish suggestions load in the background; until they arrive (or fail)
    // the built-in fallback list is already in place.
    let suggestion_rx = if cli.offline {
        None
    } else {
        Some(spawn_suggestion_fetch(&cli.api_base))
    };
    let mut submit_rx: Option<mpsc::Receiver<std::result::Result<CreatedRoom, String>>> = None;

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // Handle input with timeout so timers keep ticking.
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match app.handle_input(key, Instant::now()) {
                    InputResult::Quit => {
                        app.controller.dismiss();
                        return Ok(app.created.clone());
                    }
                    InputResult::Leave => {
                        info!("↩️ Leaving the wizard from step 1");
                        app.controller.dismiss();
                        return Ok(app.created.clone());
                    }
                    InputResult::Submit => {
                        if !app.is_submitting && app.created.is_none() {
                            app.is_submitting = true;
                            let title = app.controller.draft.title.clone();
                            let timer = app.controller.draft.timer_minutes;
                            if cli.offline {
                                let (tx, rx) = mpsc::channel();
                                let _ = tx.send(Ok(mint_offline_room(&title)));
                                submit_rx = Some(rx);
                            } else {
                                submit_rx = Some(spawn_submission(&cli.api_base, title, timer));
                            }
                        }
                    }
                    InputResult::Continue => {}
                }
            }
        }

        app.tick(Instant::now());

        if let Some(rx) = &suggestion_rx {
            if let Ok(fetched) = rx.try_recv() {
                if fetched.is_err() {
                    warn!("🍳 Suggestion fetch failed; using the built-in list");
                }
                app.set_suggestions(fetched);
            }
        }

        if let Some(rx) = submit_rx.take() {
            match rx.try_recv() {
                Err(mpsc::TryRecvError::Empty) => submit_rx = Some(rx),
                Err(mpsc::TryRecvError::Disconnected) => {
                    app.is_submitting = false;
                    submission_failed(app, "submission worker disappeared");
                }
                Ok(result) => {
                    app.is_submitting = false;
                    match result {
                        Ok(room) => {
                            info!("🎉 Room ready: {}", room.share_code);
                            if !hints.has_seen(SHARE_CODE_HINT) {
                                app.show_share_hint = true;
                                hints.mark_seen(SHARE_CODE_HINT)?;
                            }
                            app.error_message = None;
                            app.created = Some(room);
                        }
                        Err(message) => submission_failed(app, &message),
                    }
                }
            }
        }
    }
}

/// No retry; show a generic message and return the user to a safe step.
fn submission_failed(app: &mut App, message: &str) {
    warn!("❌ Room creation failed: {}", message);
    app.error_message =
        Some("Couldn't create the room. Check the basics and try again.".to_string());
    let effects = app.controller.jump_to(WizardStep::BasicInfo);
    let _ = app.apply_effects(effects);
}

fn spawn_suggestion_fetch(
    api_base: &str,
) -> mpsc::Receiver<std::result::Result<Vec<String>, String>> {
    let (tx, rx) = mpsc::channel();
    let base = api_base.to_string();
    std::thread::spawn(move || {
        let result = SuggestionSource::new(&base)
            .and_then(|source| source.fetch(SuggestionCategory::Cooking))
            .map_err(|e| e.to_string());
        let _ = tx.send(result);
    });
    rx
}

fn spawn_submission(
    api_base: &str,
    title: String,
    timer_minutes: u16,
) -> mpsc::Receiver<std::result::Result<CreatedRoom, String>> {
    let (tx, rx) = mpsc::channel();
    let base = api_base.to_string();
    std::thread::spawn(move || {
        let result = RoomService::new(&base)
            .and_then(|service| service.create_room(&title, timer_minutes))
            .map_err(|e| e.to_string());
        let _ = tx.send(result);
    });
    rx
}

/// Deterministic-enough local share code for `--offline` runs.
fn mint_offline_room(title: &str) -> CreatedRoom {
    let mut hasher = DefaultHasher::new();
    title.hash(&mut hasher);
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
        .hash(&mut hasher);
    let code = hasher.finish() & 0xFFFF;
    CreatedRoom {
        room_id: format!("local-{:04x}", code),
        share_code: format!("TABLY-{:04X}", code),
    }
}

/// Print the text render of every step and exit; used by `--dump-tui`.
pub fn dump_all_steps(cli: &Cli) -> Result<()> {
    for step in WizardStep::all() {
        let app = App::new(Some(step.slug()), cli.mode);
        println!("{}", ui::dump_step(&app));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_share_codes_have_the_expected_shape() {
        let room = mint_offline_room("Friday Dinner");
        assert!(room.share_code.starts_with("TABLY-"));
        assert_eq!(room.share_code.len(), "TABLY-".len() + 4);
        assert!(room.room_id.starts_with("local-"));
    }
}
