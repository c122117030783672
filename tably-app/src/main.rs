use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use tably_core::cli::{Cli, Command};
use tably_core::client::{RoomService, SuggestionCategory, SuggestionSource};
use tably_core::hints::JsonHintStore;
use tably_core::suggestions;

fn main() -> Result<()> {
    let cli = Cli::parse();
    tably_core::logging::init_with(cli.log_file.clone());

    if cli.dump_tui {
        tably_tui::dump_all_steps(&cli)?;
        return Ok(());
    }

    match &cli.command {
        // No subcommand = launch the wizard (default)
        None => {
            info!("🎉 Launching the Tably room wizard...");
            let mut hints = JsonHintStore::load(hint_path(&cli))?;
            match tably_tui::run(&cli, &mut hints)? {
                Some(room) => {
                    println!("🎉 Room created: {}", room.room_id);
                    println!("🔑 Share code: {}", room.share_code);
                }
                None => info!("👋 Wizard closed without creating a room"),
            }
        }
        // Scripting mode: create a room straight from flags
        Some(Command::Create { title, timer_minutes }) => {
            info!("🏠 Creating room from the command line...");
            let service = RoomService::new(&cli.api_base)?;
            let room = service.create_room(title, *timer_minutes)?;
            println!("{}", room.share_code);
        }
        Some(Command::Suggest { category }) => {
            let category = SuggestionCategory::from_str_loose(category)
                .unwrap_or(SuggestionCategory::General);
            let list = if cli.offline {
                suggestions::fallback_for(category)
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            } else {
                SuggestionSource::new(&cli.api_base)
                    .and_then(|source| source.fetch(category))
                    .unwrap_or_else(|_| {
                        suggestions::fallback_for(category)
                            .iter()
                            .map(|s| s.to_string())
                            .collect()
                    })
            };
            for item in list {
                println!("{}", item);
            }
        }
    }
    Ok(())
}

/// Durable location for the one-time hint flags.
fn hint_path(cli: &Cli) -> PathBuf {
    if let Some(path) = &cli.hint_file {
        return path.clone();
    }
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".config/tably/hints.json"),
        None => std::env::temp_dir().join("tably-hints.json"),
    }
}
