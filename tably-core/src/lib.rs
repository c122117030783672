//! 🍽️ Tably core library.
//!
//! `tably-core` holds the room wizard controller — step sequencing, per-step
//! validation gating, the section dependency table, the debounced mode
//! mirror, and location synchronization — plus the clients for the backend
//! collaborators. Presentation lives in `tably-tui`.

pub mod cli;
pub mod client;
pub mod errors;
pub mod gate;
pub mod hints;
pub mod location;
pub mod logging;
pub mod mirror;
pub mod mode;
pub mod sections;
pub mod steps;
pub mod suggestions;
pub mod wizard;

pub use client::{CreatedRoom, RoomService, SuggestionCategory, SuggestionSource};
pub use errors::{Result, TablyError};
pub use gate::{can_advance, GateContext};
pub use location::{ExternalChange, LocationSync, WIZARD_ROOT};
pub use mirror::{MirrorAction, ModeMirror, MODE_SYNC_DEBOUNCE};
pub use mode::MealMode;
pub use sections::{SectionKey, SectionProgress, SettingsKey, SettingsProgress};
pub use steps::WizardStep;
pub use wizard::{AccessChoice, Effect, RoomDraft, WizardController, WizardState};
