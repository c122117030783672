//! Application state for the single-screen wizard TUI.
//!
//! `App` wraps the core [`WizardController`] and translates key events into
//! controller transitions. The controller returns effect lists; `App`
//! executes them (location writes, scroll, submission hand-off) and surfaces
//! anything the run loop must act on through [`InputResult`].

use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;
use tably_core::client::CreatedRoom;
use tably_core::sections::{self, SectionKey, SettingsKey};
use tably_core::steps::WizardStep;
use tably_core::suggestions;
use tably_core::wizard::{AccessChoice, Effect, WizardController};
use tably_core::{MealMode, SuggestionCategory};

/// Result of handling input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
    /// The user backed out of step 1; return to the outer flow
    Leave,
    /// Kick off room submission
    Submit,
}

/// Fixed dine-out filter options for the basics step
pub const OUTING_FILTERS: &[&str] = &[
    "Walking distance",
    "Budget friendly",
    "Takes reservations",
    "Open late",
];

/// Fixed cuisine options for the basics step
pub const CUISINES: &[&str] = &["Thai", "Italian", "Mexican", "Japanese", "Indian"];

const TIMER_STEP_MINUTES: u16 = 5;
const TIMER_MIN_MINUTES: u16 = 5;
const TIMER_MAX_MINUTES: u16 = 240;

/// Rows of the basics step, top to bottom
pub const BASICS_ROWS: &[BasicsRow] = &[
    BasicsRow::Title,
    BasicsRow::Mode,
    BasicsRow::OutingOptions,
    BasicsRow::CuisineChoice,
    BasicsRow::CookingIdeas,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicsRow {
    Title,
    Mode,
    OutingOptions,
    CuisineChoice,
    CookingIdeas,
}

impl BasicsRow {
    pub fn section_key(self) -> Option<SectionKey> {
        match self {
            BasicsRow::Title => None,
            BasicsRow::Mode => Some(SectionKey::Mode),
            BasicsRow::OutingOptions => Some(SectionKey::OutingOptions),
            BasicsRow::CuisineChoice => Some(SectionKey::CuisineChoice),
            BasicsRow::CookingIdeas => Some(SectionKey::CookingIdeas),
        }
    }
}

/// Application state
pub struct App {
    pub controller: WizardController,
    /// Simulated address bar; internal transitions replace it
    pub location: String,
    /// The enclosing context's copy of the mode (mirror's far side)
    pub context_mode: Option<MealMode>,
    /// Row cursor within the current step
    pub cursor: usize,
    /// Index within the focused row's options
    pub inner: usize,
    /// Dish-idea options; remote suggestions or the built-in fallback
    pub cooking_ideas: Vec<String>,
    /// True when the fallback list is in use because the fetch failed
    pub suggestions_degraded: bool,
    pub status_message: String,
    pub error_message: Option<String>,
    pub created: Option<CreatedRoom>,
    pub show_share_hint: bool,
    pub is_submitting: bool,
}

impl App {
    pub fn new(resume: Option<&str>, context_mode: Option<MealMode>) -> Self {
        let (controller, effects) =
            WizardController::mount(tably_core::WIZARD_ROOT, resume, context_mode);
        let mut app = Self {
            controller,
            location: String::new(),
            context_mode,
            cursor: 0,
            inner: 0,
            cooking_ideas: suggestions::fallback_for(SuggestionCategory::Cooking)
                .iter()
                .map(|s| s.to_string())
                .collect(),
            suggestions_degraded: false,
            status_message: "👋 Welcome! Let's set up your decision room.".to_string(),
            error_message: None,
            created: None,
            show_share_hint: false,
            is_submitting: false,
        };
        // Mount may have redirected the location.
        let _ = app.apply_effects(effects);
        if app.location.is_empty() {
            app.location = tably_core::LocationSync::path_for(app.controller.current_step());
        }
        app
    }

    /// Execute a controller effect list in order. Returns the first outcome
    /// the run loop must handle itself.
    pub fn apply_effects(&mut self, effects: Vec<Effect>) -> InputResult {
        for effect in effects {
            match effect {
                Effect::ScrollToTop => {
                    // The list view's analog of scrolling to the top.
                    self.cursor = 0;
                    self.inner = 0;
                }
                Effect::SyncLocation(path) => self.location = path,
                Effect::LeaveWizard => return InputResult::Leave,
                Effect::Submit => return InputResult::Submit,
                Effect::ShowTitleNotice => {
                    // Rendered from the controller's notice flag.
                }
                Effect::SyncModeToContext(mode) => self.context_mode = mode,
            }
        }
        InputResult::Continue
    }

    /// Drive the controller's timers from the poll loop.
    pub fn tick(&mut self, now: Instant) {
        let effects = self.controller.tick(now);
        let _ = self.apply_effects(effects);
    }

    pub fn handle_input(&mut self, key: KeyEvent, now: Instant) -> InputResult {
        // Keys shared by every step.
        match key.code {
            KeyCode::Enter => {
                if self.is_submitting {
                    return InputResult::Continue;
                }
                let effects = self.controller.advance(now);
                return self.apply_effects(effects);
            }
            KeyCode::Esc => {
                let effects = self.controller.retreat();
                return self.apply_effects(effects);
            }
            KeyCode::F(n @ 1..=3) => {
                if let Some(step) = WizardStep::from_ordinal(n as u8) {
                    let effects = self.controller.jump_to(step);
                    return self.apply_effects(effects);
                }
                return InputResult::Continue;
            }
            _ => {}
        }

        match self.controller.current_step() {
            WizardStep::BasicInfo => self.handle_basics_input(key, now),
            WizardStep::Settings => self.handle_settings_input(key),
            WizardStep::Summary => self.handle_summary_input(key),
        }
    }

    // ------------------------------------------------------------------
    // Step 1: basics
    // ------------------------------------------------------------------

    fn handle_basics_input(&mut self, key: KeyEvent, now: Instant) -> InputResult {
        let editing_title = self.basics_row() == BasicsRow::Title;
        match key.code {
            KeyCode::Up => {
                self.move_cursor(BASICS_ROWS.len(), -1);
                InputResult::Continue
            }
            KeyCode::Down => {
                self.move_cursor(BASICS_ROWS.len(), 1);
                InputResult::Continue
            }
            KeyCode::Left => {
                Self::adjust_index(self.basics_row_len(), &mut self.inner, -1);
                InputResult::Continue
            }
            KeyCode::Right => {
                Self::adjust_index(self.basics_row_len(), &mut self.inner, 1);
                InputResult::Continue
            }
            KeyCode::Backspace if editing_title => {
                let mut title = self.controller.draft.title.clone();
                title.pop();
                self.controller.draft.set_title(title);
                self.controller.recompute_completed_steps();
                InputResult::Continue
            }
            KeyCode::Char(' ') if !editing_title => {
                self.toggle_basics_option(now);
                InputResult::Continue
            }
            KeyCode::Char('q') if !editing_title => InputResult::Quit,
            KeyCode::Char('[') if !editing_title => self.simulate_browser_back(),
            KeyCode::Char(']') if !editing_title => self.simulate_browser_forward(),
            KeyCode::Char(c) if editing_title => {
                let mut title = self.controller.draft.title.clone();
                title.push(c);
                self.controller.draft.set_title(title);
                self.controller.recompute_completed_steps();
                InputResult::Continue
            }
            _ => InputResult::Continue,
        }
    }

    pub fn basics_row(&self) -> BasicsRow {
        BASICS_ROWS[self.cursor.min(BASICS_ROWS.len() - 1)]
    }

    fn basics_row_len(&self) -> usize {
        match self.basics_row() {
            BasicsRow::Title => 0,
            BasicsRow::Mode => MealMode::all().len(),
            BasicsRow::OutingOptions => OUTING_FILTERS.len(),
            BasicsRow::CuisineChoice => CUISINES.len(),
            BasicsRow::CookingIdeas => self.cooking_ideas.len(),
        }
    }

    fn toggle_basics_option(&mut self, now: Instant) {
        let row = self.basics_row();
        if let Some(key) = row.section_key() {
            let title_set = !self.controller.draft.title.trim().is_empty();
            if sections::is_disabled(key, self.controller.mode(), title_set) {
                self.status_message = match key {
                    SectionKey::Mode => "✍️ Name the room first.".to_string(),
                    _ => "🔒 Not part of the current mode.".to_string(),
                };
                return;
            }
        }
        match row {
            BasicsRow::Title => {}
            BasicsRow::Mode => {
                if let Some(mode) = MealMode::all().get(self.inner).copied() {
                    self.controller.select_mode(mode, now);
                }
            }
            BasicsRow::OutingOptions => {
                if let Some(filter) = OUTING_FILTERS.get(self.inner) {
                    self.controller.draft.toggle_outing_filter(filter);
                    self.controller.recompute_completed_steps();
                }
            }
            BasicsRow::CuisineChoice => {
                if let Some(cuisine) = CUISINES.get(self.inner) {
                    self.controller.draft.toggle_cuisine(cuisine);
                    self.controller.recompute_completed_steps();
                }
            }
            BasicsRow::CookingIdeas => {
                if let Some(idea) = self.cooking_ideas.get(self.inner).cloned() {
                    self.controller.draft.toggle_cooking_idea(&idea);
                    self.controller.recompute_completed_steps();
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Step 2: settings
    // ------------------------------------------------------------------

    fn handle_settings_input(&mut self, key: KeyEvent) -> InputResult {
        let rows = SettingsKey::all();
        match key.code {
            KeyCode::Up => {
                self.move_cursor(rows.len(), -1);
                InputResult::Continue
            }
            KeyCode::Down => {
                self.move_cursor(rows.len(), 1);
                InputResult::Continue
            }
            KeyCode::Left => {
                self.adjust_setting(-1);
                InputResult::Continue
            }
            KeyCode::Right | KeyCode::Char(' ') => {
                self.adjust_setting(1);
                InputResult::Continue
            }
            KeyCode::Char('q') => InputResult::Quit,
            KeyCode::Char('[') => self.simulate_browser_back(),
            KeyCode::Char(']') => self.simulate_browser_forward(),
            _ => InputResult::Continue,
        }
    }

    pub fn settings_row(&self) -> SettingsKey {
        SettingsKey::all()[self.cursor.min(SettingsKey::all().len() - 1)]
    }

    fn adjust_setting(&mut self, delta: i16) {
        let row = self.settings_row();
        let draft = &mut self.controller.draft;
        match row {
            SettingsKey::Access => {
                let next = match draft.access {
                    Some(AccessChoice::InviteOnly) => AccessChoice::AnyoneWithLink,
                    Some(AccessChoice::AnyoneWithLink) | None => AccessChoice::InviteOnly,
                };
                draft.choose_access(next);
            }
            SettingsKey::Timer => {
                let current = if draft.timer_minutes == 0 {
                    30
                } else {
                    draft.timer_minutes
                };
                let next = (current as i32 + delta as i32 * TIMER_STEP_MINUTES as i32)
                    .clamp(TIMER_MIN_MINUTES as i32, TIMER_MAX_MINUTES as i32)
                    as u16;
                draft.set_timer_minutes(next);
            }
            SettingsKey::Reminders => {
                let next = !draft.reminders;
                draft.set_reminders(next);
            }
        }
        self.controller.recompute_completed_steps();
    }

    // ------------------------------------------------------------------
    // Step 3: summary
    // ------------------------------------------------------------------

    fn handle_summary_input(&mut self, key: KeyEvent) -> InputResult {
        match key.code {
            KeyCode::Char('q') => InputResult::Quit,
            KeyCode::Char('[') => self.simulate_browser_back(),
            KeyCode::Char(']') => self.simulate_browser_forward(),
            _ => InputResult::Continue,
        }
    }

    // ------------------------------------------------------------------
    // Simulated browser history
    // ------------------------------------------------------------------

    /// Feed a back navigation through the location synchronizer, as a
    /// browser's address bar would. Adopted without a gate check.
    fn simulate_browser_back(&mut self) -> InputResult {
        if let Some(prev) = self.controller.current_step().prev() {
            let path = tably_core::LocationSync::path_for(prev);
            self.location = path.clone();
            let effects = self.controller.observe_location(&path);
            return self.apply_effects(effects);
        }
        InputResult::Continue
    }

    fn simulate_browser_forward(&mut self) -> InputResult {
        if let Some(next) = self.controller.current_step().next() {
            let path = tably_core::LocationSync::path_for(next);
            self.location = path.clone();
            let effects = self.controller.observe_location(&path);
            return self.apply_effects(effects);
        }
        InputResult::Continue
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn move_cursor(&mut self, rows: usize, delta: isize) {
        Self::adjust_index(rows, &mut self.cursor, delta);
        self.inner = 0;
    }

    fn adjust_index(len: usize, index: &mut usize, delta: isize) {
        if len == 0 {
            *index = 0;
            return;
        }
        let len_i = len as isize;
        let mut next = *index as isize + delta;
        if next < 0 {
            next = len_i - 1;
        } else if next >= len_i {
            next = 0;
        }
        *index = next as usize;
    }

    /// Install the fetched dish suggestions, or fall back when the source
    /// failed.
    pub fn set_suggestions(&mut self, fetched: Result<Vec<String>, String>) {
        match fetched {
            Ok(list) if !list.is_empty() => {
                self.cooking_ideas = list;
                self.suggestions_degraded = false;
            }
            Ok(_) | Err(_) => {
                self.cooking_ideas = suggestions::fallback_for(SuggestionCategory::Cooking)
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                self.suggestions_degraded = true;
            }
        }
    }
}
