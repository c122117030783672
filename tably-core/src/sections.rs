//! Sub-section completion tracking for the basics step.
//!
//! Step 1 is made of four sections whose relevance depends on the chosen
//! [`MealMode`]. Dependencies between sections are a small fixed table, so
//! they are written out as explicit matches rather than a generic graph.

use crate::mode::MealMode;

// ============================================================================
// Section keys
// ============================================================================

/// Named sub-sections of the basics step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKey {
    /// "Cook / dine out / both" selector
    Mode,
    /// Dine-out filters (budget, distance, ...)
    OutingOptions,
    /// Cuisine category picks for dining out
    CuisineChoice,
    /// Dish ideas for cooking at home
    CookingIdeas,
}

impl SectionKey {
    pub fn all() -> &'static [SectionKey] {
        &[
            SectionKey::Mode,
            SectionKey::OutingOptions,
            SectionKey::CuisineChoice,
            SectionKey::CookingIdeas,
        ]
    }

    pub fn title(self) -> &'static str {
        match self {
            SectionKey::Mode => "How do you want to eat?",
            SectionKey::OutingOptions => "Dine-out filters",
            SectionKey::CuisineChoice => "Cuisine",
            SectionKey::CookingIdeas => "Dish ideas",
        }
    }
}

/// Completion flags for the basics-step sections. All keys always present,
/// default false. Setting a flag never infers dependents; callers recompute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionProgress {
    pub mode: bool,
    pub outing_options: bool,
    pub cuisine_choice: bool,
    pub cooking_ideas: bool,
}

impl SectionProgress {
    pub fn get(&self, key: SectionKey) -> bool {
        match key {
            SectionKey::Mode => self.mode,
            SectionKey::OutingOptions => self.outing_options,
            SectionKey::CuisineChoice => self.cuisine_choice,
            SectionKey::CookingIdeas => self.cooking_ideas,
        }
    }

    pub fn set(&mut self, key: SectionKey, value: bool) {
        match key {
            SectionKey::Mode => self.mode = value,
            SectionKey::OutingOptions => self.outing_options = value,
            SectionKey::CuisineChoice => self.cuisine_choice = value,
            SectionKey::CookingIdeas => self.cooking_ideas = value,
        }
    }
}

// ============================================================================
// Settings keys (step 2 only)
// ============================================================================

/// Independent completion map for the settings step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsKey {
    /// Who may join the room
    Access,
    /// How long the group has to decide
    Timer,
    /// Remind participants before the deadline
    Reminders,
}

impl SettingsKey {
    pub fn all() -> &'static [SettingsKey] {
        &[SettingsKey::Access, SettingsKey::Timer, SettingsKey::Reminders]
    }

    pub fn title(self) -> &'static str {
        match self {
            SettingsKey::Access => "Who can join",
            SettingsKey::Timer => "Decision timer",
            SettingsKey::Reminders => "Deadline reminders",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsProgress {
    pub access: bool,
    pub timer: bool,
    pub reminders: bool,
}

impl SettingsProgress {
    pub fn get(&self, key: SettingsKey) -> bool {
        match key {
            SettingsKey::Access => self.access,
            SettingsKey::Timer => self.timer,
            SettingsKey::Reminders => self.reminders,
        }
    }

    pub fn set(&mut self, key: SettingsKey, value: bool) {
        match key {
            SettingsKey::Access => self.access = value,
            SettingsKey::Timer => self.timer = value,
            SettingsKey::Reminders => self.reminders = value,
        }
    }

    pub fn all_done(&self) -> bool {
        self.access && self.timer && self.reminders
    }
}

// ============================================================================
// Relevance and dependency policy
// ============================================================================

/// Which sections apply under which mode. The mode selector itself is always
/// relevant, including before any mode has been chosen.
pub fn is_relevant(key: SectionKey, mode: Option<MealMode>) -> bool {
    match key {
        SectionKey::Mode => true,
        SectionKey::OutingOptions | SectionKey::CuisineChoice => {
            mode.is_some_and(|m| m.wants_dining_out())
        }
        SectionKey::CookingIdeas => mode.is_some_and(|m| m.wants_cooking()),
    }
}

/// Fixed prerequisite edges between sections. Under `Both`, cuisine waits for
/// the outing filters and dish ideas wait for the cuisine picks; otherwise a
/// chosen mode is the only prerequisite.
fn prerequisites_met(key: SectionKey, mode: Option<MealMode>, progress: &SectionProgress) -> bool {
    match key {
        SectionKey::Mode => true,
        SectionKey::OutingOptions => progress.mode,
        SectionKey::CuisineChoice => {
            if mode == Some(MealMode::Both) {
                progress.outing_options
            } else {
                progress.mode
            }
        }
        SectionKey::CookingIdeas => {
            if mode == Some(MealMode::Both) {
                progress.mode && progress.cuisine_choice
            } else {
                progress.mode
            }
        }
    }
}

/// True when the section is the next actionable one: relevant, not yet
/// complete, and every prerequisite section already complete.
pub fn is_highlighted(key: SectionKey, mode: Option<MealMode>, progress: &SectionProgress) -> bool {
    is_relevant(key, mode) && !progress.get(key) && prerequisites_met(key, mode, progress)
}

/// True when the section cannot be interacted with: it does not apply to the
/// current mode, or the room title has not been set yet.
pub fn is_disabled(key: SectionKey, mode: Option<MealMode>, title_set: bool) -> bool {
    !is_relevant(key, mode) || !title_set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_section_is_always_relevant() {
        assert!(is_relevant(SectionKey::Mode, None));
        for mode in MealMode::all() {
            assert!(is_relevant(SectionKey::Mode, Some(*mode)));
        }
    }

    #[test]
    fn relevance_follows_the_mode() {
        assert!(!is_relevant(SectionKey::OutingOptions, Some(MealMode::Cook)));
        assert!(is_relevant(SectionKey::OutingOptions, Some(MealMode::DineOut)));
        assert!(is_relevant(SectionKey::CuisineChoice, Some(MealMode::Both)));
        assert!(is_relevant(SectionKey::CookingIdeas, Some(MealMode::Cook)));
        assert!(!is_relevant(SectionKey::CookingIdeas, Some(MealMode::DineOut)));
        for key in SectionKey::all() {
            if *key != SectionKey::Mode {
                assert!(!is_relevant(*key, None));
            }
        }
    }

    #[test]
    fn highlight_points_at_the_next_actionable_section() {
        let mut progress = SectionProgress::default();
        let mode = Some(MealMode::DineOut);

        // Nothing chosen yet: only the mode selector is actionable.
        assert!(is_highlighted(SectionKey::Mode, None, &progress));
        assert!(!is_highlighted(SectionKey::OutingOptions, None, &progress));

        progress.mode = true;
        assert!(!is_highlighted(SectionKey::Mode, mode, &progress));
        assert!(is_highlighted(SectionKey::OutingOptions, mode, &progress));
        // Dine-out only: cuisine waits on mode, not on the outing filters.
        assert!(is_highlighted(SectionKey::CuisineChoice, mode, &progress));
    }

    #[test]
    fn both_mode_chains_cuisine_behind_outing_options() {
        let mut progress = SectionProgress {
            mode: true,
            ..SectionProgress::default()
        };
        let mode = Some(MealMode::Both);

        assert!(!is_highlighted(SectionKey::CuisineChoice, mode, &progress));
        assert!(!is_highlighted(SectionKey::CookingIdeas, mode, &progress));

        progress.outing_options = true;
        assert!(is_highlighted(SectionKey::CuisineChoice, mode, &progress));
        assert!(!is_highlighted(SectionKey::CookingIdeas, mode, &progress));

        progress.cuisine_choice = true;
        assert!(is_highlighted(SectionKey::CookingIdeas, mode, &progress));
    }

    #[test]
    fn disabled_without_a_title_or_relevance() {
        assert!(is_disabled(SectionKey::Mode, None, false));
        assert!(!is_disabled(SectionKey::Mode, None, true));
        assert!(is_disabled(SectionKey::CookingIdeas, Some(MealMode::DineOut), true));
        assert!(!is_disabled(SectionKey::CookingIdeas, Some(MealMode::Cook), true));
    }

    #[test]
    fn progress_maps_default_false_and_round_trip() {
        let mut sections = SectionProgress::default();
        for key in SectionKey::all() {
            assert!(!sections.get(*key));
            sections.set(*key, true);
            assert!(sections.get(*key));
        }

        let mut settings = SettingsProgress::default();
        assert!(!settings.all_done());
        for key in SettingsKey::all() {
            settings.set(*key, true);
        }
        assert!(settings.all_done());
    }
}
