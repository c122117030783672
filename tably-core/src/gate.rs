//! Per-step exit validation for the wizard.
//!
//! Pure predicate over a context snapshot; no side effects. Failures are not
//! errors — the sequencer simply refuses to advance and the section
//! highlighting tells the user what is missing.

use crate::mode::MealMode;
use crate::sections::{SectionProgress, SettingsProgress};

/// Snapshot of everything the step gates read
#[derive(Debug, Clone, Copy)]
pub struct GateContext<'a> {
    pub title: &'a str,
    pub mode: Option<MealMode>,
    pub sections: &'a SectionProgress,
    pub settings: &'a SettingsProgress,
}

/// Whether the step's exit condition is satisfied. Unknown step numbers fail
/// closed. Step 3 has no hard exit gate; its forward action routes to
/// submission instead of advancement.
pub fn can_advance(step: u8, ctx: &GateContext<'_>) -> bool {
    match step {
        1 => {
            if ctx.title.trim().is_empty() {
                return false;
            }
            let Some(mode) = ctx.mode else {
                return false;
            };
            let s = ctx.sections;
            match mode {
                MealMode::Cook => s.cooking_ideas,
                MealMode::DineOut => s.outing_options && s.cuisine_choice,
                MealMode::Both => s.outing_options && s.cuisine_choice && s.cooking_ideas,
            }
        }
        2 => ctx.settings.all_done(),
        3 => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(
        title: &'a str,
        mode: Option<MealMode>,
        sections: &'a SectionProgress,
        settings: &'a SettingsProgress,
    ) -> GateContext<'a> {
        GateContext {
            title,
            mode,
            sections,
            settings,
        }
    }

    #[test]
    fn out_of_range_steps_fail_closed() {
        let sections = SectionProgress::default();
        let settings = SettingsProgress::default();
        let full = ctx("Friday Dinner", Some(MealMode::Cook), &sections, &settings);
        assert!(!can_advance(0, &full));
        assert!(!can_advance(4, &full));
        assert!(!can_advance(255, &full));
    }

    #[test]
    fn empty_title_and_no_mode_block_step_one() {
        let sections = SectionProgress::default();
        let settings = SettingsProgress::default();
        assert!(!can_advance(1, &ctx("", None, &sections, &settings)));
        // Whitespace-only titles count as empty.
        assert!(!can_advance(1, &ctx("   ", Some(MealMode::Cook), &sections, &settings)));
        // A title alone is not enough without a mode.
        assert!(!can_advance(1, &ctx("Dinner", None, &sections, &settings)));
    }

    #[test]
    fn dine_out_requires_filters_and_cuisine() {
        let settings = SettingsProgress::default();
        let sections = SectionProgress {
            mode: true,
            outing_options: true,
            cuisine_choice: true,
            ..SectionProgress::default()
        };
        assert!(can_advance(
            1,
            &ctx("Friday Dinner", Some(MealMode::DineOut), &sections, &settings)
        ));

        let partial = SectionProgress {
            mode: true,
            outing_options: true,
            ..SectionProgress::default()
        };
        assert!(!can_advance(
            1,
            &ctx("Friday Dinner", Some(MealMode::DineOut), &partial, &settings)
        ));
    }

    #[test]
    fn both_mode_still_requires_cooking_ideas() {
        let settings = SettingsProgress::default();
        let sections = SectionProgress {
            mode: true,
            outing_options: true,
            cuisine_choice: true,
            cooking_ideas: false,
        };
        assert!(!can_advance(
            1,
            &ctx("Dinner", Some(MealMode::Both), &sections, &settings)
        ));

        let done = SectionProgress {
            cooking_ideas: true,
            ..sections
        };
        assert!(can_advance(1, &ctx("Dinner", Some(MealMode::Both), &done, &settings)));
    }

    #[test]
    fn cook_only_needs_dish_ideas() {
        let settings = SettingsProgress::default();
        let sections = SectionProgress {
            mode: true,
            cooking_ideas: true,
            ..SectionProgress::default()
        };
        assert!(can_advance(
            1,
            &ctx("Soup night", Some(MealMode::Cook), &sections, &settings)
        ));
    }

    #[test]
    fn settings_step_needs_every_key() {
        let sections = SectionProgress::default();
        let mut settings = SettingsProgress {
            access: true,
            timer: true,
            reminders: false,
        };
        assert!(!can_advance(2, &ctx("", None, &sections, &settings)));
        settings.reminders = true;
        assert!(can_advance(2, &ctx("", None, &sections, &settings)));
    }

    #[test]
    fn summary_step_is_always_open() {
        let sections = SectionProgress::default();
        let settings = SettingsProgress::default();
        assert!(can_advance(3, &ctx("", None, &sections, &settings)));
    }
}
