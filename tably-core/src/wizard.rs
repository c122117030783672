//! Step sequencer and wizard controller.
//!
//! The controller owns the current step, the navigation direction, the set of
//! steps ever completed, and the "reached the summary" unlock flag. Every
//! transition is synchronous and returns an ordered list of [`Effect`]s for
//! the host to execute, so follow-on side effects (scroll, location write,
//! submission) stay explicit and testable instead of hiding in callbacks.
//!
//! Ordering inside one transition is fixed: completion recompute, then gate
//! evaluation, then location write.

use crate::gate::{can_advance, GateContext};
use crate::location::{ExternalChange, LocationSync};
use crate::mirror::{MirrorAction, ModeMirror};
use crate::mode::MealMode;
use crate::sections::{SectionKey, SectionProgress, SettingsKey, SettingsProgress};
use crate::steps::WizardStep;
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

/// How long the missing-title notice stays up before auto-clearing
pub const TITLE_NOTICE_TTL: Duration = Duration::from_millis(500);

// ============================================================================
// Draft
// ============================================================================

/// Who may join the room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessChoice {
    InviteOnly,
    AnyoneWithLink,
}

impl AccessChoice {
    pub fn label(self) -> &'static str {
        match self {
            AccessChoice::InviteOnly => "Invite only",
            AccessChoice::AnyoneWithLink => "Anyone with the link",
        }
    }
}

/// The room configuration being assembled. The two completion maps live here
/// alongside the concrete values; `completed_steps` is always recomputed from
/// these fields, never maintained incrementally.
#[derive(Debug, Clone, Default)]
pub struct RoomDraft {
    pub title: String,
    pub outing_filters: Vec<String>,
    pub cuisines: Vec<String>,
    pub cooking_ideas: Vec<String>,
    pub access: Option<AccessChoice>,
    pub timer_minutes: u16,
    pub reminders: bool,
    pub sections: SectionProgress,
    pub settings: SettingsProgress,
}

impl RoomDraft {
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn toggle_outing_filter(&mut self, filter: &str) {
        Self::toggle(&mut self.outing_filters, filter);
        self.sections
            .set(SectionKey::OutingOptions, !self.outing_filters.is_empty());
    }

    pub fn toggle_cuisine(&mut self, cuisine: &str) {
        Self::toggle(&mut self.cuisines, cuisine);
        self.sections
            .set(SectionKey::CuisineChoice, !self.cuisines.is_empty());
    }

    pub fn toggle_cooking_idea(&mut self, idea: &str) {
        Self::toggle(&mut self.cooking_ideas, idea);
        self.sections
            .set(SectionKey::CookingIdeas, !self.cooking_ideas.is_empty());
    }

    pub fn choose_access(&mut self, access: AccessChoice) {
        self.access = Some(access);
        self.settings.set(SettingsKey::Access, true);
    }

    pub fn set_timer_minutes(&mut self, minutes: u16) {
        self.timer_minutes = minutes;
        self.settings.set(SettingsKey::Timer, true);
    }

    pub fn set_reminders(&mut self, enabled: bool) {
        self.reminders = enabled;
        self.settings.set(SettingsKey::Reminders, true);
    }

    fn toggle(list: &mut Vec<String>, item: &str) {
        if let Some(pos) = list.iter().position(|x| x == item) {
            list.remove(pos);
        } else {
            list.push(item.to_string());
        }
    }
}

// ============================================================================
// Wizard state
// ============================================================================

/// Navigation state of the wizard proper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    pub current: WizardStep,
    /// -1 backward, 0 initial, +1 forward; drives transition orientation
    pub direction: i8,
    /// Ordinals of steps whose exit condition has been satisfied; derived,
    /// replaced wholesale on recompute
    pub completed: BTreeSet<u8>,
    /// Set once the summary step has been reached; unlocks forward jumps
    pub reached_summary: bool,
}

/// Post-transition commands the host must execute, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Scroll the presentation back to the top of the step
    ScrollToTop,
    /// Write this path to the external location (replace, not push)
    SyncLocation(String),
    /// The user backed out of step 1; hand control to the outer flow
    LeaveWizard,
    /// Forward action on the summary step; run submission
    Submit,
    /// Show the transient missing-title hint
    ShowTitleNotice,
    /// The debounced mirror decided to push the mode to the enclosing context
    SyncModeToContext(Option<MealMode>),
}

// ============================================================================
// Controller
// ============================================================================

pub struct WizardController {
    pub draft: RoomDraft,
    state: WizardState,
    mirror: ModeMirror,
    location: LocationSync,
    title_notice: bool,
    notice_deadline: Option<Instant>,
}

impl WizardController {
    /// Mount the wizard. The resume segment (if any) wins over the location;
    /// a missing or unknown segment redirects to step 1. The context may seed
    /// the initial mode.
    pub fn mount(
        location: &str,
        resume: Option<&str>,
        context_mode: Option<MealMode>,
    ) -> (Self, Vec<Effect>) {
        let mut sync = LocationSync::new();
        let (step, redirect) = sync.initial_step(location, resume);

        let mut draft = RoomDraft::default();
        draft.sections.set(SectionKey::Mode, context_mode.is_some());

        let controller = Self {
            draft,
            state: WizardState {
                current: step,
                direction: 0,
                completed: BTreeSet::new(),
                reached_summary: step.is_last(),
            },
            mirror: ModeMirror::new(context_mode),
            location: sync,
            title_notice: false,
            notice_deadline: None,
        };
        let effects = match redirect {
            Some(path) => vec![Effect::SyncLocation(path)],
            None => Vec::new(),
        };
        (controller, effects)
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.current
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn mode(&self) -> Option<MealMode> {
        self.mirror.local()
    }

    pub fn title_notice(&self) -> bool {
        self.title_notice
    }

    fn gate_context(&self) -> GateContext<'_> {
        GateContext {
            title: &self.draft.title,
            mode: self.mirror.local(),
            sections: &self.draft.sections,
            settings: &self.draft.settings,
        }
    }

    /// Whether the current step's exit condition is currently satisfied
    pub fn can_leave_current(&self) -> bool {
        can_advance(self.state.current.ordinal(), &self.gate_context())
    }

    fn is_step_complete(&self, step: WizardStep) -> bool {
        // The summary never reads as "complete"; it is reachable again via
        // the reached_summary unlock instead.
        if step.is_last() {
            return false;
        }
        can_advance(step.ordinal(), &self.gate_context())
    }

    /// Full from-scratch recompute of the completed-step set. The stored set
    /// is replaced only when the fresh one differs element-for-element, so an
    /// unchanged recompute causes no downstream churn. Returns whether the
    /// set changed.
    pub fn recompute_completed_steps(&mut self) -> bool {
        let fresh: BTreeSet<u8> = WizardStep::all()
            .iter()
            .filter(|step| self.is_step_complete(**step))
            .map(|step| step.ordinal())
            .collect();
        if fresh == self.state.completed {
            return false;
        }
        self.state.completed = fresh;
        true
    }

    /// Move forward out of the current step, if its gate allows it. On the
    /// summary step the forward action routes to submission instead. A failed
    /// step-1 attempt with an empty title arms the transient notice; all
    /// other gate failures are silent (the section highlight communicates).
    pub fn advance(&mut self, now: Instant) -> Vec<Effect> {
        self.recompute_completed_steps();
        let current = self.state.current;
        if current.is_last() {
            return vec![Effect::Submit];
        }
        if !can_advance(current.ordinal(), &self.gate_context()) {
            if current == WizardStep::BasicInfo && self.draft.title.trim().is_empty() {
                self.title_notice = true;
                self.notice_deadline = Some(now + TITLE_NOTICE_TTL);
                return vec![Effect::ShowTitleNotice];
            }
            return Vec::new();
        }
        match current.next() {
            Some(next) => self.enter(next, 1),
            None => Vec::new(),
        }
    }

    /// Step back, or hand control to the outer flow when already on step 1.
    pub fn retreat(&mut self) -> Vec<Effect> {
        self.recompute_completed_steps();
        match self.state.current.prev() {
            Some(prev) => self.enter(prev, -1),
            None => vec![Effect::LeaveWizard],
        }
    }

    /// Direct navigation. Step 1 is always reachable; any other target only
    /// if it was completed, the summary has been reached, or it lies at or
    /// behind the current step. Disallowed jumps are silent no-ops.
    pub fn jump_to(&mut self, target: WizardStep) -> Vec<Effect> {
        self.recompute_completed_steps();
        let current = self.state.current;
        if target == current {
            return Vec::new();
        }
        let allowed = target == WizardStep::BasicInfo
            || self.state.completed.contains(&target.ordinal())
            || self.state.reached_summary
            || target.ordinal() <= current.ordinal();
        if !allowed {
            return Vec::new();
        }
        let direction = if target.ordinal() > current.ordinal() { 1 } else { -1 };
        self.enter(target, direction)
    }

    /// Shared tail of every successful internal transition.
    fn enter(&mut self, step: WizardStep, direction: i8) -> Vec<Effect> {
        self.state.direction = direction;
        self.state.current = step;
        if step.is_last() {
            self.state.reached_summary = true;
        }
        self.clear_notice();
        let path = self.location.record_internal_write(step);
        vec![Effect::ScrollToTop, Effect::SyncLocation(path)]
    }

    /// An external location change (browser back/forward). Recognized
    /// segments are adopted without a gate check; unknown ones redirect to
    /// step 1 with a replace write.
    pub fn observe_location(&mut self, location: &str) -> Vec<Effect> {
        match self.location.observe_external(location, self.state.current) {
            ExternalChange::Ignored => Vec::new(),
            ExternalChange::Redirect { step, path } => {
                if step != self.state.current {
                    self.state.direction =
                        if step.ordinal() > self.state.current.ordinal() { 1 } else { -1 };
                    self.state.current = step;
                }
                self.clear_notice();
                vec![Effect::ScrollToTop, Effect::SyncLocation(path)]
            }
            ExternalChange::Adopt { step, direction } => {
                self.state.direction = direction;
                self.state.current = step;
                if step.is_last() {
                    self.state.reached_summary = true;
                }
                self.clear_notice();
                vec![Effect::ScrollToTop]
            }
        }
    }

    /// User interaction with the in-wizard mode selector. Applies locally at
    /// once; propagation to the context is debounced through the mirror.
    pub fn select_mode(&mut self, choice: MealMode, now: Instant) {
        let mode = self.mirror.select_local(choice, now);
        self.apply_mode(mode);
    }

    /// The enclosing context changed its mode. Adoption is debounced; the
    /// wizard's own value is untouched until the sync fires in [`tick`].
    ///
    /// [`tick`]: WizardController::tick
    pub fn observe_context_mode(&mut self, mode: Option<MealMode>, now: Instant) {
        self.mirror.observe_context(mode, now);
    }

    fn apply_mode(&mut self, mode: Option<MealMode>) {
        self.draft.sections.set(SectionKey::Mode, mode.is_some());
        self.recompute_completed_steps();
    }

    /// Drive the controller's timers. Called from the host's poll loop; fires
    /// the notice auto-clear and at most one debounced mirror sync per call.
    pub fn tick(&mut self, now: Instant) -> Vec<Effect> {
        if let Some(deadline) = self.notice_deadline {
            if now >= deadline {
                self.clear_notice();
            }
        }
        let mut effects = Vec::new();
        match self.mirror.tick(now) {
            Some(MirrorAction::AdoptLocal(mode)) => self.apply_mode(mode),
            Some(MirrorAction::PushToContext(mode)) => {
                effects.push(Effect::SyncModeToContext(mode));
            }
            None => {}
        }
        effects
    }

    /// Teardown: cancel all pending timers so nothing fires after dismount.
    pub fn dismiss(&mut self) {
        self.mirror.cancel_pending();
        self.clear_notice();
    }

    fn clear_notice(&mut self) {
        self.title_notice = false;
        self.notice_deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> Instant {
        Instant::now()
    }

    fn mounted() -> WizardController {
        let (controller, effects) = WizardController::mount("/rooms/new/basic-info", None, None);
        assert!(effects.is_empty());
        controller
    }

    /// Fill the draft so step 1's gate passes for dine-out mode.
    fn fill_step_one(controller: &mut WizardController) {
        controller.draft.set_title("Friday Dinner");
        controller.select_mode(MealMode::DineOut, t0());
        controller.draft.toggle_outing_filter("walking distance");
        controller.draft.toggle_cuisine("thai");
    }

    fn fill_step_two(controller: &mut WizardController) {
        controller.draft.choose_access(AccessChoice::InviteOnly);
        controller.draft.set_timer_minutes(30);
        controller.draft.set_reminders(true);
    }

    #[test]
    fn advance_is_a_no_op_while_the_gate_fails() {
        let mut controller = mounted();
        controller.draft.set_title("Dinner");
        let effects = controller.advance(t0());
        assert!(effects.is_empty());
        assert_eq!(controller.current_step(), WizardStep::BasicInfo);
    }

    #[test]
    fn empty_title_attempt_shows_a_transient_notice() {
        let now = t0();
        let mut controller = mounted();
        let effects = controller.advance(now);
        assert_eq!(effects, vec![Effect::ShowTitleNotice]);
        assert!(controller.title_notice());
        assert_eq!(controller.current_step(), WizardStep::BasicInfo);

        // Auto-clears after the TTL.
        controller.tick(now + TITLE_NOTICE_TTL);
        assert!(!controller.title_notice());
    }

    #[test]
    fn notice_is_not_shown_without_an_advance_attempt() {
        let controller = mounted();
        assert!(!controller.title_notice());
    }

    #[test]
    fn successful_advance_moves_forward_and_syncs_the_location() {
        let mut controller = mounted();
        fill_step_one(&mut controller);
        let effects = controller.advance(t0());
        assert_eq!(controller.current_step(), WizardStep::Settings);
        assert_eq!(controller.state().direction, 1);
        assert_eq!(
            effects,
            vec![
                Effect::ScrollToTop,
                Effect::SyncLocation("/rooms/new/settings".to_string()),
            ]
        );
    }

    #[test]
    fn reaching_the_summary_sets_the_unlock_flag() {
        let mut controller = mounted();
        fill_step_one(&mut controller);
        controller.advance(t0());
        fill_step_two(&mut controller);
        controller.advance(t0());
        assert_eq!(controller.current_step(), WizardStep::Summary);
        assert!(controller.state().reached_summary);
    }

    #[test]
    fn forward_action_on_the_summary_routes_to_submission() {
        let mut controller = mounted();
        fill_step_one(&mut controller);
        controller.advance(t0());
        fill_step_two(&mut controller);
        controller.advance(t0());
        let effects = controller.advance(t0());
        assert_eq!(effects, vec![Effect::Submit]);
        assert_eq!(controller.current_step(), WizardStep::Summary);
    }

    #[test]
    fn retreat_from_step_one_leaves_the_wizard() {
        let mut controller = mounted();
        let effects = controller.retreat();
        assert_eq!(effects, vec![Effect::LeaveWizard]);
        assert_eq!(controller.current_step(), WizardStep::BasicInfo);
    }

    #[test]
    fn retreat_steps_back_with_negative_direction() {
        let mut controller = mounted();
        fill_step_one(&mut controller);
        controller.advance(t0());
        let effects = controller.retreat();
        assert_eq!(controller.current_step(), WizardStep::BasicInfo);
        assert_eq!(controller.state().direction, -1);
        assert!(effects.contains(&Effect::ScrollToTop));
    }

    #[test]
    fn jump_to_step_one_always_succeeds() {
        let mut controller = mounted();
        fill_step_one(&mut controller);
        controller.advance(t0());
        let effects = controller.jump_to(WizardStep::BasicInfo);
        assert_eq!(controller.current_step(), WizardStep::BasicInfo);
        assert_eq!(controller.state().direction, -1);
        assert!(!effects.is_empty());
    }

    #[test]
    fn forward_jumps_need_completion_or_the_summary_unlock() {
        let mut controller = mounted();
        // Nothing completed: jumping forward is silently ignored.
        let effects = controller.jump_to(WizardStep::Summary);
        assert!(effects.is_empty());
        assert_eq!(controller.current_step(), WizardStep::BasicInfo);

        // Completing step 1 alone is not enough: the target itself must be
        // in the completed set (or the summary reached).
        fill_step_one(&mut controller);
        controller.recompute_completed_steps();
        assert!(controller.jump_to(WizardStep::Settings).is_empty());
        assert_eq!(controller.current_step(), WizardStep::BasicInfo);

        // Once step 2's own gate is satisfied it joins the completed set and
        // becomes a legal forward jump target.
        fill_step_two(&mut controller);
        assert!(!controller.jump_to(WizardStep::Settings).is_empty());
        assert_eq!(controller.current_step(), WizardStep::Settings);
        assert_eq!(controller.state().direction, 1);
    }

    #[test]
    fn summary_unlock_allows_round_trips() {
        let mut controller = mounted();
        fill_step_one(&mut controller);
        controller.advance(t0());
        fill_step_two(&mut controller);
        controller.advance(t0());
        assert!(controller.state().reached_summary);

        controller.jump_to(WizardStep::BasicInfo);
        assert_eq!(controller.state().direction, -1);
        controller.jump_to(WizardStep::Summary);
        assert_eq!(controller.state().direction, 1);
        assert_eq!(controller.current_step(), WizardStep::Summary);
    }

    #[test]
    fn completed_steps_recompute_is_idempotent() {
        let mut controller = mounted();
        fill_step_one(&mut controller);
        assert!(controller.recompute_completed_steps());
        // Unchanged inputs: the stored set is left alone.
        assert!(!controller.recompute_completed_steps());
        assert!(controller.state().completed.contains(&1));

        // Un-completing the title drops step 1 from the set.
        controller.draft.set_title("");
        assert!(controller.recompute_completed_steps());
        assert!(!controller.state().completed.contains(&1));
    }

    #[test]
    fn external_back_navigation_is_adopted_without_a_gate_check() {
        let mut controller = mounted();
        fill_step_one(&mut controller);
        controller.advance(t0());
        assert_eq!(controller.current_step(), WizardStep::Settings);

        // Empty the title so step 1's gate would fail; back/forward is
        // trusted regardless.
        controller.draft.set_title("");
        let effects = controller.observe_location("/rooms/new/basic-info");
        assert_eq!(controller.current_step(), WizardStep::BasicInfo);
        assert_eq!(controller.state().direction, -1);
        assert_eq!(effects, vec![Effect::ScrollToTop]);
    }

    #[test]
    fn own_location_writes_are_not_re_adopted() {
        let mut controller = mounted();
        fill_step_one(&mut controller);
        let effects = controller.advance(t0());
        let Effect::SyncLocation(path) = &effects[1] else {
            panic!("expected a location write");
        };
        // The host writes the path; the echo must not navigate again.
        let echo = controller.observe_location(path);
        assert!(echo.is_empty());
        assert_eq!(controller.current_step(), WizardStep::Settings);
    }

    #[test]
    fn mount_redirects_unknown_locations_to_step_one() {
        let (controller, effects) = WizardController::mount("/rooms/new/whatever", None, None);
        assert_eq!(controller.current_step(), WizardStep::BasicInfo);
        assert_eq!(
            effects,
            vec![Effect::SyncLocation("/rooms/new/basic-info".to_string())]
        );
    }

    #[test]
    fn mount_honors_the_resume_segment_over_the_location() {
        let (controller, effects) =
            WizardController::mount("/rooms/new/basic-info", Some("settings"), None);
        assert_eq!(controller.current_step(), WizardStep::Settings);
        assert_eq!(
            effects,
            vec![Effect::SyncLocation("/rooms/new/settings".to_string())]
        );
    }

    #[test]
    fn context_mode_flows_in_through_the_debounced_mirror() {
        let now = t0();
        let mut controller = mounted();
        controller.observe_context_mode(Some(MealMode::Cook), now);
        // Nothing applied until the debounce fires.
        assert_eq!(controller.mode(), None);
        controller.tick(now + crate::mirror::MODE_SYNC_DEBOUNCE);
        assert_eq!(controller.mode(), Some(MealMode::Cook));
        assert!(controller.draft.sections.mode);
    }

    #[test]
    fn local_mode_selection_pushes_to_the_context_on_tick() {
        let now = t0();
        let mut controller = mounted();
        controller.select_mode(MealMode::Both, now);
        assert_eq!(controller.mode(), Some(MealMode::Both));
        let effects = controller.tick(now + crate::mirror::MODE_SYNC_DEBOUNCE);
        assert_eq!(
            effects,
            vec![Effect::SyncModeToContext(Some(MealMode::Both))]
        );
    }

    #[test]
    fn dismiss_cancels_pending_timers() {
        let now = t0();
        let mut controller = mounted();
        controller.observe_context_mode(Some(MealMode::Cook), now);
        controller.advance(now); // arms the title notice
        controller.dismiss();
        let effects = controller.tick(now + Duration::from_secs(1));
        assert!(effects.is_empty());
        assert_eq!(controller.mode(), None);
        assert!(!controller.title_notice());
    }

    #[test]
    fn draft_setters_drive_the_completion_maps() {
        let mut draft = RoomDraft::default();
        draft.toggle_cuisine("ramen");
        assert!(draft.sections.cuisine_choice);
        draft.toggle_cuisine("ramen");
        assert!(!draft.sections.cuisine_choice);

        draft.choose_access(AccessChoice::AnyoneWithLink);
        draft.set_timer_minutes(45);
        assert!(!draft.settings.all_done());
        draft.set_reminders(false);
        assert!(draft.settings.all_done());
    }
}
