//! Static step catalog for the room wizard.
//!
//! Three steps, fixed order. Each step carries a stable location segment so
//! the wizard can stay in sync with an address-bar style location.

/// Defines the sequence of steps in the room wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    BasicInfo,
    Settings,
    Summary,
}

impl WizardStep {
    pub fn all() -> &'static [WizardStep] {
        &[
            WizardStep::BasicInfo,
            WizardStep::Settings,
            WizardStep::Summary,
        ]
    }

    pub fn count() -> u8 {
        Self::all().len() as u8
    }

    /// 1-based position of this step in the flow
    pub fn ordinal(self) -> u8 {
        match self {
            WizardStep::BasicInfo => 1,
            WizardStep::Settings => 2,
            WizardStep::Summary => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "Room Basics",
            WizardStep::Settings => "Room Settings",
            WizardStep::Summary => "Summary & Invite",
        }
    }

    /// Stable last path component for this step
    pub fn slug(self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "basic-info",
            WizardStep::Settings => "settings",
            WizardStep::Summary => "summary",
        }
    }

    /// Unknown segments return None; callers fall back to the first step.
    pub fn from_slug(slug: &str) -> Option<WizardStep> {
        Self::all().iter().copied().find(|step| step.slug() == slug)
    }

    pub fn from_ordinal(ordinal: u8) -> Option<WizardStep> {
        Self::all()
            .iter()
            .copied()
            .find(|step| step.ordinal() == ordinal)
    }

    pub fn next(self) -> Option<WizardStep> {
        Self::from_ordinal(self.ordinal() + 1)
    }

    pub fn prev(self) -> Option<WizardStep> {
        match self.ordinal().checked_sub(1) {
            Some(n) if n >= 1 => Self::from_ordinal(n),
            _ => None,
        }
    }

    pub fn is_last(self) -> bool {
        self.ordinal() == Self::count()
    }
}
