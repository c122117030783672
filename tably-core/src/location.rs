//! Bidirectional sync between the wizard step and an address-bar location.
//!
//! The wizard lives under a fixed root path; the last path component names
//! the step. Internal transitions write the location with replace semantics
//! and must not be re-observed as external navigation, so the synchronizer
//! remembers the segment it last wrote and swallows its own echo. External
//! changes (browser back/forward) are trusted and adopted without a gate
//! check.

use crate::steps::WizardStep;
use url::Url;

/// Fixed wizard root path; step segments hang off of it.
pub const WIZARD_ROOT: &str = "/rooms/new";

/// Outcome of observing an external location change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalChange {
    /// Our own write echoing back, or no effective change
    Ignored,
    /// Unknown or missing segment; the caller should rewrite the location
    Redirect { step: WizardStep, path: String },
    /// Back/forward navigation to a recognized step; no gate check
    Adopt { step: WizardStep, direction: i8 },
}

#[derive(Debug, Default)]
pub struct LocationSync {
    /// Segment of the last internal write, pending echo suppression
    last_written: Option<&'static str>,
}

impl LocationSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Address-bar path for a step
    pub fn path_for(step: WizardStep) -> String {
        format!("{}/{}", WIZARD_ROOT, step.slug())
    }

    /// Last path component of a location, which may be a full URL or a bare
    /// path. Trailing slashes are tolerated.
    pub fn segment_of(location: &str) -> Option<String> {
        let path = match Url::parse(location) {
            Ok(url) => url.path().to_string(),
            // Not an absolute URL; treat the whole string as a path.
            Err(_) => location.to_string(),
        };
        let trimmed = path.trim_end_matches('/');
        if trimmed == WIZARD_ROOT.trim_end_matches('/') || trimmed.is_empty() {
            return None;
        }
        trimmed.rsplit('/').next().map(str::to_string)
    }

    /// Resolve the step to mount at. An externally supplied resume segment
    /// wins over location inspection; a missing or unrecognized segment falls
    /// back to the first step with a replace-redirect.
    pub fn initial_step(
        &mut self,
        location: &str,
        resume: Option<&str>,
    ) -> (WizardStep, Option<String>) {
        if let Some(step) = resume.and_then(WizardStep::from_slug) {
            return (step, Some(self.record_internal_write(step)));
        }
        match Self::segment_of(location).as_deref().and_then(WizardStep::from_slug) {
            Some(step) => (step, None),
            None => {
                let step = WizardStep::BasicInfo;
                (step, Some(self.record_internal_write(step)))
            }
        }
    }

    /// Note an internally driven transition and return the path to write
    /// (replace, not push). The echo of this write will be ignored.
    pub fn record_internal_write(&mut self, step: WizardStep) -> String {
        self.last_written = Some(step.slug());
        Self::path_for(step)
    }

    /// Classify an external location change relative to the current step.
    pub fn observe_external(&mut self, location: &str, current: WizardStep) -> ExternalChange {
        let segment = Self::segment_of(location);

        // One-shot echo suppression: only the event immediately following an
        // internal write can be that write's echo. Anything else drops the
        // marker and is classified normally.
        let expected = self.last_written.take();
        if expected.is_some() && segment.as_deref() == expected {
            return ExternalChange::Ignored;
        }

        match segment.as_deref().and_then(WizardStep::from_slug) {
            None => {
                let step = WizardStep::BasicInfo;
                let path = self.record_internal_write(step);
                ExternalChange::Redirect { step, path }
            }
            Some(step) if step == current => ExternalChange::Ignored,
            Some(step) => {
                let direction = if step.ordinal() > current.ordinal() { 1 } else { -1 };
                ExternalChange::Adopt { step, direction }
            }
        }
    }
}
