//! The top-level branching choice for a room: cook at home, dine out, or both.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How the group wants to decide about the meal. "Unselected" is modelled as
/// `Option<MealMode>::None` everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MealMode {
    /// Cook at home
    Cook,
    /// Go out to eat
    DineOut,
    /// Keep both options on the table
    Both,
}

impl MealMode {
    pub fn all() -> &'static [MealMode] {
        &[MealMode::Cook, MealMode::DineOut, MealMode::Both]
    }

    pub fn wants_cooking(self) -> bool {
        matches!(self, MealMode::Cook | MealMode::Both)
    }

    pub fn wants_dining_out(self) -> bool {
        matches!(self, MealMode::DineOut | MealMode::Both)
    }

    pub fn label(self) -> &'static str {
        match self {
            MealMode::Cook => "Cook at home",
            MealMode::DineOut => "Dine out",
            MealMode::Both => "Both",
        }
    }
}

impl std::fmt::Display for MealMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relevance_helpers() {
        assert!(MealMode::Cook.wants_cooking());
        assert!(!MealMode::Cook.wants_dining_out());
        assert!(MealMode::DineOut.wants_dining_out());
        assert!(!MealMode::DineOut.wants_cooking());
        assert!(MealMode::Both.wants_cooking());
        assert!(MealMode::Both.wants_dining_out());
    }
}
