//! Savings goal singleton.

use serde::{Deserialize, Serialize};

use crate::MoneyCents;

/// Target amount the user wants their net balance to reach.
///
/// A target of zero means "no goal set" and is a normal, UI-observable state,
/// not an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub target: MoneyCents,
    pub name: String,
}

impl SavingsGoal {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            target: MoneyCents::ZERO,
            name: name.into(),
        }
    }

    /// Returns `true` when a target has been set.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.target.is_positive()
    }
}

impl Default for SavingsGoal {
    fn default() -> Self {
        Self::new("My savings")
    }
}
