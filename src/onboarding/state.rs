//! Registration state machine — tracks which onboarding step the driver
//! is on.

use serde::{Deserialize, Serialize};

/// The steps of driver onboarding.
///
/// Progresses linearly: Account → DriverProfile → Motorcycle → Complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStep {
    Account,
    DriverProfile,
    Motorcycle,
    Complete,
}

impl RegistrationStep {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: RegistrationStep) -> bool {
        use RegistrationStep::*;
        matches!(
            (self, target),
            (Account, DriverProfile) | (DriverProfile, Motorcycle) | (Motorcycle, Complete)
        )
    }

    /// Whether this step is terminal (onboarding is done).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Get the next step in the linear progression, if any.
    pub fn next(&self) -> Option<RegistrationStep> {
        use RegistrationStep::*;
        match self {
            Account => Some(DriverProfile),
            DriverProfile => Some(Motorcycle),
            Motorcycle => Some(Complete),
            Complete => None,
        }
    }
}

impl Default for RegistrationStep {
    fn default() -> Self {
        Self::Account
    }
}

impl std::fmt::Display for RegistrationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Account => "account",
            Self::DriverProfile => "driver_profile",
            Self::Motorcycle => "motorcycle",
            Self::Complete => "complete",
        };
        write!(f, "{s}")
    }
}

/// Explicit registration progress.
///
/// The step is held as first-class state (and is serializable) instead of
/// being inferred from navigation and cache presence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationState {
    pub step: RegistrationStep,
}

impl RegistrationState {
    /// Advance to the next step. Returns an error if already terminal.
    pub fn advance(&mut self) -> Result<RegistrationStep, String> {
        let next = self
            .step
            .next()
            .ok_or_else(|| "Already at terminal step".to_string())?;
        if !self.step.can_transition_to(next) {
            return Err(format!("Cannot transition from {} to {}", self.step, next));
        }
        self.step = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use RegistrationStep::*;
        let transitions = [
            (Account, DriverProfile),
            (DriverProfile, Motorcycle),
            (Motorcycle, Complete),
        ];
        for (from, to) in transitions {
            assert!(
                from.can_transition_to(to),
                "{from} should transition to {to}"
            );
        }
    }

    #[test]
    fn invalid_transitions() {
        use RegistrationStep::*;
        // Skip steps
        assert!(!Account.can_transition_to(Motorcycle));
        assert!(!Account.can_transition_to(Complete));
        // Go backward
        assert!(!Motorcycle.can_transition_to(DriverProfile));
        // Terminal
        assert!(!Complete.can_transition_to(Account));
        // Self-transition
        assert!(!DriverProfile.can_transition_to(DriverProfile));
    }

    #[test]
    fn is_terminal() {
        use RegistrationStep::*;
        assert!(Complete.is_terminal());
        assert!(!Account.is_terminal());
        assert!(!DriverProfile.is_terminal());
        assert!(!Motorcycle.is_terminal());
    }

    #[test]
    fn next_walks_all_steps() {
        use RegistrationStep::*;
        let expected = [DriverProfile, Motorcycle, Complete];
        let mut current = Account;
        for expected_next in expected {
            let next = current.next().unwrap();
            assert_eq!(next, expected_next);
            current = next;
        }
        assert!(current.next().is_none());
    }

    #[test]
    fn display_matches_serde() {
        use RegistrationStep::*;
        for step in [Account, DriverProfile, Motorcycle, Complete] {
            let display = format!("{step}");
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(
                format!("\"{display}\""),
                json,
                "Display and serde should match for {step:?}"
            );
        }
    }

    #[test]
    fn state_advance_walks_all_steps() {
        let mut state = RegistrationState::default();
        assert_eq!(state.step, RegistrationStep::Account);

        for expected in [
            RegistrationStep::DriverProfile,
            RegistrationStep::Motorcycle,
            RegistrationStep::Complete,
        ] {
            assert_eq!(state.advance().unwrap(), expected);
        }

        // Should fail at terminal
        assert!(state.advance().is_err());
    }

    #[test]
    fn state_serde_roundtrip() {
        let state = RegistrationState {
            step: RegistrationStep::Motorcycle,
        };
        let json = serde_json::to_string(&state).unwrap();
        let parsed: RegistrationState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.step, RegistrationStep::Motorcycle);
    }
}
