//! Lifecycle transitions for status enums.

use super::ValidationError;

/// A status enum with a fixed transition table.
///
/// Implementors list the legal targets for each state; checking and
/// performing a move is shared.
///
/// ```ignore
/// let next = session.status().transition_to(SessionStatus::Closed)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug + 'static {
    /// States reachable in one step from `self`.
    fn valid_transitions(&self) -> &'static [Self];

    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Returns `target` if the move is legal.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "status",
                format!("cannot move from {:?} to {:?}", self, target),
            ))
        }
    }

    /// No outgoing transitions.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Red,
        Green,
        Off,
    }

    impl StateMachine for Light {
        fn valid_transitions(&self) -> &'static [Self] {
            match self {
                Light::Red => &[Light::Green, Light::Off],
                Light::Green => &[Light::Red],
                Light::Off => &[],
            }
        }
    }

    #[test]
    fn legal_move_returns_target() {
        assert_eq!(Light::Red.transition_to(Light::Green), Ok(Light::Green));
    }

    #[test]
    fn illegal_move_names_both_states() {
        let err = Light::Green.transition_to(Light::Off).unwrap_err();
        assert!(err.to_string().contains("Green"));
        assert!(err.to_string().contains("Off"));
    }

    #[test]
    fn self_transition_is_not_implied() {
        assert!(!Light::Red.can_transition_to(&Light::Red));
    }

    #[test]
    fn terminal_states_have_no_targets() {
        assert!(Light::Off.is_terminal());
        assert!(!Light::Green.is_terminal());
    }
}
