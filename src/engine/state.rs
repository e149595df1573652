// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::observability::messages::onboarding::StateTransition;
use crate::observability::messages::StructuredLog;
use std::fmt;

/// Progress of a single onboarding attempt.
///
/// ```text
/// Requested -> Resolved -> Instantiated -> Probed -> Published -> Done
///     \           \             \             \           \
///      +-----------+-------------+-------------+-> Aborted  +-> Fatal
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingState {
    Requested,
    /// The factory was found.
    Resolved,
    /// The factory produced a connector.
    Instantiated,
    /// Every capability was fetched and certified.
    Probed,
    /// Publication into the subsystem registries has begun.
    Published,
    Done,
    /// Stopped before any registry was touched.
    Aborted,
    /// A registry failed mid-publication.
    Fatal,
}

impl OnboardingState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OnboardingState::Done | OnboardingState::Aborted | OnboardingState::Fatal
        )
    }

    pub fn can_transition_to(&self, next: OnboardingState) -> bool {
        use OnboardingState::*;
        matches!(
            (self, next),
            (Requested, Resolved)
                | (Resolved, Instantiated)
                | (Instantiated, Probed)
                | (Probed, Published)
                | (Published, Done)
                | (Requested | Resolved | Instantiated | Probed, Aborted)
                | (Published, Fatal)
        )
    }
}

impl fmt::Display for OnboardingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OnboardingState::Requested => "requested",
            OnboardingState::Resolved => "resolved",
            OnboardingState::Instantiated => "instantiated",
            OnboardingState::Probed => "probed",
            OnboardingState::Published => "published",
            OnboardingState::Done => "done",
            OnboardingState::Aborted => "aborted",
            OnboardingState::Fatal => "fatal",
        };
        f.write_str(name)
    }
}

/// Tracks the state of one attempt and logs every transition.
pub(crate) struct Attempt<'a> {
    connector_id: &'a str,
    state: OnboardingState,
}

impl<'a> Attempt<'a> {
    pub(crate) fn new(connector_id: &'a str) -> Self {
        Self {
            connector_id,
            state: OnboardingState::Requested,
        }
    }

    pub(crate) fn state(&self) -> OnboardingState {
        self.state
    }

    pub(crate) fn advance(&mut self, next: OnboardingState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal onboarding transition {} -> {}",
            self.state,
            next
        );
        StateTransition {
            connector_id: self.connector_id,
            from: self.state,
            to: next,
        }
        .log();
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OnboardingState::*;

    #[test]
    fn test_happy_path_transitions() {
        let path = [Requested, Resolved, Instantiated, Probed, Published, Done];
        for pair in path.windows(2) {
            assert!(
                pair[0].can_transition_to(pair[1]),
                "{} -> {} should be allowed",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_absorbing_states() {
        struct TestCase {
            from: OnboardingState,
            aborted: bool,
            fatal: bool,
        }

        let cases = vec![
            TestCase { from: Requested, aborted: true, fatal: false },
            TestCase { from: Resolved, aborted: true, fatal: false },
            TestCase { from: Instantiated, aborted: true, fatal: false },
            TestCase { from: Probed, aborted: true, fatal: false },
            TestCase { from: Published, aborted: false, fatal: true },
            TestCase { from: Done, aborted: false, fatal: false },
        ];

        for case in cases {
            assert_eq!(case.from.can_transition_to(Aborted), case.aborted, "{} -> aborted", case.from);
            assert_eq!(case.from.can_transition_to(Fatal), case.fatal, "{} -> fatal", case.from);
        }
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        let all = [Requested, Resolved, Instantiated, Probed, Published, Done, Aborted, Fatal];
        for terminal in all.iter().filter(|s| s.is_terminal()) {
            for next in all {
                assert!(!terminal.can_transition_to(next), "{} -> {}", terminal, next);
            }
        }
    }

    #[test]
    fn test_attempt_tracks_state() {
        let mut attempt = Attempt::new("sales");
        assert_eq!(attempt.state(), Requested);
        attempt.advance(Resolved);
        attempt.advance(Aborted);
        assert_eq!(attempt.state(), Aborted);
    }
}
