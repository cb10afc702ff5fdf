//! Reel state and its derived flag view

use serde::{Deserialize, Serialize};

/// Where a reel is in its roll lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ReelState {
    /// Never rolled
    #[default]
    Idle = 0,
    /// Anticipation or recoil segment
    Prerolling = 1,
    /// Main roll segment
    Rolling = 2,
    /// Overshoot or settle segment
    Postrolling = 3,
    /// Last roll finished; a new roll may start
    Finished = 4,
}

impl ReelState {
    /// Check if a roll is in flight
    #[inline]
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            ReelState::Prerolling | ReelState::Rolling | ReelState::Postrolling
        )
    }

    /// Legacy boolean view of the state
    pub fn flags(&self) -> ReelFlags {
        match self {
            ReelState::Idle => ReelFlags::default(),
            ReelState::Prerolling | ReelState::Rolling => ReelFlags {
                rolling: true,
                postrolled: false,
                finished: false,
            },
            ReelState::Postrolling => ReelFlags {
                rolling: false,
                postrolled: true,
                finished: false,
            },
            ReelState::Finished => ReelFlags {
                rolling: false,
                postrolled: true,
                finished: true,
            },
        }
    }
}

/// Read-only flags derived from [`ReelState`]
///
/// Only the combinations produced by [`ReelState::flags`] can exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReelFlags {
    pub rolling: bool,
    pub postrolled: bool,
    pub finished: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        assert_eq!(ReelState::Idle.flags(), ReelFlags::default());
        assert!(ReelState::Prerolling.flags().rolling);
        assert!(ReelState::Rolling.flags().rolling);

        let post = ReelState::Postrolling.flags();
        assert!(!post.rolling && post.postrolled && !post.finished);

        let done = ReelState::Finished.flags();
        assert!(!done.rolling && done.postrolled && done.finished);
    }

    #[test]
    fn test_in_flight() {
        assert!(!ReelState::Idle.is_in_flight());
        assert!(ReelState::Rolling.is_in_flight());
        assert!(!ReelState::Finished.is_in_flight());
    }
}
