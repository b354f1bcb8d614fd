//! Journey accumulator errors.
//!
//! Every variant means the traversal and the accumulator have fallen out of
//! step. None of them is recoverable within a branch.

use crate::domain::TransportMode;

/// Invariant violations raised by [`super::JourneyState`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JourneyError {
    #[error("cannot board {requested}: already on board {current}")]
    AlreadyOnBoard {
        current: TransportMode,
        requested: TransportMode,
    },

    #[error("cannot leave {0}: not on board")]
    NotOnBoard(TransportMode),

    #[error("cannot leave {leaving}: on board {boarded}")]
    ModeMismatch {
        boarded: TransportMode,
        leaving: TransportMode,
    },

    #[error("{0} is not a vehicle mode")]
    NotAVehicle(TransportMode),

    #[error("cannot start a walk while on board {0}")]
    WalkWhileOnBoard(TransportMode),

    #[error("cannot change station while on board {0}")]
    ConnectionWhileOnBoard(TransportMode),

    #[error("cost went backwards: {previous} then {next}")]
    CostDecreased { previous: u32, next: u32 },
}
