//! Transport modes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a traveller moves along a leg.
///
/// `Walk` and `Connect` never appear as a boarded vehicle: they describe
/// walking legs and cross-mode transfers between neighbouring stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Tram,
    Bus,
    Train,
    Ferry,
    Subway,
    Walk,
    Connect,
}

impl TransportMode {
    /// Returns true if stations of this mode are split into platforms.
    pub fn has_platforms(self) -> bool {
        matches!(self, TransportMode::Tram)
    }

    /// Returns true if this mode is a vehicle a traveller can board.
    pub fn is_vehicle(self) -> bool {
        !matches!(self, TransportMode::Walk | TransportMode::Connect)
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportMode::Tram => "tram",
            TransportMode::Bus => "bus",
            TransportMode::Train => "train",
            TransportMode::Ferry => "ferry",
            TransportMode::Subway => "subway",
            TransportMode::Walk => "walk",
            TransportMode::Connect => "connect",
        };
        f.write_str(name)
    }
}
