//! Timetable identifier types.
//!
//! Identifiers arrive from graph construction as opaque strings. The only
//! validation is that they must be non-empty, so an empty string can never
//! stand in for "no trip" or "no station". Absence is always an `Option`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when constructing an identifier from an empty string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} id: {reason}")]
pub struct InvalidId {
    kind: &'static str,
    reason: &'static str,
}

macro_rules! timetable_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier, rejecting the empty string.
            pub fn new(s: impl Into<String>) -> Result<Self, InvalidId> {
                let s = s.into();
                if s.is_empty() {
                    return Err(InvalidId {
                        kind: $kind,
                        reason: "cannot be empty",
                    });
                }
                Ok($name(s))
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = InvalidId;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                $name::new(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

timetable_id!(
    /// A physical station (tram stop, bus stop, rail station, ...).
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_planner::domain::StationId;
    ///
    /// let alty = StationId::new("ALT").unwrap();
    /// assert_eq!(alty.as_str(), "ALT");
    /// assert!(StationId::new("").is_err());
    /// ```
    StationId,
    "station"
);

timetable_id!(
    /// One concrete scheduled vehicle run.
    TripId,
    "trip"
);

timetable_id!(
    /// A calendar-scoped pattern grouping trips.
    ServiceId,
    "service"
);

timetable_id!(
    /// A route, as served at a route station.
    RouteId,
    "route"
);

timetable_id!(
    /// A platform within a station.
    PlatformId,
    "platform"
);
