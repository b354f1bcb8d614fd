//! Journey accumulator.
//!
//! A [`JourneyState`] records the real-world travel events implied by one
//! path's transitions: boarding and leaving vehicles, walks, and
//! station-to-station connections. The traversal drives it; itinerary
//! rendering reads it afterwards.
//!
//! A journey state belongs to exactly one path under construction. It has no
//! interior mutability, so the only way to update it is through `&mut`. A
//! search that branches clones it once per branch.

mod error;

pub use error::JourneyError;

use chrono::{Duration, NaiveTime};

use crate::domain::TransportMode;

/// One recorded travel event, with the path's total cost when it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JourneyEvent {
    Board { mode: TransportMode, cost: u32 },
    Leave { mode: TransportMode, cost: u32 },
    Departure { time: NaiveTime, cost: u32 },
    WalkingConnection { cost: u32 },
    Connection { cost: u32 },
}

impl JourneyEvent {
    pub fn cost(&self) -> u32 {
        match self {
            JourneyEvent::Board { cost, .. }
            | JourneyEvent::Leave { cost, .. }
            | JourneyEvent::Departure { cost, .. }
            | JourneyEvent::WalkingConnection { cost }
            | JourneyEvent::Connection { cost } => *cost,
        }
    }
}

/// Mutable record of travel events for one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyState {
    query_time: NaiveTime,
    on_board: Option<TransportMode>,
    last_event_cost: u32,
    boarding_time: Option<NaiveTime>,
    boardings: usize,
    connections: usize,
    walking_connections: usize,
    events: Vec<JourneyEvent>,
}

impl JourneyState {
    /// Start a journey at `query_time`, not on board anything.
    pub fn new(query_time: NaiveTime) -> Self {
        Self {
            query_time,
            on_board: None,
            last_event_cost: 0,
            boarding_time: None,
            boardings: 0,
            connections: 0,
            walking_connections: 0,
            events: Vec::new(),
        }
    }

    /// Board a vehicle of `mode`.
    pub fn board(&mut self, mode: TransportMode, total_cost: u32) -> Result<(), JourneyError> {
        if !mode.is_vehicle() {
            return Err(JourneyError::NotAVehicle(mode));
        }
        if let Some(current) = self.on_board {
            return Err(JourneyError::AlreadyOnBoard {
                current,
                requested: mode,
            });
        }
        self.advance(total_cost)?;

        self.on_board = Some(mode);
        self.boarding_time = None;
        self.boardings += 1;
        self.events.push(JourneyEvent::Board { mode, cost: total_cost });
        Ok(())
    }

    /// Leave the vehicle of `mode` that is currently boarded.
    pub fn leave(&mut self, mode: TransportMode, total_cost: u32) -> Result<(), JourneyError> {
        match self.on_board {
            None => return Err(JourneyError::NotOnBoard(mode)),
            Some(boarded) if boarded != mode => {
                return Err(JourneyError::ModeMismatch {
                    boarded,
                    leaving: mode,
                });
            }
            Some(_) => {}
        }
        self.advance(total_cost)?;

        self.on_board = None;
        self.events.push(JourneyEvent::Leave { mode, cost: total_cost });
        Ok(())
    }

    /// Begin a walk to or from a location.
    pub fn walking_connection(&mut self, total_cost: u32) -> Result<(), JourneyError> {
        if let Some(mode) = self.on_board {
            return Err(JourneyError::WalkWhileOnBoard(mode));
        }
        self.advance(total_cost)?;

        self.walking_connections += 1;
        self.events.push(JourneyEvent::WalkingConnection { cost: total_cost });
        Ok(())
    }

    /// Move between neighbouring stations.
    pub fn connection(&mut self, total_cost: u32) -> Result<(), JourneyError> {
        if let Some(mode) = self.on_board {
            return Err(JourneyError::ConnectionWhileOnBoard(mode));
        }
        self.advance(total_cost)?;

        self.connections += 1;
        self.events.push(JourneyEvent::Connection { cost: total_cost });
        Ok(())
    }

    /// Record the scheduled departure of the run just committed to. The first
    /// departure after boarding becomes the boarding time.
    pub fn record_departure(&mut self, time: NaiveTime, total_cost: u32) -> Result<(), JourneyError> {
        self.advance(total_cost)?;

        if self.on_board.is_some() && self.boarding_time.is_none() {
            self.boarding_time = Some(time);
        }
        self.events.push(JourneyEvent::Departure { time, cost: total_cost });
        Ok(())
    }

    fn advance(&mut self, total_cost: u32) -> Result<(), JourneyError> {
        if total_cost < self.last_event_cost {
            return Err(JourneyError::CostDecreased {
                previous: self.last_event_cost,
                next: total_cost,
            });
        }
        self.last_event_cost = total_cost;
        Ok(())
    }

    pub fn on_board(&self) -> Option<TransportMode> {
        self.on_board
    }

    pub fn is_on_board(&self) -> bool {
        self.on_board.is_some()
    }

    /// Total path cost when the last event was recorded.
    pub fn last_event_cost(&self) -> u32 {
        self.last_event_cost
    }

    pub fn query_time(&self) -> NaiveTime {
        self.query_time
    }

    /// Scheduled departure of the vehicle currently (or last) boarded.
    pub fn boarding_time(&self) -> Option<NaiveTime> {
        self.boarding_time
    }

    /// Wall-clock time after `total_cost` minutes of travel.
    pub fn journey_clock(&self, total_cost: u32) -> NaiveTime {
        self.query_time + Duration::minutes(i64::from(total_cost))
    }

    pub fn boardings(&self) -> usize {
        self.boardings
    }

    pub fn connections(&self) -> usize {
        self.connections
    }

    pub fn walking_connections(&self) -> usize {
        self.walking_connections
    }

    pub fn events(&self) -> &[JourneyEvent] {
        &self.events
    }
}
