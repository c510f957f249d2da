//! Trip session state machine.

use tracing::debug;

use crate::domain::Point;

use super::error::SessionError;

/// Where a trip session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No points chosen.
    Empty,
    /// Start chosen, destination not yet.
    StartSet,
    /// Both points chosen; offers have been requested.
    Ready,
}

/// Which of the two trip points an input or selection applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    /// The start (pickup) point.
    Pickup,
    /// The destination (dropoff) point.
    Dropoff,
}

/// Side effects emitted by session transitions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    /// A destination was set; fresh ride tiers should be generated.
    OffersRequested { start: Point, destination: Point },
}

/// The rider's current trip request.
///
/// Holds at most one start and one destination; setting either again
/// overwrites it. There is no reset: a finished or cancelled trip is
/// replaced by a new session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripSession {
    start: Option<Point>,
    destination: Option<Point>,
}

impl TripSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state, derived from which points are set.
    pub fn state(&self) -> SessionState {
        match (self.start, self.destination) {
            (None, _) => SessionState::Empty,
            (Some(_), None) => SessionState::StartSet,
            (Some(_), Some(_)) => SessionState::Ready,
        }
    }

    /// The start point, if chosen.
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// The destination point, if chosen.
    pub fn destination(&self) -> Option<Point> {
        self.destination
    }

    /// Set or move the start point.
    ///
    /// Valid in every state. Moving the start of a ready session keeps the
    /// destination and does not request new offers.
    pub fn set_start(&mut self, point: Point) -> SessionState {
        self.start = Some(point);
        let state = self.state();
        debug!(%point, ?state, "start set");
        state
    }

    /// Set or move the destination point.
    ///
    /// Requires a start point. On success the session is ready and the
    /// returned event asks for a fresh set of offers.
    pub fn set_destination(&mut self, point: Point) -> Result<SessionEvent, SessionError> {
        let Some(start) = self.start else {
            return Err(SessionError::InvalidTransition {
                action: "set destination",
                state: self.state(),
            });
        };

        self.destination = Some(point);
        debug!(%point, "destination set, offers requested");
        Ok(SessionEvent::OffersRequested {
            start,
            destination: point,
        })
    }

    /// Set whichever point `field` refers to.
    pub fn set_point(
        &mut self,
        field: SearchField,
        point: Point,
    ) -> Result<Option<SessionEvent>, SessionError> {
        match field {
            SearchField::Pickup => {
                self.set_start(point);
                Ok(None)
            }
            SearchField::Dropoff => self.set_destination(point).map(Some),
        }
    }
}
