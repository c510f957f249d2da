//! Rendering interface.
//!
//! The simulator never draws anything itself. It hands plain data to a
//! [`View`], and whoever implements the trait decides how to show it.

use tokio::sync::mpsc::UnboundedSender;

use crate::assignment::DriverProfile;
use crate::domain::{Point, Price};
use crate::locations::LocationRecord;
use crate::offers::{DriverId, RideOffer, RideTier};
use crate::session::SearchField;

/// What a map marker stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Start,
    Destination,
    Driver(DriverId),
}

/// A point to pin on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub kind: MarkerKind,
    pub point: Point,
    pub label: String,
}

/// Out-of-band messages for the rider.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// Location data failed to load; search is unavailable.
    LocationsUnavailable { reason: String },
    /// A rider action was rejected and nothing changed.
    InvalidAction { message: String },
    /// The driver reached the pickup point.
    DriverArrived,
    /// The booking was cancelled and this fee charged.
    PenaltyCharged(Price),
}

/// Receives everything the simulator wants shown.
pub trait View {
    /// Suggestions for a search field. Empty clears the list.
    fn render_search_results(&mut self, field: SearchField, matches: &[LocationRecord]);

    /// The full set of markers; replaces whatever was shown before.
    fn render_map_markers(&mut self, markers: &[MapMarker]);

    /// Ride tier cards. Empty hides them.
    fn render_tiers(&mut self, tiers: &[RideTier]);

    /// Driver offers in presentation order.
    fn render_offer_list(&mut self, offers: &[RideOffer]);

    fn render_countdown(&mut self, text: &str);

    fn render_driver_profile(&mut self, profile: &DriverProfile);

    fn notify(&mut self, _notice: Notice) {}
}

/// One call on a [`View`], as data.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    SearchResults {
        field: SearchField,
        matches: Vec<LocationRecord>,
    },
    MapMarkers(Vec<MapMarker>),
    Tiers(Vec<RideTier>),
    OfferList(Vec<RideOffer>),
    Countdown(String),
    DriverProfile(DriverProfile),
    Notice(Notice),
}

/// Forwards view calls to another task. Updates sent after the receiver
/// is gone are dropped.
impl View for UnboundedSender<ViewUpdate> {
    fn render_search_results(&mut self, field: SearchField, matches: &[LocationRecord]) {
        let _ = self.send(ViewUpdate::SearchResults {
            field,
            matches: matches.to_vec(),
        });
    }

    fn render_map_markers(&mut self, markers: &[MapMarker]) {
        let _ = self.send(ViewUpdate::MapMarkers(markers.to_vec()));
    }

    fn render_tiers(&mut self, tiers: &[RideTier]) {
        let _ = self.send(ViewUpdate::Tiers(tiers.to_vec()));
    }

    fn render_offer_list(&mut self, offers: &[RideOffer]) {
        let _ = self.send(ViewUpdate::OfferList(offers.to_vec()));
    }

    fn render_countdown(&mut self, text: &str) {
        let _ = self.send(ViewUpdate::Countdown(text.to_string()));
    }

    fn render_driver_profile(&mut self, profile: &DriverProfile) {
        let _ = self.send(ViewUpdate::DriverProfile(profile.clone()));
    }

    fn notify(&mut self, notice: Notice) {
        let _ = self.send(ViewUpdate::Notice(notice));
    }
}
