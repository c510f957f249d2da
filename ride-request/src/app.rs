//! The rider-facing event loop.
//!
//! [`RideApp`] owns the one live trip session and everything derived from
//! it. All state changes happen on a single task: rider events, the
//! location load, debounced searches and countdown ticks are multiplexed
//! with `tokio::select!`, so nothing needs a lock and a cancel can never
//! race a tick.

use std::collections::HashMap;

use rand::Rng;
use rand::rngs::StdRng;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use crate::assignment::{AssignmentTracker, TickOutcome};
use crate::config::SimConfig;
use crate::domain::{Point, Price};
use crate::handoff::{AcceptedParams, HandoffParams, RideParams};
use crate::locations::{
    Debouncer, LoadState, LocationError, LocationIndex, LocationRecord, PartitionSource,
};
use crate::offers::{DriverId, OfferGenerator, OfferList, OfferSort, RideTier, TierId};
use crate::session::{SearchField, SessionEvent, TripSession};
use crate::view::{MapMarker, MarkerKind, Notice, View};

/// Driver markers are scattered up to this many degrees around the start.
const DRIVER_JITTER_DEG: f64 = 0.005;

/// Something the rider did.
#[derive(Debug, Clone, PartialEq)]
pub enum RiderEvent {
    /// Text typed into a search field.
    Input { field: SearchField, text: String },
    /// A suggestion picked from the field's latest results.
    SelectResult { field: SearchField, index: usize },
    /// A point chosen directly, e.g. from the device location.
    SetPoint { field: SearchField, point: Point },
    /// Open a ride tier's driver list.
    OpenTier(TierId),
    /// Re-sort the open driver list.
    Sort(OfferSort),
    /// Accept the offer at a zero-based position of the open list.
    ChooseOffer { position: usize },
    /// Cancel the active booking.
    Cancel,
    /// Enter the driver list from hand-off parameters.
    OpenOfferView(HandoffParams),
    /// Enter the assignment view from hand-off parameters.
    OpenAssignmentView(HandoffParams),
}

/// The open driver list and the trip it belongs to.
#[derive(Debug, Clone)]
struct OfferView {
    ride: RideParams,
    list: OfferList,
}

/// Single-session ride request simulator.
pub struct RideApp<V> {
    config: SimConfig,
    rng: StdRng,
    sources: Vec<PartitionSource>,
    index: LocationIndex,
    debouncer: Debouncer<SearchField>,
    suggestions: HashMap<SearchField, Vec<LocationRecord>>,
    session: TripSession,
    generator: OfferGenerator,
    tiers: Vec<RideTier>,
    offer_view: Option<OfferView>,
    assignment: Option<AssignmentTracker>,
    next_tick: Option<Instant>,
    charges: Vec<Price>,
    view: V,
}

impl<V: View> RideApp<V> {
    /// Create an app that will load `sources` when it starts running.
    pub fn new(config: SimConfig, sources: Vec<PartitionSource>, view: V) -> Self {
        Self {
            rng: config.rng(),
            index: LocationIndex::new(config.search.max_results),
            debouncer: Debouncer::new(config.search.debounce),
            generator: OfferGenerator::new(&config.offers),
            config,
            sources,
            suggestions: HashMap::new(),
            session: TripSession::new(),
            tiers: Vec::new(),
            offer_view: None,
            assignment: None,
            next_tick: None,
            charges: Vec::new(),
            view,
        }
    }

    pub fn session(&self) -> &TripSession {
        &self.session
    }

    pub fn index(&self) -> &LocationIndex {
        &self.index
    }

    /// Tiers generated for the current destination.
    pub fn tiers(&self) -> &[RideTier] {
        &self.tiers
    }

    /// The open driver list, if any.
    pub fn offers(&self) -> Option<&OfferList> {
        self.offer_view.as_ref().map(|v| &v.list)
    }

    /// The latest assignment, active or finished.
    pub fn assignment(&self) -> Option<&AssignmentTracker> {
        self.assignment.as_ref()
    }

    /// Cancellation fees charged so far.
    pub fn charges(&self) -> &[Price] {
        &self.charges
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Process events until the sender is dropped and no timer is pending.
    ///
    /// The location load starts immediately and runs alongside everything
    /// else; searches made before it completes find nothing.
    pub async fn run(&mut self, mut events: UnboundedReceiver<RiderEvent>) {
        let sources = std::mem::take(&mut self.sources);
        let load = LocationIndex::fetch_all(&sources);
        tokio::pin!(load);

        let mut loading = *self.index.state() == LoadState::Loading;
        let mut open = true;

        loop {
            let search_at = self.debouncer.next_deadline();
            let tick_at = self.next_tick;
            if !open && !loading && search_at.is_none() && tick_at.is_none() {
                break;
            }

            tokio::select! {
                biased;

                result = &mut load, if loading => {
                    loading = false;
                    self.finish_load(result);
                }
                event = events.recv(), if open => match event {
                    Some(event) => self.handle(event),
                    None => {
                        debug!("rider event stream closed");
                        open = false;
                    }
                },
                () = sleep_until_or_never(search_at) => self.run_due_searches(),
                () = sleep_until_or_never(tick_at) => self.tick(),
            }
        }
    }

    /// Apply one rider event.
    pub fn handle(&mut self, event: RiderEvent) {
        debug!(?event, "rider event");
        match event {
            RiderEvent::Input { field, text } => {
                self.debouncer.schedule(field, text, Instant::now());
            }
            RiderEvent::SelectResult { field, index } => self.select_result(field, index),
            RiderEvent::SetPoint { field, point } => self.set_point(field, point),
            RiderEvent::OpenTier(id) => self.open_tier(id),
            RiderEvent::Sort(key) => self.sort_offers(key),
            RiderEvent::ChooseOffer { position } => self.choose_offer(position),
            RiderEvent::Cancel => self.cancel(),
            RiderEvent::OpenOfferView(params) => self.open_offer_view(&params),
            RiderEvent::OpenAssignmentView(params) => self.open_assignment_view(&params),
        }
    }

    fn finish_load(&mut self, result: Result<Vec<LocationRecord>, LocationError>) {
        if let LoadState::Degraded { reason } = self.index.install(result) {
            let reason = reason.clone();
            self.view.notify(Notice::LocationsUnavailable { reason });
        }
    }

    fn run_due_searches(&mut self) {
        for (field, query) in self.debouncer.take_due(Instant::now()) {
            let matches: Vec<LocationRecord> =
                self.index.search(&query).into_iter().cloned().collect();
            debug!(?field, %query, matches = matches.len(), "search");
            self.view.render_search_results(field, &matches);
            self.suggestions.insert(field, matches);
        }
    }

    fn select_result(&mut self, field: SearchField, index: usize) {
        let Some(record) = self
            .suggestions
            .get(&field)
            .and_then(|matches| matches.get(index))
            .cloned()
        else {
            self.reject(format!("no suggestion {index} for {field:?}"));
            return;
        };

        self.suggestions.remove(&field);
        self.debouncer.cancel(field);
        self.view.render_search_results(field, &[]);
        info!(?field, location = %record.display_name, "location selected");
        self.set_point(field, record.point);
    }

    fn set_point(&mut self, field: SearchField, point: Point) {
        match self.session.set_point(field, point) {
            Ok(event) => {
                let markers = trip_markers(self.session.start(), self.session.destination());
                self.view.render_map_markers(&markers);
                if let Some(SessionEvent::OffersRequested { .. }) = event {
                    self.tiers = self.generator.generate(&mut self.rng);
                    self.offer_view = None;
                    self.view.render_tiers(&self.tiers);
                }
            }
            Err(e) => self.reject(e.to_string()),
        }
    }

    fn open_tier(&mut self, id: TierId) {
        let (Some(start), Some(destination)) = (self.session.start(), self.session.destination())
        else {
            self.reject("choose a start and destination first".to_string());
            return;
        };
        let Some(tier) = self.tiers.iter().find(|t| t.id() == id) else {
            self.reject(format!("no ride tier {}", id.0));
            return;
        };

        let params = RideParams::new(start, destination, tier.prices().to_vec()).to_params();
        self.open_offer_view(&params);
    }

    /// Show the driver list described by hand-off parameters.
    ///
    /// Unusable parameters are replaced by fallbacks, so this always opens
    /// a list.
    pub fn open_offer_view(&mut self, params: &HandoffParams) {
        let ride = RideParams::parse_lenient(params, &self.config.offers.fallback_prices);
        let list = OfferList::open(&ride.prices, &mut self.rng);

        let mut markers = trip_markers(Some(ride.start), Some(ride.destination));
        for (i, offer) in list.offers().iter().enumerate() {
            let point = ride.start.offset(
                self.rng.gen_range(-DRIVER_JITTER_DEG..DRIVER_JITTER_DEG),
                self.rng.gen_range(-DRIVER_JITTER_DEG..DRIVER_JITTER_DEG),
            );
            markers.push(MapMarker {
                kind: MarkerKind::Driver(offer.driver_id),
                point,
                label: offer.label(i + 1),
            });
        }

        self.view.render_map_markers(&markers);
        self.view.render_offer_list(list.offers());
        self.offer_view = Some(OfferView { ride, list });
    }

    fn sort_offers(&mut self, key: OfferSort) {
        let Some(open) = self.offer_view.as_mut() else {
            self.reject("no driver list is open".to_string());
            return;
        };
        open.list.sort_by(key);
        self.view.render_offer_list(open.list.offers());
    }

    fn choose_offer(&mut self, position: usize) {
        let Some(open) = &self.offer_view else {
            self.reject("no driver list is open".to_string());
            return;
        };
        let Some(offer) = open.list.get(position).copied() else {
            self.reject(format!("no offer at position {position}"));
            return;
        };

        // The assignment names the driver by the card the rider clicked
        let ride = RideParams::new(open.ride.start, open.ride.destination, open.list.prices());
        let driver = DriverId::from_position(position);
        let params = AcceptedParams::new(ride, driver, offer.eta_minutes).to_params();
        self.open_assignment_view(&params);
    }

    /// Start an assignment described by hand-off parameters.
    ///
    /// A missing price list falls back to the default offers and a missing
    /// ETA to the default countdown. Rejected while another assignment is
    /// still active.
    pub fn open_assignment_view(&mut self, params: &HandoffParams) {
        if self.assignment.as_ref().is_some_and(AssignmentTracker::is_active) {
            self.reject("a driver is already on the way".to_string());
            return;
        }

        let accepted = AcceptedParams::parse_lenient(params, &self.config.offers.fallback_prices);
        let driver = accepted.chosen_driver();
        let Some(price) = accepted.chosen_price() else {
            self.reject("no offers to choose from".to_string());
            return;
        };

        let tracker = AssignmentTracker::new(
            driver,
            price,
            accepted.eta_minutes,
            &self.config.assignment,
            &mut self.rng,
        );

        let mut markers = trip_markers(Some(accepted.ride.start), Some(accepted.ride.destination));
        markers.push(MapMarker {
            kind: MarkerKind::Driver(driver),
            point: accepted.ride.start,
            label: format!("Driver {driver} is coming!"),
        });
        self.view.render_map_markers(&markers);
        self.view.render_driver_profile(tracker.profile());
        self.view.render_countdown(&tracker.status_text());

        self.next_tick = Some(Instant::now() + self.config.assignment.tick);
        self.assignment = Some(tracker);
    }

    fn tick(&mut self) {
        let Some(tracker) = self.assignment.as_mut() else {
            self.next_tick = None;
            return;
        };

        match tracker.tick() {
            TickOutcome::Remaining(_) => {
                self.next_tick = self.next_tick.map(|at| at + self.config.assignment.tick);
                self.view.render_countdown(&tracker.status_text());
            }
            TickOutcome::Arrived => {
                self.next_tick = None;
                self.view.render_countdown(&tracker.status_text());
                self.view.notify(Notice::DriverArrived);
            }
            TickOutcome::Idle => self.next_tick = None,
        }
    }

    fn cancel(&mut self) {
        let Some(tracker) = self.assignment.as_mut().filter(|t| t.is_active()) else {
            self.reject("no active booking to cancel".to_string());
            return;
        };

        // Halt the countdown before charging
        self.next_tick = None;
        let Some(cancellation) = tracker.cancel(self.config.assignment.cancellation_penalty) else {
            return;
        };

        self.charges.push(cancellation.penalty);
        self.view.render_countdown(&tracker.status_text());
        self.view.notify(Notice::PenaltyCharged(cancellation.penalty));
        self.end_session();
    }

    /// Replace the trip with a fresh, empty session.
    fn end_session(&mut self) {
        info!("trip session ended");
        self.session = TripSession::new();
        self.tiers.clear();
        self.offer_view = None;
        self.suggestions.clear();
        self.view.render_tiers(&[]);
        self.view.render_map_markers(&[]);
    }

    fn reject(&mut self, message: String) {
        warn!(%message, "rider action rejected");
        self.view.notify(Notice::InvalidAction { message });
    }
}

/// Markers for whichever trip points are set.
fn trip_markers(start: Option<Point>, destination: Option<Point>) -> Vec<MapMarker> {
    let start = start.map(|point| MapMarker {
        kind: MarkerKind::Start,
        point,
        label: "Start".to_string(),
    });
    let destination = destination.map(|point| MapMarker {
        kind: MarkerKind::Destination,
        point,
        label: "Destination".to_string(),
    });
    start.into_iter().chain(destination).collect()
}

async fn sleep_until_or_never(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
