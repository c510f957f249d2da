use std::time::Duration;

use ride_request::app::{RideApp, RiderEvent};
use ride_request::assignment::DriverProfile;
use ride_request::config::SimConfig;
use ride_request::domain::Point;
use ride_request::locations::{
    DEFAULT_REGIONS, LocationClient, LocationClientConfig, LocationRecord, PartitionSource,
};
use ride_request::offers::{OfferSort, RideOffer, RideTier, TierId};
use ride_request::session::SearchField;
use ride_request::view::{MapMarker, Notice, View};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Renders everything to the log.
struct LogView;

impl View for LogView {
    fn render_search_results(&mut self, field: SearchField, matches: &[LocationRecord]) {
        info!(?field, matches = matches.len(), "search results");
        for (i, m) in matches.iter().enumerate() {
            info!("  [{i}] {} ({})", m.display_name, m.address);
        }
    }

    fn render_map_markers(&mut self, markers: &[MapMarker]) {
        for m in markers {
            info!(kind = ?m.kind, point = %m.point, "marker: {}", m.label);
        }
    }

    fn render_tiers(&mut self, tiers: &[RideTier]) {
        for tier in tiers {
            info!(
                tier = tier.id().0,
                drivers = tier.driver_count(),
                "{}: {}",
                tier.name(),
                tier.rate()
            );
        }
    }

    fn render_offer_list(&mut self, offers: &[RideOffer]) {
        for (i, offer) in offers.iter().enumerate() {
            info!("  {}", offer.label(i + 1));
        }
    }

    fn render_countdown(&mut self, text: &str) {
        info!("{text}");
    }

    fn render_driver_profile(&mut self, profile: &DriverProfile) {
        info!(
            name = %profile.name,
            car = %profile.car_model,
            plate = %profile.plate,
            rating = %profile.rating,
            "your driver"
        );
    }

    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::LocationsUnavailable { reason } => warn!(%reason, "error loading locations"),
            Notice::InvalidAction { message } => warn!(%message, "action rejected"),
            Notice::DriverArrived => info!("driver has arrived"),
            Notice::PenaltyCharged(fee) => info!(%fee, "cancellation fee charged"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let data_dir = env_or("RIDE_DATA_DIR", "data");
    let query = env_or("RIDE_QUERY", "orchard");

    let mut config = SimConfig::default();
    if let Ok(seed) = std::env::var("RIDE_SEED") {
        match seed.parse() {
            Ok(seed) => config = config.with_seed(seed),
            Err(e) => warn!(%seed, error = %e, "ignoring RIDE_SEED"),
        }
    }
    if let Ok(tick) = std::env::var("RIDE_TICK_MS") {
        match tick.parse() {
            Ok(ms) => {
                config.assignment = config.assignment.with_tick(Duration::from_millis(ms));
            }
            Err(e) => warn!(%tick, error = %e, "ignoring RIDE_TICK_MS"),
        }
    }

    let debounce = config.search.debounce;
    let sources = match std::env::var("RIDE_DATA_URL") {
        Ok(url) => match LocationClient::new(LocationClientConfig::new(&url)) {
            Ok(client) => {
                info!(%url, "loading locations over HTTP");
                PartitionSource::http_regions(&client, &DEFAULT_REGIONS)
            }
            Err(e) => {
                warn!(%url, error = %e, "cannot build HTTP client, using local files");
                PartitionSource::region_files(&data_dir, &DEFAULT_REGIONS)
            }
        },
        Err(_) => PartitionSource::region_files(&data_dir, &DEFAULT_REGIONS),
    };
    info!(partitions = sources.len(), "starting ride request simulator");

    let mut app = RideApp::new(config, sources, LogView);
    let (tx, rx) = mpsc::unbounded_channel();

    // Scripted rider
    let rider = async move {
        let steps = [
            RiderEvent::SetPoint {
                field: SearchField::Pickup,
                point: Point::DEFAULT,
            },
            RiderEvent::Input {
                field: SearchField::Dropoff,
                text: query,
            },
        ];
        for step in steps {
            if tx.send(step).is_err() {
                return;
            }
        }
        sleep(debounce * 2).await;

        let steps = [
            RiderEvent::SelectResult {
                field: SearchField::Dropoff,
                index: 0,
            },
            RiderEvent::OpenTier(TierId(0)),
            RiderEvent::Sort(OfferSort::Price),
            RiderEvent::ChooseOffer { position: 0 },
        ];
        for step in steps {
            if tx.send(step).is_err() {
                return;
            }
        }
    };

    tokio::join!(app.run(rx), rider);

    match app.assignment() {
        Some(tracker) => info!(state = ?tracker.state(), "simulation finished"),
        None => warn!("simulation finished without a driver assignment"),
    }
}
