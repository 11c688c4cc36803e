use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use crate::data::geography::{GeoPosition, Location};
use crate::display::PanelDisplay;
use crate::errors::{ConfigError, LoopError};
use crate::rendering::PanelRenderer;
use crate::sources::aircraft_source::AircraftSource;
use crate::sources::logos::LogoResolver;
use crate::sources::routes::RouteEnricher;
use crate::tracker::clock::Clock;
use crate::tracker::selection::{self, Selection};
use crate::tracker::state::{DisplayState, LoopPhase, Schedule};

// Longest uninterrupted wait, so an interrupt is noticed promptly
const SHUTDOWN_POLL: Duration = Duration::from_millis(250);

pub struct Sources {
    pub aircraft: AircraftSource,
    pub routes: RouteEnricher,
    pub logos: LogoResolver
}

/// Rotates over the configured locations, refreshing the panel for the current
/// one. Everything runs on the calling thread: one fetch-select-render-push
/// cycle completes before the timers are looked at again.
pub struct DisplayLoop {
    locations: Vec<Location>,
    home: GeoPosition,
    schedule: Schedule,
    sources: Sources,
    renderer: PanelRenderer,
    display: Box<dyn PanelDisplay>,
    clock: Rc<dyn Clock>,
    state: DisplayState
}

impl DisplayLoop {
    pub fn new(locations: Vec<Location>, home: GeoPosition, schedule: Schedule, sources: Sources,
               renderer: PanelRenderer, display: Box<dyn PanelDisplay>, clock: Rc<dyn Clock>) -> Result<Self, ConfigError> {
        if locations.is_empty() {
            return Err(ConfigError::Invalid("at least one location is required".to_string()));
        }
        if renderer.dimensions() != display.dimensions() {
            let ((rw, rh), (dw, dh)) = (renderer.dimensions(), display.dimensions());
            return Err(ConfigError::Invalid(format!("panel is {}x{} but the display is {}x{}", rw, rh, dw, dh)));
        }

        let state = DisplayState::new(locations.len(), clock.now());
        Ok(Self { locations, home, schedule, sources, renderer, display, clock, state })
    }

    #[cfg(test)]
    pub fn state(&self) -> &DisplayState { &self.state }

    pub fn current_location(&self) -> &Location { &self.locations[self.state.location_index()] }

    /// Runs until `shutdown` is set. The flag is only observed between cycles,
    /// so a display push in progress always completes.
    pub fn run(&mut self, shutdown: &AtomicBool) -> Result<(), LoopError> {
        tracing::info!(locations = self.locations.len(),
                       refresh_secs = self.schedule.refresh.num_seconds(),
                       rotation_secs = self.schedule.rotation.num_seconds(),
                       "display loop started");

        while !shutdown.load(Ordering::SeqCst) {
            self.tick()?;
            self.clock.sleep(self.time_until_next_event().min(SHUTDOWN_POLL));
        }

        tracing::info!(phase = ?self.state.phase, location = self.current_location().name(), "display loop stopped");
        Ok(())
    }

    /// Handles whatever timers are due. Rotation is processed first so a
    /// refresh that falls due at the same time shows the new location.
    pub fn tick(&mut self) -> Result<(), LoopError> {
        let now = self.clock.now();

        if self.state.rotation_due(now, &self.schedule) {
            self.rotate(now);
        }
        if self.state.refresh_due(now, &self.schedule) {
            self.refresh(now)?;
        }
        Ok(())
    }

    pub fn time_until_next_event(&self) -> Duration {
        let now = self.clock.now();
        (self.state.next_event(now, &self.schedule) - now)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    fn rotate(&mut self, now: chrono::DateTime<chrono::Utc>) {
        self.state.phase = LoopPhase::Rotate;
        self.state.advance(now);
        tracing::info!(location = self.current_location().name(), index = self.state.location_index(), "rotated");
        self.state.phase = LoopPhase::RotatingWait;
    }

    fn refresh(&mut self, now: chrono::DateTime<chrono::Utc>) -> Result<(), LoopError> {
        self.state.phase = LoopPhase::Refreshing;
        let location = &self.locations[self.state.location_index()];

        let observations = match self.sources.aircraft.fetch(location) {
            Ok(observations) => observations,
            Err(e) => {
                tracing::warn!(location = location.name(), "no aircraft this cycle: {}", e);
                Vec::new()
            }
        };

        let selection = selection::select(&observations, &self.home);
        let (route, logo) = match &selection {
            Some(Selection { aircraft, distance_km }) => {
                let route = aircraft.callsign.as_deref().and_then(|c| self.sources.routes.enrich(c));
                let logo = route.as_ref()
                    .and_then(|r| r.airline.as_deref())
                    .and_then(|airline| self.sources.logos.resolve(airline));

                tracing::info!(location = location.name(),
                               callsign = aircraft.callsign.as_deref().unwrap_or("?"),
                               icao24 = %aircraft.icao24,
                               distance_km = %format!("{:.1}", distance_km),
                               candidates = observations.len(),
                               logo = logo.as_ref().map_or("none", |l| l.airline.as_str()),
                               "selected aircraft");
                (route, logo)
            },
            None => {
                tracing::info!(location = location.name(), "no flights nearby");
                (None, None)
            }
        };

        let frame = self.renderer.render(
            location.name(),
            selection.as_ref().map(|s| &s.aircraft),
            route.as_ref(),
            logo.as_deref(),
            selection.as_ref().map(|s| s.distance_km))?;

        self.display.push(&frame)?;

        let previous = self.state.selected.as_ref().map(|s| s.aircraft.icao24.as_str());
        if previous != selection.as_ref().map(|s| s.aircraft.icao24.as_str()) {
            tracing::debug!(location = location.name(), previous = previous.unwrap_or("none"), "selection changed");
        }

        self.state.selected = selection;
        self.state.last_refresh = Some(now);
        self.state.phase = LoopPhase::RotatingWait;
        Ok(())
    }
}
