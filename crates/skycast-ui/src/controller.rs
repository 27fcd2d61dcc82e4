//! Search and unit-toggle handling.
//!
//! The controller owns the last fetched snapshot, the location it belongs to and
//! the unit preference. Network work is delegated to [`crate::services`]; results
//! come back as [`ServiceMessage`]s and are applied by [`AppController::handle`].

use std::sync::Arc;

use skycast_weather::{
    city_line, condition_stats, format_date, render_daily, render_hourly, select_icon,
    temperature_line, GeocodeClient, Location, UnitPreference, WeatherClient, WeatherError,
    WeatherSnapshot,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error_mapping::to_app_error;
use crate::services::{self, ServiceMessage};
use crate::view::{EntryList, EntryView, Region, Slot, ViewSink};

/// Where the controller is in a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Geocoding,
    FetchingWeather,
}

pub struct AppController<V: ViewSink> {
    geocoder: Arc<GeocodeClient>,
    weather: Arc<WeatherClient>,
    view: V,
    phase: Phase,
    unit: UnitPreference,
    location: Option<Location>,
    snapshot: Option<WeatherSnapshot>,
    /// Token of the most recent request; older completions are stale
    seq: u64,
    tx: UnboundedSender<ServiceMessage>,
    rx: UnboundedReceiver<ServiceMessage>,
}

impl<V: ViewSink> AppController<V> {
    pub fn new(
        geocoder: GeocodeClient,
        weather: WeatherClient,
        view: V,
        unit: UnitPreference,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut controller = Self {
            geocoder: Arc::new(geocoder),
            weather: Arc::new(weather),
            view,
            phase: Phase::Idle,
            unit,
            location: None,
            snapshot: None,
            seq: 0,
            tx,
            rx,
        };
        controller.update_toggle_label();
        controller
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn unit(&self) -> UnitPreference {
        self.unit
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    /// Start a search. Blank queries are ignored.
    pub fn submit(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("Ignoring blank search");
            return;
        }

        self.view.set_text(Slot::SearchInput, query);
        self.begin_request();
        self.phase = Phase::Geocoding;

        tracing::info!("Searching for \"{}\" (#{})", query, self.seq);
        let geocoder = Arc::clone(&self.geocoder);
        services::request_geocode(&self.tx, geocoder, self.seq, query.to_string());
    }

    /// Fetch and render weather for the startup location, skipping geocoding
    pub fn load_default(&mut self, location: Location) {
        self.begin_request();

        tracing::info!("Loading weather for {} (#{})", location.name, self.seq);
        self.start_weather(self.seq, location);
    }

    /// Flip between metric and imperial and re-render from the stored snapshot.
    ///
    /// Does nothing until a snapshot has been loaded.
    pub fn toggle_unit(&mut self) {
        if self.snapshot.is_none() {
            tracing::debug!("Unit toggle ignored, nothing loaded yet");
            return;
        }

        self.unit = self.unit.toggled();
        tracing::debug!("Unit switched to {:?}", self.unit);
        self.update_toggle_label();
        self.render();
    }

    /// Wait for the next completed request
    pub async fn next_message(&mut self) -> Option<ServiceMessage> {
        self.rx.recv().await
    }

    /// Apply a completed request to the view
    pub fn handle(&mut self, message: ServiceMessage) {
        if message.seq() != self.seq {
            tracing::debug!(
                "Discarding stale result #{} (current #{})",
                message.seq(),
                self.seq
            );
            return;
        }

        match message {
            ServiceMessage::GeocodeDone { seq, result } => match result {
                Ok(location) => self.start_weather(seq, location),
                Err(e) => self.fail(e),
            },
            ServiceMessage::WeatherDone {
                location, result, ..
            } => {
                self.view.set_visible(Region::Loading, false);
                match result {
                    Ok(snapshot) => {
                        self.location = Some(location);
                        self.snapshot = Some(snapshot);
                        self.render();
                        self.view.set_text(Slot::SearchInput, "");
                        self.phase = Phase::Idle;
                    }
                    Err(e) => self.fail(e),
                }
            }
        }
    }

    /// Process messages until the current lookup has finished
    pub async fn settle(&mut self) {
        while self.phase != Phase::Idle {
            match self.rx.recv().await {
                Some(message) => self.handle(message),
                None => break,
            }
        }
    }

    /// Submit a query and wait for it to finish
    pub async fn search(&mut self, query: &str) {
        self.submit(query);
        self.settle().await;
    }

    /// Issue a new request token. Anything still in flight becomes stale, so its
    /// loading indicator goes too.
    fn begin_request(&mut self) {
        self.clear_error();
        self.view.set_visible(Region::Loading, false);
        self.seq += 1;
    }

    fn start_weather(&mut self, seq: u64, location: Location) {
        self.phase = Phase::FetchingWeather;
        self.view.set_visible(Region::Loading, true);
        services::request_weather(&self.tx, Arc::clone(&self.weather), seq, location);
    }

    fn fail(&mut self, error: WeatherError) {
        let error = to_app_error(error);
        tracing::warn!("Weather lookup failed: {}", error);

        self.view.set_visible(Region::Loading, false);
        self.view.set_text(Slot::ErrorMessage, error.user_message());
        self.view.set_visible(Region::Error, true);
        self.phase = Phase::Idle;
    }

    fn clear_error(&mut self) {
        self.view.set_text(Slot::ErrorMessage, "");
        self.view.set_visible(Region::Error, false);
    }

    fn update_toggle_label(&mut self) {
        let label = format!("Show {}", self.unit.toggled().symbol());
        self.view.set_text(Slot::UnitToggle, &label);
    }

    fn render(&mut self) {
        if let (Some(location), Some(snapshot)) = (&self.location, &self.snapshot) {
            render_all(&mut self.view, location, snapshot, self.unit);
        }
    }
}

/// Render every section from a snapshot
pub fn render_all<V: ViewSink>(
    view: &mut V,
    location: &Location,
    snapshot: &WeatherSnapshot,
    unit: UnitPreference,
) {
    let current = &snapshot.current_weather;
    let icon = select_icon(current.weathercode);

    view.set_text(Slot::City, &city_line(location));
    view.set_text(Slot::Date, &format_date(&current.time));
    view.set_text(Slot::Temperature, &temperature_line(current.temperature, unit));
    view.set_image(Slot::Icon, &icon.asset());
    view.set_text(Slot::Condition, icon.description());

    let stats = condition_stats(snapshot, unit);
    view.set_text(Slot::FeelsLike, &stats.feels_like);
    view.set_text(Slot::Humidity, &stats.humidity);
    view.set_text(Slot::Wind, &stats.wind);
    view.set_text(Slot::Precipitation, &stats.precipitation);

    view.clear_entries(EntryList::Daily);
    for day in render_daily(snapshot, unit) {
        view.append_entry(
            EntryList::Daily,
            EntryView {
                label: day.weekday_label,
                values: vec![format!("{}°", day.max_temp), format!("{}°", day.min_temp)],
            },
        );
    }

    view.clear_entries(EntryList::Hourly);
    for hour in render_hourly(snapshot, unit) {
        view.append_entry(
            EntryList::Hourly,
            EntryView {
                label: hour.hour_label,
                values: vec![format!("{}°", hour.temp)],
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ViewState;
    use std::time::Duration;

    fn controller() -> AppController<ViewState> {
        let timeout = Duration::from_secs(1);
        AppController::new(
            GeocodeClient::new("http://127.0.0.1:9/v1/search", timeout).unwrap(),
            WeatherClient::new("http://127.0.0.1:9/v1/forecast", timeout).unwrap(),
            ViewState::default(),
            UnitPreference::Metric,
        )
    }

    fn location(name: &str, country: &str) -> Location {
        Location {
            name: name.to_string(),
            country: country.to_string(),
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    fn snapshot(temperature: f64) -> WeatherSnapshot {
        serde_json::from_value(serde_json::json!({
            "current_weather": {
                "temperature": temperature,
                "windspeed": 10.0,
                "weathercode": 1,
                "time": "2024-01-01T12:00"
            },
            "daily": {
                "time": ["2024-01-01", "2024-01-02"],
                "temperature_2m_max": [20.0, 21.0],
                "temperature_2m_min": [10.0, 11.0]
            }
        }))
        .unwrap()
    }

    fn weather_done(seq: u64, name: &str, temperature: f64) -> ServiceMessage {
        ServiceMessage::WeatherDone {
            seq,
            location: location(name, "Somewhere"),
            result: Ok(snapshot(temperature)),
        }
    }

    #[test]
    fn initial_state() {
        let c = controller();
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.unit(), UnitPreference::Metric);
        assert_eq!(c.view().unit_toggle, "Show °F");
        assert!(!c.view().has_data());
    }

    #[test]
    fn blank_submit_is_noop() {
        let mut c = controller();
        c.submit("   ");
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.seq, 0);
    }

    #[test]
    fn toggle_without_snapshot_is_noop() {
        let mut c = controller();
        c.toggle_unit();
        assert_eq!(c.unit(), UnitPreference::Metric);
        assert_eq!(c.view().unit_toggle, "Show °F");
    }

    #[test]
    fn weather_result_renders_all_sections() {
        let mut c = controller();
        c.seq = 1;
        c.handle(weather_done(1, "Berlin", 18.4));

        let view = c.view();
        assert_eq!(view.city, "Berlin, Somewhere");
        assert_eq!(view.temperature, "18°");
        assert_eq!(view.date, "Monday, January 1, 2024");
        assert_eq!(view.icon, "icons/partly-cloudy.svg");
        assert_eq!(view.daily.len(), 2);
        assert_eq!(view.daily[0].values, vec!["20°".to_string(), "10°".to_string()]);
        assert!(view.hourly.is_empty());
        assert!(!view.loading);
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn toggle_twice_restores_view() {
        let mut c = controller();
        c.seq = 1;
        c.handle(weather_done(1, "Berlin", 18.4));
        let before = c.view().clone();

        c.toggle_unit();
        assert_eq!(c.view().temperature, "65°");
        assert_eq!(c.view().daily[0].values[0], "68°");
        assert_eq!(c.view().unit_toggle, "Show °C");

        c.toggle_unit();
        assert_eq!(c.view(), &before);
    }

    #[test]
    fn stale_result_is_discarded() {
        let mut c = controller();
        c.seq = 2;
        c.handle(weather_done(2, "Berlin", 18.4));
        c.handle(weather_done(1, "Paris", 30.0));

        assert_eq!(c.view().city, "Berlin, Somewhere");
        assert_eq!(c.view().temperature, "18°");
        assert_eq!(c.location().map(|l| l.name.as_str()), Some("Berlin"));
    }

    #[test]
    fn failure_keeps_previous_render() {
        let mut c = controller();
        c.seq = 1;
        c.handle(weather_done(1, "Berlin", 18.4));

        c.seq = 2;
        c.handle(ServiceMessage::GeocodeDone {
            seq: 2,
            result: Err(WeatherError::NotFound {
                query: "Atlantis".into(),
            }),
        });

        let view = c.view();
        assert!(view.error_visible);
        assert_eq!(view.error_message, "Location not found. Please try another city.");
        assert_eq!(view.city, "Berlin, Somewhere");
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn new_request_hides_loading_of_superseded_one() {
        let mut c = controller();
        c.load_default(location("Berlin", "Germany"));
        assert!(c.view().loading);

        c.submit("Paris");
        assert!(!c.view().loading);
        assert_eq!(c.phase(), Phase::Geocoding);

        c.handle(ServiceMessage::GeocodeDone {
            seq: c.seq,
            result: Err(WeatherError::NotFound {
                query: "Paris".into(),
            }),
        });
        assert!(!c.view().loading);
        assert!(c.view().error_visible);
        assert_eq!(c.phase(), Phase::Idle);
    }
}
