//! View surface: the capability the controller renders through, and an
//! in-memory implementation the terminal front end prints.

use std::fmt;

/// Single-value display slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    City,
    Date,
    Temperature,
    Icon,
    Condition,
    FeelsLike,
    Humidity,
    Wind,
    Precipitation,
    UnitToggle,
    SearchInput,
    ErrorMessage,
}

/// Repeated-entry containers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryList {
    Daily,
    Hourly,
}

/// Regions that are shown or hidden as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Loading,
    Error,
}

/// One forecast row as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub label: String,
    pub values: Vec<String>,
}

/// Output capability for the controller.
///
/// Implementations own whatever display surface they drive; the controller only
/// ever pushes values into it.
pub trait ViewSink {
    fn set_text(&mut self, slot: Slot, text: &str);
    fn set_image(&mut self, slot: Slot, source: &str);
    fn clear_entries(&mut self, list: EntryList);
    fn append_entry(&mut self, list: EntryList, entry: EntryView);
    fn set_visible(&mut self, region: Region, visible: bool);
}

/// In-memory view model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub city: String,
    pub date: String,
    pub temperature: String,
    pub icon: String,
    pub condition: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub precipitation: String,
    pub unit_toggle: String,
    pub search_input: String,
    pub error_message: String,
    pub daily: Vec<EntryView>,
    pub hourly: Vec<EntryView>,
    pub loading: bool,
    pub error_visible: bool,
}

impl ViewState {
    fn slot_mut(&mut self, slot: Slot) -> &mut String {
        match slot {
            Slot::City => &mut self.city,
            Slot::Date => &mut self.date,
            Slot::Temperature => &mut self.temperature,
            Slot::Icon => &mut self.icon,
            Slot::Condition => &mut self.condition,
            Slot::FeelsLike => &mut self.feels_like,
            Slot::Humidity => &mut self.humidity,
            Slot::Wind => &mut self.wind,
            Slot::Precipitation => &mut self.precipitation,
            Slot::UnitToggle => &mut self.unit_toggle,
            Slot::SearchInput => &mut self.search_input,
            Slot::ErrorMessage => &mut self.error_message,
        }
    }

    fn list_mut(&mut self, list: EntryList) -> &mut Vec<EntryView> {
        match list {
            EntryList::Daily => &mut self.daily,
            EntryList::Hourly => &mut self.hourly,
        }
    }

    /// Whether current conditions have been rendered at least once
    pub fn has_data(&self) -> bool {
        !self.city.is_empty()
    }
}

impl ViewSink for ViewState {
    fn set_text(&mut self, slot: Slot, text: &str) {
        *self.slot_mut(slot) = text.to_string();
    }

    fn set_image(&mut self, slot: Slot, source: &str) {
        *self.slot_mut(slot) = source.to_string();
    }

    fn clear_entries(&mut self, list: EntryList) {
        self.list_mut(list).clear();
    }

    fn append_entry(&mut self, list: EntryList, entry: EntryView) {
        self.list_mut(list).push(entry);
    }

    fn set_visible(&mut self, region: Region, visible: bool) {
        match region {
            Region::Loading => self.loading = visible,
            Region::Error => self.error_visible = visible,
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.loading {
            writeln!(f, "Loading...")?;
        }
        if self.error_visible {
            writeln!(f, "! {}", self.error_message)?;
        }
        if !self.has_data() {
            return Ok(());
        }

        writeln!(f, "{}", self.city)?;
        writeln!(f, "{}", self.date)?;
        writeln!(f, "{}  {} ({})", self.temperature, self.condition, self.icon)?;
        writeln!(
            f,
            "Feels like {} | Humidity {} | Wind {} | Precipitation {}",
            self.feels_like, self.humidity, self.wind, self.precipitation
        )?;

        if !self.daily.is_empty() {
            writeln!(f, "Daily:")?;
            for entry in &self.daily {
                writeln!(f, "  {:<5} {}", entry.label, entry.values.join(" / "))?;
            }
        }
        if !self.hourly.is_empty() {
            writeln!(f, "Hourly:")?;
            for entry in &self.hourly {
                writeln!(f, "  {:<5} {}", entry.label, entry.values.join(" / "))?;
            }
        }

        writeln!(f, "[{}]", self.unit_toggle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_text_routes_to_slot() {
        let mut view = ViewState::default();
        view.set_text(Slot::City, "Berlin, Germany");
        view.set_image(Slot::Icon, "icons/sunny.svg");
        assert_eq!(view.city, "Berlin, Germany");
        assert_eq!(view.icon, "icons/sunny.svg");
        assert!(view.has_data());
    }

    #[test]
    fn test_entries_clear_and_append() {
        let mut view = ViewState::default();
        let entry = EntryView {
            label: "Mon".into(),
            values: vec!["5°".into(), "-1°".into()],
        };
        view.append_entry(EntryList::Daily, entry.clone());
        view.append_entry(EntryList::Daily, entry);
        assert_eq!(view.daily.len(), 2);
        assert!(view.hourly.is_empty());

        view.clear_entries(EntryList::Daily);
        assert!(view.daily.is_empty());
    }

    #[test]
    fn test_display_shows_error_without_data() {
        let mut view = ViewState::default();
        view.set_text(Slot::ErrorMessage, "Location not found.");
        view.set_visible(Region::Error, true);

        let rendered = view.to_string();
        assert_eq!(rendered, "! Location not found.\n");
    }

    #[test]
    fn test_display_panel() {
        let mut view = ViewState::default();
        view.set_text(Slot::City, "Berlin, Germany");
        view.set_text(Slot::Temperature, "18°");
        view.append_entry(
            EntryList::Hourly,
            EntryView {
                label: "12:00".into(),
                values: vec!["18°".into()],
            },
        );

        let rendered = view.to_string();
        assert!(rendered.starts_with("Berlin, Germany\n"));
        assert!(rendered.contains("Hourly:\n  12:00 18°\n"));
        assert!(!rendered.contains("Daily:"));
    }
}
