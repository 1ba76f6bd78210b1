//! Event domain entity and related types.
//!
//! An event is one edition of the summer or winter paralympic games.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::region::NOC_PATTERN;
use crate::config::{EVENT_TYPE_SUMMER, EVENT_TYPE_WINTER};
use crate::errors::{AppError, AppResult};

/// Games season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Summer,
    Winter,
}

impl FromStr for EventType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            EVENT_TYPE_SUMMER => Ok(EventType::Summer),
            EVENT_TYPE_WINTER => Ok(EventType::Winter),
            other => Err(AppError::validation(format!(
                "Unknown event type '{}', expected summer or winter",
                other
            ))),
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::Summer => write!(f, "{}", EVENT_TYPE_SUMMER),
            EventType::Winter => write!(f, "{}", EVENT_TYPE_WINTER),
        }
    }
}

/// Event domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    #[schema(example = 1)]
    pub id: i32,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[schema(example = 2012)]
    pub year: i32,
    #[schema(example = "UK")]
    pub country: String,
    #[schema(example = "London")]
    pub host: String,
    /// Code of the hosting region
    #[serde(rename = "NOC")]
    #[schema(example = "GBR")]
    pub noc: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Length of the games in days
    pub duration: Option<i32>,
    pub disabilities_included: Option<String>,
    pub countries: Option<i32>,
    pub events: Option<i32>,
    pub sports: Option<i32>,
    pub participants_m: Option<i32>,
    pub participants_f: Option<i32>,
    pub participants: Option<i32>,
    pub highlights: Option<String>,
    #[serde(rename = "URL")]
    pub url: Option<String>,
}

impl Event {
    /// Apply a partial update, recomputing derived fields the update
    /// invalidates unless it sets them explicitly.
    pub fn apply(&mut self, update: UpdateEvent) -> AppResult<()> {
        let dates_changed = update.start.is_some() || update.end.is_some();
        let counts_changed = update.participants_m.is_some() || update.participants_f.is_some();

        if let Some(event_type) = update.event_type {
            self.event_type = event_type;
        }
        if let Some(year) = update.year {
            self.year = year;
        }
        if let Some(country) = update.country {
            self.country = country;
        }
        if let Some(host) = update.host {
            self.host = host;
        }
        if let Some(noc) = update.noc {
            self.noc = noc;
        }
        if update.start.is_some() {
            self.start = update.start;
        }
        if update.end.is_some() {
            self.end = update.end;
        }
        if update.disabilities_included.is_some() {
            self.disabilities_included = update.disabilities_included;
        }
        if update.countries.is_some() {
            self.countries = update.countries;
        }
        if update.events.is_some() {
            self.events = update.events;
        }
        if update.sports.is_some() {
            self.sports = update.sports;
        }
        if update.participants_m.is_some() {
            self.participants_m = update.participants_m;
        }
        if update.participants_f.is_some() {
            self.participants_f = update.participants_f;
        }
        if update.highlights.is_some() {
            self.highlights = update.highlights;
        }
        if update.url.is_some() {
            self.url = update.url;
        }

        match update.duration {
            Some(duration) => self.duration = Some(duration),
            None if dates_changed => self.duration = derive_duration(self.start, self.end),
            None => {}
        }
        match update.participants {
            Some(total) => self.participants = Some(total),
            None if counts_changed => {
                self.participants = derive_participants(self.participants_m, self.participants_f)
            }
            None => {}
        }

        check_dates(self.start, self.end).map_err(|e| AppError::validation(message_of(&e)))
    }
}

/// Event creation payload
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[validate(schema(function = "validate_new_event_dates"))]
pub struct NewEvent {
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[validate(range(min = 1960, max = 2100, message = "Year must be between 1960 and 2100"))]
    #[schema(example = 2012)]
    pub year: i32,
    #[validate(length(min = 1, message = "Country is required"))]
    #[schema(example = "UK")]
    pub country: String,
    #[validate(length(min = 1, message = "Host is required"))]
    #[schema(example = "London")]
    pub host: String,
    #[serde(rename = "NOC")]
    #[validate(regex(path = *NOC_PATTERN, message = "NOC must be three uppercase letters"))]
    #[schema(example = "GBR")]
    pub noc: String,
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
    #[serde(default)]
    #[validate(range(min = 0, message = "Duration must not be negative"))]
    pub duration: Option<i32>,
    #[serde(default)]
    pub disabilities_included: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, message = "Countries must not be negative"))]
    pub countries: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 0, message = "Events must not be negative"))]
    pub events: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 0, message = "Sports must not be negative"))]
    pub sports: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 0, message = "Participants must not be negative"))]
    pub participants_m: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 0, message = "Participants must not be negative"))]
    pub participants_f: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 0, message = "Participants must not be negative"))]
    pub participants: Option<i32>,
    #[serde(default)]
    pub highlights: Option<String>,
    #[serde(default, rename = "URL")]
    #[validate(url(message = "URL must be a valid URL"))]
    pub url: Option<String>,
}

impl NewEvent {
    /// Fill in duration and participant totals that can be derived.
    pub fn with_derived_fields(mut self) -> Self {
        if self.duration.is_none() {
            self.duration = derive_duration(self.start, self.end);
        }
        if self.participants.is_none() {
            self.participants = derive_participants(self.participants_m, self.participants_f);
        }
        self
    }

    /// Materialize the payload as an event with the given identifier
    pub fn into_event(self, id: i32) -> Event {
        Event {
            id,
            event_type: self.event_type,
            year: self.year,
            country: self.country,
            host: self.host,
            noc: self.noc,
            start: self.start,
            end: self.end,
            duration: self.duration,
            disabilities_included: self.disabilities_included,
            countries: self.countries,
            events: self.events,
            sports: self.sports,
            participants_m: self.participants_m,
            participants_f: self.participants_f,
            participants: self.participants,
            highlights: self.highlights,
            url: self.url,
        }
    }
}

/// Event update payload, absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEvent {
    #[serde(default, rename = "type")]
    pub event_type: Option<EventType>,
    #[validate(range(min = 1960, max = 2100, message = "Year must be between 1960 and 2100"))]
    pub year: Option<i32>,
    #[validate(length(min = 1, message = "Country must not be empty"))]
    pub country: Option<String>,
    #[validate(length(min = 1, message = "Host must not be empty"))]
    pub host: Option<String>,
    #[serde(default, rename = "NOC")]
    #[validate(regex(path = *NOC_PATTERN, message = "NOC must be three uppercase letters"))]
    pub noc: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    #[validate(range(min = 0, message = "Duration must not be negative"))]
    pub duration: Option<i32>,
    pub disabilities_included: Option<String>,
    #[validate(range(min = 0, message = "Countries must not be negative"))]
    pub countries: Option<i32>,
    #[validate(range(min = 0, message = "Events must not be negative"))]
    pub events: Option<i32>,
    #[validate(range(min = 0, message = "Sports must not be negative"))]
    pub sports: Option<i32>,
    #[validate(range(min = 0, message = "Participants must not be negative"))]
    pub participants_m: Option<i32>,
    #[validate(range(min = 0, message = "Participants must not be negative"))]
    pub participants_f: Option<i32>,
    #[validate(range(min = 0, message = "Participants must not be negative"))]
    pub participants: Option<i32>,
    pub highlights: Option<String>,
    #[serde(default, rename = "URL")]
    #[validate(url(message = "URL must be a valid URL"))]
    pub url: Option<String>,
}

/// Criteria for listing events; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub event_type: Option<EventType>,
    pub year: Option<i32>,
    /// Hosting region code
    pub noc: Option<String>,
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        self.event_type.map_or(true, |t| t == event.event_type)
            && self.year.map_or(true, |y| y == event.year)
            && self.noc.as_deref().map_or(true, |n| n == event.noc)
    }
}

fn validate_new_event_dates(event: &NewEvent) -> Result<(), ValidationError> {
    check_dates(event.start, event.end)
}

fn check_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => {
            let mut err = ValidationError::new("date_order");
            err.message = Some("End date must not be before start date".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

fn message_of(err: &ValidationError) -> String {
    err.message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| err.code.to_string())
}

fn derive_duration(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<i32> {
    match (start, end) {
        (Some(start), Some(end)) if end >= start => i32::try_from((end - start).num_days()).ok(),
        _ => None,
    }
}

fn derive_participants(male: Option<i32>, female: Option<i32>) -> Option<i32> {
    Some(male?.checked_add(female?)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn london() -> NewEvent {
        NewEvent {
            event_type: EventType::Summer,
            year: 2012,
            country: "UK".to_string(),
            host: "London".to_string(),
            noc: "GBR".to_string(),
            start: Some(date(2012, 8, 29)),
            end: Some(date(2012, 9, 9)),
            duration: None,
            disabilities_included: None,
            countries: Some(164),
            events: Some(503),
            sports: Some(20),
            participants_m: Some(2736),
            participants_f: Some(1501),
            participants: None,
            highlights: None,
            url: Some("https://www.paralympic.org/london-2012".to_string()),
        }
    }

    #[test]
    fn test_event_type_parsing() {
        assert_eq!("summer".parse::<EventType>().unwrap(), EventType::Summer);
        assert_eq!("Winter".parse::<EventType>().unwrap(), EventType::Winter);
        assert!("spring".parse::<EventType>().is_err());
        assert_eq!(EventType::Winter.to_string(), "winter");
    }

    #[test]
    fn test_valid_event_passes_validation() {
        assert!(london().validate().is_ok());
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let mut event = london();
        event.end = Some(date(2012, 8, 1));
        assert!(event.validate().is_err());
    }

    #[test]
    fn test_year_out_of_range_is_rejected() {
        let mut event = london();
        event.year = 1948;
        assert!(event.validate().is_err());
        event.year = 1960;
        assert!(event.validate().is_ok());
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let mut event = london();
        event.url = Some("not a url".to_string());
        assert!(event.validate().is_err());
    }

    #[test]
    fn test_derived_fields() {
        let event = london().with_derived_fields();
        assert_eq!(event.duration, Some(11));
        assert_eq!(event.participants, Some(4237));
    }

    #[test]
    fn test_explicit_fields_are_not_overwritten() {
        let mut payload = london();
        payload.duration = Some(12);
        payload.participants = Some(4302);
        let event = payload.with_derived_fields();
        assert_eq!(event.duration, Some(12));
        assert_eq!(event.participants, Some(4302));
    }

    #[test]
    fn test_missing_counts_leave_total_unset() {
        let mut payload = london();
        payload.participants_f = None;
        assert_eq!(payload.with_derived_fields().participants, None);
    }

    #[test]
    fn test_apply_recomputes_derived_fields() {
        let mut event = london().with_derived_fields().into_event(1);
        event
            .apply(UpdateEvent {
                end: Some(date(2012, 9, 2)),
                participants_f: Some(1264),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(event.duration, Some(4));
        assert_eq!(event.participants, Some(4000));
    }

    #[test]
    fn test_apply_rejects_inverted_dates() {
        let mut event = london().into_event(1);
        let result = event.apply(UpdateEvent {
            start: Some(date(2013, 1, 1)),
            ..Default::default()
        });
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_event_json_keys() {
        let event = london().into_event(7);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "summer");
        assert_eq!(json["NOC"], "GBR");
        assert_eq!(json["start"], "2012-08-29");
        assert!(json.get("URL").is_some());
    }

    #[test]
    fn test_filter_matches() {
        let event = london().into_event(1);
        assert!(EventFilter::default().matches(&event));
        assert!(EventFilter {
            event_type: Some(EventType::Summer),
            year: Some(2012),
            noc: Some("GBR".to_string()),
        }
        .matches(&event));
        assert!(!EventFilter {
            event_type: Some(EventType::Winter),
            ..Default::default()
        }
        .matches(&event));
    }
}
