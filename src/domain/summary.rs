//! Aggregate statistics over the games.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use super::event::{Event, EventType};

/// Participation figures for a single year, summed over both seasons
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct YearParticipation {
    #[schema(example = 2012)]
    pub year: i32,
    pub participants: i64,
    pub participants_f: i64,
    /// Female share of participants with a known gender split
    pub female_share: Option<f64>,
}

/// Summary of all recorded events
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EventSummary {
    pub total_events: u64,
    pub summer_events: u64,
    pub winter_events: u64,
    pub total_participants: i64,
    /// Σ female / Σ (male + female) over events with both counts known
    pub female_share: Option<f64>,
    pub first_year: Option<i32>,
    pub latest_year: Option<i32>,
    /// Ordered by year ascending
    pub by_year: Vec<YearParticipation>,
}

#[derive(Default)]
struct Tally {
    participants: i64,
    male: i64,
    female: i64,
}

impl Tally {
    fn add(&mut self, event: &Event) {
        self.participants += i64::from(event.participants.unwrap_or(0));
        if let (Some(m), Some(f)) = (event.participants_m, event.participants_f) {
            self.male += i64::from(m);
            self.female += i64::from(f);
        }
    }

    fn female_share(&self) -> Option<f64> {
        let split = self.male + self.female;
        (split > 0).then(|| self.female as f64 / split as f64)
    }
}

impl EventSummary {
    pub fn from_events(events: &[Event]) -> Self {
        let mut overall = Tally::default();
        let mut years: BTreeMap<i32, Tally> = BTreeMap::new();

        for event in events {
            overall.add(event);
            years.entry(event.year).or_default().add(event);
        }

        let count = |t: EventType| events.iter().filter(|e| e.event_type == t).count() as u64;

        Self {
            total_events: events.len() as u64,
            summer_events: count(EventType::Summer),
            winter_events: count(EventType::Winter),
            total_participants: overall.participants,
            female_share: overall.female_share(),
            first_year: years.keys().next().copied(),
            latest_year: years.keys().next_back().copied(),
            by_year: years
                .iter()
                .map(|(year, tally)| YearParticipation {
                    year: *year,
                    participants: tally.participants,
                    participants_f: tally.female,
                    female_share: tally.female_share(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: i32, event_type: EventType, year: i32, m: Option<i32>, f: Option<i32>) -> Event {
        Event {
            id,
            event_type,
            year,
            country: "Somewhere".to_string(),
            host: "Somewhere".to_string(),
            noc: "AAA".to_string(),
            start: None,
            end: None,
            duration: None,
            disabilities_included: None,
            countries: None,
            events: None,
            sports: None,
            participants_m: m,
            participants_f: f,
            participants: match (m, f) {
                (Some(m), Some(f)) => Some(m + f),
                _ => Some(100),
            },
            highlights: None,
            url: None,
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = EventSummary::from_events(&[]);
        assert_eq!(summary.total_events, 0);
        assert_eq!(summary.female_share, None);
        assert_eq!(summary.first_year, None);
        assert!(summary.by_year.is_empty());
    }

    #[test]
    fn test_summary_counts_and_shares() {
        let events = vec![
            event(1, EventType::Summer, 2012, Some(300), Some(100)),
            event(2, EventType::Winter, 2014, Some(150), Some(50)),
            event(3, EventType::Summer, 2016, None, None),
            event(4, EventType::Winter, 2012, Some(50), Some(50)),
        ];

        let summary = EventSummary::from_events(&events);

        assert_eq!(summary.total_events, 4);
        assert_eq!(summary.summer_events, 2);
        assert_eq!(summary.winter_events, 2);
        assert_eq!(summary.total_participants, 400 + 200 + 100 + 100);
        assert_eq!(summary.female_share, Some(200.0 / 700.0));
        assert_eq!(summary.first_year, Some(2012));
        assert_eq!(summary.latest_year, Some(2016));

        let years: Vec<i32> = summary.by_year.iter().map(|y| y.year).collect();
        assert_eq!(years, vec![2012, 2014, 2016]);

        let y2012 = &summary.by_year[0];
        assert_eq!(y2012.participants, 500);
        assert_eq!(y2012.participants_f, 150);
        assert_eq!(y2012.female_share, Some(150.0 / 500.0));
        assert_eq!(summary.by_year[2].female_share, None);
    }
}
