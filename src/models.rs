use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakState {
    pub start_date: NaiveDate,
    pub completed: BTreeSet<u32>,
    pub missed: BTreeSet<u32>,
    pub notes: BTreeMap<u32, String>,
}

impl StreakState {
    pub fn fresh(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            completed: BTreeSet::new(),
            missed: BTreeSet::new(),
            notes: BTreeMap::new(),
        }
    }
}

// Persisted record. camelCase keys and a string start date keep the file
// compatible with trackers exported from browser local storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredState {
    pub start_date: String,
    #[serde(default)]
    pub completed: Vec<u32>,
    #[serde(default)]
    pub missed: Vec<u32>,
    #[serde(default)]
    pub notes: BTreeMap<String, String>,
}

impl StoredState {
    pub fn from_state(state: &StreakState) -> Self {
        Self {
            start_date: format!("{}T00:00:00", state.start_date),
            completed: state.completed.iter().copied().collect(),
            missed: state.missed.iter().copied().collect(),
            notes: state
                .notes
                .iter()
                .map(|(day, note)| (day.to_string(), note.clone()))
                .collect(),
        }
    }

    // Returns None when no usable start date survives; anything else is
    // dropped entry-by-entry so a loaded state always satisfies the
    // invariants: day numbers in range, completed/missed disjoint, notes
    // non-empty.
    pub fn into_state(self, total_days: u32) -> Option<StreakState> {
        let start_date = parse_start_date(&self.start_date)?;

        let completed: BTreeSet<u32> = self
            .completed
            .into_iter()
            .filter(|day| (1..=total_days).contains(day))
            .collect();
        let missed: BTreeSet<u32> = self
            .missed
            .into_iter()
            .filter(|day| (1..=total_days).contains(day) && !completed.contains(day))
            .collect();
        let notes: BTreeMap<u32, String> = self
            .notes
            .into_iter()
            .filter_map(|(day, note)| {
                let day = day.parse::<u32>().ok()?;
                let note = note.trim().to_string();
                if (1..=total_days).contains(&day) && !note.is_empty() {
                    Some((day, note))
                } else {
                    None
                }
            })
            .collect();

        Some(StreakState {
            start_date,
            completed,
            missed,
            notes,
        })
    }
}

fn parse_start_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.date_naive());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.date());
    }
    raw.parse::<NaiveDate>().ok()
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub day: u32,
}

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub day: u32,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TrackerResponse {
    pub name: String,
    pub key: String,
    pub total_days: u32,
    pub start_date: String,
    pub current_day: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub percent_complete: u32,
    pub completed_count: u32,
    pub completed: Vec<u32>,
    pub missed: Vec<u32>,
    pub notes: BTreeMap<u32, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(start_date: &str) -> StoredState {
        StoredState {
            start_date: start_date.to_string(),
            completed: Vec::new(),
            missed: Vec::new(),
            notes: BTreeMap::new(),
        }
    }

    #[test]
    fn parses_rfc3339_and_plain_dates() {
        for raw in [
            "2026-01-05T00:00:00.000Z",
            "2026-01-05T00:00:00",
            "2026-01-05",
        ] {
            let state = stored(raw).into_state(30).expect("should parse");
            assert_eq!(
                state.start_date,
                NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
            );
        }
    }

    #[test]
    fn unparseable_start_date_reads_as_missing() {
        assert!(stored("not-a-date").into_state(30).is_none());
        assert!(stored("").into_state(30).is_none());
    }

    #[test]
    fn load_drops_entries_that_break_invariants() {
        let mut raw = stored("2026-01-05T00:00:00");
        raw.completed = vec![1, 2, 99];
        raw.missed = vec![2, 3, 0];
        raw.notes = BTreeMap::from([
            ("0".to_string(), "out of range".to_string()),
            ("3".to_string(), "hello".to_string()),
            ("4".to_string(), "   ".to_string()),
            ("x".to_string(), "bad key".to_string()),
        ]);

        let state = raw.into_state(30).expect("start date is fine");
        assert_eq!(state.completed, BTreeSet::from([1, 2]));
        assert_eq!(state.missed, BTreeSet::from([3]));
        assert_eq!(state.notes, BTreeMap::from([(3, "hello".to_string())]));
    }

    #[test]
    fn round_trips_through_stored_form() {
        let mut state = StreakState::fresh(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        state.completed = BTreeSet::from([1, 2, 4]);
        state.missed = BTreeSet::from([3]);
        state.notes = BTreeMap::from([(2, "felt great".to_string())]);

        let reloaded = StoredState::from_state(&state)
            .into_state(30)
            .expect("round trip");
        assert_eq!(reloaded, state);
    }
}
