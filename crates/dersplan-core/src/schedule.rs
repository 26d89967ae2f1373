use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Day {
    Pazartesi,
    #[serde(rename = "Salı")]
    Sali,
    #[serde(rename = "Çarşamba")]
    Carsamba,
    #[serde(rename = "Perşembe")]
    Persembe,
    Cuma,
    Cumartesi,
    Pazar,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Pazartesi,
        Day::Sali,
        Day::Carsamba,
        Day::Persembe,
        Day::Cuma,
        Day::Cumartesi,
        Day::Pazar,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Day::Pazartesi => "Pazartesi",
            Day::Sali => "Salı",
            Day::Carsamba => "Çarşamba",
            Day::Persembe => "Perşembe",
            Day::Cuma => "Cuma",
            Day::Cumartesi => "Cumartesi",
            Day::Pazar => "Pazar",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Day {
    type Err = anyhow::Error;

    // Exact Turkish label, or an ASCII-folded lowercase alias for CLI typing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s
            .trim()
            .to_lowercase()
            .replace('ı', "i")
            .replace('ş', "s")
            .replace('ç', "c");
        match folded.as_str() {
            "pazartesi" => Ok(Day::Pazartesi),
            "sali" => Ok(Day::Sali),
            "carsamba" => Ok(Day::Carsamba),
            "persembe" => Ok(Day::Persembe),
            "cuma" => Ok(Day::Cuma),
            "cumartesi" => Ok(Day::Cumartesi),
            "pazar" => Ok(Day::Pazar),
            other => Err(anyhow!("unknown day: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub duration: i64,

    #[serde(default)]
    pub start: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Activity {
    pub fn new(title: String, duration: i64, start: Option<String>) -> Self {
        Self {
            title,
            duration,
            start,
            extra: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(transparent)]
pub struct ScheduleStore {
    days: BTreeMap<Day, Vec<Activity>>,
}

impl Default for ScheduleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleStore {
    // All seven day keys exist from the start and are never removed.
    pub fn new() -> Self {
        let mut days = BTreeMap::new();
        for day in Day::ALL {
            days.insert(day, Vec::new());
        }
        Self { days }
    }

    pub fn add(&mut self, day: Day, activity: Activity) {
        self.days.entry(day).or_default().push(activity);
    }

    pub fn remove(&mut self, day: Day, position: usize) -> anyhow::Result<Activity> {
        let entries = self.days.entry(day).or_default();
        if position >= entries.len() {
            return Err(anyhow!(
                "no activity at position {position} for {day} (have {})",
                entries.len()
            ));
        }
        Ok(entries.remove(position))
    }

    pub fn replace_all(&mut self, new_days: BTreeMap<Day, Vec<Activity>>) {
        self.days = new_days;
        for day in Day::ALL {
            self.days.entry(day).or_default();
        }
    }

    pub fn day(&self, day: Day) -> &[Activity] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter_days(&self) -> impl Iterator<Item = (Day, &[Activity])> {
        Day::ALL.into_iter().map(|day| (day, self.day(day)))
    }

    pub fn total_activities(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_activities() == 0
    }
}
