use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::project::format_activity;
use crate::schedule::{Activity, Day, ScheduleStore};

pub const EXPORT_TITLE: &str = "Haftalık Ders Programı";

// Working copy of the schedule, kept under the data directory and rewritten
// after every mutating command. Explicit save/load/export work on user paths.
#[derive(Debug)]
pub struct Workspace {
    pub data_dir: PathBuf,
    pub schedule_path: PathBuf,
}

impl Workspace {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let data_dir = data_dir.to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        let schedule_path = data_dir.join("schedule.json");
        if !schedule_path.exists() {
            save_to(&ScheduleStore::new(), &schedule_path)?;
        }

        info!(
            data_dir = %data_dir.display(),
            schedule = %schedule_path.display(),
            "opened workspace"
        );

        Ok(Self {
            data_dir,
            schedule_path,
        })
    }

    #[tracing::instrument(skip(self))]
    pub fn load(&self) -> anyhow::Result<ScheduleStore> {
        load_from(&self.schedule_path).context("failed to load schedule.json")
    }

    #[tracing::instrument(skip(self, store))]
    pub fn save(&self, store: &ScheduleStore) -> anyhow::Result<()> {
        save_to(store, &self.schedule_path).context("failed to save schedule.json")
    }
}

#[tracing::instrument(skip(store, path))]
pub fn save_to(store: &ScheduleStore, path: &Path) -> anyhow::Result<()> {
    debug!(file = %path.display(), count = store.total_activities(), "saving schedule");
    let serialized = serde_json::to_string_pretty(store)?;
    write_atomic(path, &serialized)
}

#[tracing::instrument(skip(path))]
pub fn load_from(path: &Path) -> anyhow::Result<ScheduleStore> {
    debug!(file = %path.display(), "loading schedule");
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed reading {}", path.display()))?;

    let root: Value = serde_json::from_str(&text)
        .with_context(|| format!("failed parsing {}", path.display()))?;

    let Value::Object(mut map) = root else {
        return Err(anyhow!(
            "invalid file structure in {}: root is not a mapping",
            path.display()
        ));
    };

    // Only the top-level day-key/sequence shape is checked. Day labels outside
    // the canonical seven are dropped; anything that is not a sequence becomes
    // an empty day. Individual activity fields are absorbed leniently.
    let mut days: BTreeMap<Day, Vec<Activity>> = BTreeMap::new();
    for day in Day::ALL {
        let entries = match map.remove(day.label()) {
            Some(Value::Array(items)) => items.into_iter().map(activity_from_value).collect(),
            _ => Vec::new(),
        };
        days.insert(day, entries);
    }

    let mut store = ScheduleStore::new();
    store.replace_all(days);

    debug!(count = store.total_activities(), "loaded schedule");
    Ok(store)
}

fn activity_from_value(value: Value) -> Activity {
    let Value::Object(fields) = value else {
        return Activity::default();
    };

    let mut activity = Activity::default();
    for (key, field) in fields {
        match key.as_str() {
            "title" => {
                if let Value::String(text) = field {
                    activity.title = text;
                }
            }
            "duration" => {
                if let Some(minutes) = field.as_i64() {
                    activity.duration = minutes;
                }
            }
            "start" => {
                if let Value::String(text) = field {
                    activity.start = Some(text);
                }
            }
            _ => {
                activity.extra.insert(key, field);
            }
        }
    }
    activity
}

pub fn export_text(store: &ScheduleStore) -> String {
    let mut out = String::new();
    out.push_str(EXPORT_TITLE);
    out.push('\n');
    out.push_str(&"=".repeat(25));
    out.push_str("\n\n");

    for (day, entries) in store.iter_days() {
        out.push_str(&format!("--- {day} ---\n"));
        if entries.is_empty() {
            out.push_str("  (Etkinlik yok)\n\n");
            continue;
        }
        for (position, activity) in entries.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", position + 1, format_activity(activity)));
        }
        out.push('\n');
    }

    out
}

#[tracing::instrument(skip(store, path))]
pub fn export_to(store: &ScheduleStore, path: &Path) -> anyhow::Result<()> {
    debug!(file = %path.display(), "exporting schedule as text");
    write_atomic(path, &export_text(store))
}

fn write_atomic(path: &Path, contents: &str) -> anyhow::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file near {}", path.display()))?;
    temp.write_all(contents.as_bytes())?;
    temp.flush()?;
    temp.persist(path)
        .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;
    Ok(())
}
