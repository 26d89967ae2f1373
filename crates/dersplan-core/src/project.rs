use crate::schedule::{Activity, Day, ScheduleStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    SingleDay(Day),
    AllDays,
}

// One rendered view of the store. `origins` runs parallel to `lines`;
// positions holding None (headers, placeholders) are not selectable.
// Recomputed from scratch on every render, stale as soon as the store mutates.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub lines: Vec<String>,
    pub origins: Vec<Option<(Day, usize)>>,
}

impl Projection {
    pub fn resolve(&self, position: usize) -> Option<(Day, usize)> {
        self.origins.get(position).copied().flatten()
    }

    pub fn selectable_count(&self) -> usize {
        self.origins.iter().filter(|o| o.is_some()).count()
    }
}

pub fn format_activity(activity: &Activity) -> String {
    let mut line = format!("{} — {} dk", activity.title, activity.duration);
    if let Some(start) = &activity.start {
        line.push_str(&format!(" (Başl: {start})"));
    }
    line
}

pub fn project(store: &ScheduleStore, mode: ViewMode) -> Projection {
    match mode {
        ViewMode::SingleDay(day) => project_day(store, day),
        ViewMode::AllDays => project_all(store),
    }
}

pub fn project_day(store: &ScheduleStore, day: Day) -> Projection {
    let entries = store.day(day);
    let mut lines = Vec::with_capacity(entries.len().max(1));
    let mut origins = Vec::with_capacity(entries.len().max(1));

    if entries.is_empty() {
        lines.push(format!("{day} için etkinlik yok."));
        origins.push(None);
        return Projection { lines, origins };
    }

    for (position, activity) in entries.iter().enumerate() {
        lines.push(format_activity(activity));
        origins.push(Some((day, position)));
    }

    Projection { lines, origins }
}

pub fn project_all(store: &ScheduleStore) -> Projection {
    let mut lines = Vec::new();
    let mut origins = Vec::new();

    // Every day gets a header; an empty day gets a placeholder line under it.
    for (day, entries) in store.iter_days() {
        lines.push(format!("--- {day} ---"));
        origins.push(None);

        if entries.is_empty() {
            lines.push("(Etkinlik yok)".to_string());
            origins.push(None);
            continue;
        }

        for (position, activity) in entries.iter().enumerate() {
            lines.push(format!("{}. {}", position + 1, format_activity(activity)));
            origins.push(Some((day, position)));
        }
    }

    Projection { lines, origins }
}
