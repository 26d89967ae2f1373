use std::path::Path;

use dersplan_core::cli::Invocation;
use dersplan_core::commands;
use dersplan_core::config::Config;
use dersplan_core::persist::{self, Workspace};
use dersplan_core::project::{ViewMode, project, project_day};
use dersplan_core::render::Renderer;
use dersplan_core::schedule::Day;
use dersplan_core::validate;
use tempfile::tempdir;

fn test_config(dir: &Path) -> Config {
    let rc = dir.join("dersplanrc");
    std::fs::write(&rc, "color = off\n").expect("write rc");
    Config::load(Some(rc.as_path())).expect("load config")
}

fn invocation(command: &str, args: &[&str]) -> Invocation {
    Invocation {
        command: command.to_string(),
        args: args.iter().map(|a| a.to_string()).collect(),
    }
}

#[test]
fn workspace_add_delete_and_export_flow() {
    let temp = tempdir().expect("tempdir");
    let workspace = Workspace::open(temp.path()).expect("open workspace");

    let mut store = workspace.load().expect("load fresh store");
    assert!(store.is_empty());

    let title = validate::validate_title("  Matematik ").expect("title");
    let duration = validate::validate_duration("60").expect("duration");
    let start = validate::validate_start("09:00").expect("start");
    store.add(
        Day::Persembe,
        validate::build_activity(title, duration, start),
    );
    store.add(Day::Persembe, validate::reading_session());
    workspace.save(&store).expect("persist working copy");

    // The reading flag appends exactly one fixed session after the activity.
    let reopened = workspace.load().expect("reload working copy");
    assert_eq!(reopened, store);
    let entries = reopened.day(Day::Persembe);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title, "Matematik");
    assert_eq!(entries[1].title, "Kitap Okuma");
    assert_eq!(entries[1].duration, 30);

    // Delete through the all-days projection: three header/placeholder pairs
    // precede the Perşembe header at position 6, and the header itself is inert.
    let projection = project(&store, ViewMode::AllDays);
    assert_eq!(projection.lines[6], "--- Perşembe ---");
    assert_eq!(projection.resolve(6), None);
    let (day, index) = projection.resolve(7).expect("first activity line");
    assert_eq!(day, Day::Persembe);
    let removed = store.remove(day, index).expect("remove");
    assert_eq!(removed.title, "Matematik");
    workspace.save(&store).expect("persist after delete");

    let after = project_day(&store, Day::Persembe);
    assert_eq!(after.lines, vec!["Kitap Okuma — 30 dk".to_string()]);

    let export_path = temp.path().join("program.txt");
    persist::export_to(&store, &export_path).expect("export");
    let text = std::fs::read_to_string(&export_path).expect("read export");
    assert!(text.starts_with("Haftalık Ders Programı\n"));
    assert!(text.contains("--- Perşembe ---\n  1. Kitap Okuma — 30 dk"));
}

#[test]
fn dispatched_add_with_okuma_appends_exactly_two_activities() {
    let temp = tempdir().expect("tempdir");
    let workspace = Workspace::open(temp.path()).expect("open workspace");
    let cfg = test_config(temp.path());
    let mut renderer = Renderer::new(&cfg).expect("renderer");

    let inv = invocation("add", &["salı", "Kimya", "45", "10:15", "--okuma"]);
    commands::dispatch(&workspace, &cfg, &mut renderer, inv).expect("dispatch add");

    let store = workspace.load().expect("reload");
    let entries = store.day(Day::Sali);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title, "Kimya");
    assert_eq!(entries[0].duration, 45);
    assert_eq!(entries[0].start.as_deref(), Some("10:15"));
    assert_eq!(entries[1].title, "Kitap Okuma");
    assert_eq!(entries[1].duration, 30);
    assert_eq!(entries[1].start, None);
}

#[test]
fn dispatched_add_with_rejected_input_is_a_notice_not_a_failure() {
    let temp = tempdir().expect("tempdir");
    let workspace = Workspace::open(temp.path()).expect("open workspace");
    let cfg = test_config(temp.path());
    let mut renderer = Renderer::new(&cfg).expect("renderer");

    // A blank title warns on the notification surface and aborts the add;
    // the process-level result stays Ok and the store stays untouched.
    let inv = invocation("add", &["pazartesi", "   ", "60"]);
    commands::dispatch(&workspace, &cfg, &mut renderer, inv).expect("notice, not error");
    assert!(workspace.load().expect("reload").is_empty());

    let inv = invocation("add", &["pazartesi", "Matematik", "abc"]);
    commands::dispatch(&workspace, &cfg, &mut renderer, inv).expect("notice, not error");
    assert!(workspace.load().expect("reload").is_empty());

    let inv = invocation("add", &["pazartesi", "Matematik", "60", "9:30"]);
    commands::dispatch(&workspace, &cfg, &mut renderer, inv).expect("notice, not error");
    assert!(workspace.load().expect("reload").is_empty());
}

#[test]
fn data_free_commands_survive_a_corrupt_working_copy() {
    let temp = tempdir().expect("tempdir");
    let workspace = Workspace::open(temp.path()).expect("open workspace");
    let cfg = test_config(temp.path());
    let mut renderer = Renderer::new(&cfg).expect("renderer");

    std::fs::write(&workspace.schedule_path, "{{{ not json").expect("corrupt file");

    for command in ["days", "help", "version"] {
        commands::dispatch(&workspace, &cfg, &mut renderer, invocation(command, &[]))
            .unwrap_or_else(|err| panic!("{command} should not need the store: {err:#}"));
    }

    let err = commands::dispatch(&workspace, &cfg, &mut renderer, invocation("list", &[]))
        .expect_err("list needs the store");
    assert!(err.to_string().contains("schedule.json"));
}

#[test]
fn failed_load_leaves_the_working_copy_alone() {
    let temp = tempdir().expect("tempdir");
    let workspace = Workspace::open(temp.path()).expect("open workspace");

    let mut store = workspace.load().expect("load");
    store.add(Day::Cuma, validate::build_activity("Fizik".to_string(), 45, None));
    workspace.save(&store).expect("save");

    let bad = temp.path().join("bozuk.json");
    std::fs::write(&bad, "[]").expect("write");
    assert!(persist::load_from(&bad).is_err());

    // Nothing replaced the working copy, so a reload still sees Fizik.
    let untouched = workspace.load().expect("reload");
    assert_eq!(untouched.day(Day::Cuma).len(), 1);
}
