use std::path::Path;

use anyhow::anyhow;
use tracing::{debug, info, instrument, warn};

use crate::cli::Invocation;
use crate::config::Config;
use crate::persist::{self, Workspace};
use crate::project::{self, ViewMode};
use crate::render::{Renderer, Severity};
use crate::schedule::{Day, ScheduleStore};
use crate::validate::{self, Reject};

pub fn known_command_names() -> Vec<&'static str> {
    vec![
        "add", "all", "days", "delete", "export", "help", "list", "load", "save", "version",
    ]
}

pub fn expand_command_abbrev<'a>(token: &'a str, known: &[&'a str]) -> Option<&'a str> {
    if known.contains(&token) {
        return Some(token);
    }

    let mut matches = known.iter().copied().filter(|name| name.starts_with(token));
    let first = matches.next()?;
    if matches.next().is_some() {
        None
    } else {
        Some(first)
    }
}

#[instrument(skip(workspace, cfg, renderer, inv))]
pub fn dispatch(
    workspace: &Workspace,
    cfg: &Config,
    renderer: &mut Renderer,
    inv: Invocation,
) -> anyhow::Result<()> {
    debug!(command = %inv.command, args = ?inv.args, "dispatching");

    // These need no schedule data and must work even if the working copy is
    // unreadable.
    match inv.command.as_str() {
        "days" => return cmd_days(),
        "help" => return cmd_help(),
        "version" => return cmd_version(),
        _ => {}
    }

    let mut store = workspace.load()?;

    match inv.command.as_str() {
        "add" => cmd_add(workspace, renderer, &mut store, &inv.args),
        "delete" => cmd_delete(workspace, cfg, renderer, &mut store, &inv.args),
        "list" => cmd_list(cfg, renderer, &store, &inv.args),
        "all" => cmd_all(renderer, &store),
        "save" => cmd_save(renderer, &store, &inv.args),
        "load" => cmd_load(workspace, cfg, renderer, &mut store, &inv.args),
        "export" => cmd_export(renderer, &store, &inv.args),
        other => Err(anyhow!("unknown command: {other}")),
    }
}

fn view_day(cfg: &Config, arg: Option<&str>) -> anyhow::Result<Day> {
    match arg {
        Some(raw) => raw.parse(),
        None => cfg
            .get("view.day")
            .unwrap_or_else(|| "Pazartesi".to_string())
            .parse(),
    }
}

// Matches the warning dialog titles of the form.
fn reject_notice(reject: Reject) -> &'static str {
    match reject {
        Reject::EmptyTitle => "Eksik bilgi",
        Reject::InvalidDuration => "Geçersiz süre",
        Reject::InvalidTime => "Geçersiz saat",
    }
}

#[instrument(skip(workspace, renderer, store, args))]
fn cmd_add(
    workspace: &Workspace,
    renderer: &mut Renderer,
    store: &mut ScheduleStore,
    args: &[String],
) -> anyhow::Result<()> {
    info!("command add");

    let mut reading = false;
    let mut positional: Vec<&str> = Vec::new();
    for arg in args {
        if arg == "--okuma" {
            reading = true;
        } else {
            positional.push(arg);
        }
    }

    let (day_raw, title_raw, duration_raw, start_raw) = match positional.as_slice() {
        [day, title, duration] => (*day, *title, *duration, ""),
        [day, title, duration, start] => (*day, *title, *duration, *start),
        _ => {
            return Err(anyhow!(
                "usage: add <gün> <başlık> <süre-dk> [HH:MM] [--okuma]"
            ));
        }
    };

    let day: Day = day_raw.parse()?;

    // Input rejections abort the add and leave the store untouched; they are
    // reported on the notification surface, not as process failures.
    let title = match validate::validate_title(title_raw) {
        Ok(title) => title,
        Err(reject) => return report_reject(renderer, reject),
    };
    let duration = match validate::validate_duration(duration_raw) {
        Ok(duration) => duration,
        Err(reject) => return report_reject(renderer, reject),
    };
    let start = match validate::validate_start(start_raw) {
        Ok(start) => start,
        Err(reject) => return report_reject(renderer, reject),
    };

    store.add(day, validate::build_activity(title, duration, start));
    if reading {
        store.add(day, validate::reading_session());
    }
    workspace.save(store)?;

    renderer.print_projection(&project::project_day(store, day))?;
    Ok(())
}

fn report_reject(renderer: &mut Renderer, reject: Reject) -> anyhow::Result<()> {
    warn!(?reject, "input rejected; add aborted");
    renderer.notify(Severity::Warning, reject_notice(reject), &reject.to_string());
    Ok(())
}

#[instrument(skip(workspace, cfg, renderer, store, args))]
fn cmd_delete(
    workspace: &Workspace,
    cfg: &Config,
    renderer: &mut Renderer,
    store: &mut ScheduleStore,
    args: &[String],
) -> anyhow::Result<()> {
    info!("command delete");

    let mode = match args.get(1).map(String::as_str) {
        Some("--all") => ViewMode::AllDays,
        Some(day_raw) => ViewMode::SingleDay(day_raw.parse()?),
        None => ViewMode::SingleDay(view_day(cfg, None)?),
    };

    let selected = args
        .first()
        .and_then(|raw| raw.parse::<usize>().ok())
        .filter(|pos| *pos > 0);
    let Some(position) = selected else {
        renderer.notify(Severity::Info, "Seçim yok", "Silmek için bir öğe seçin.");
        return Ok(());
    };

    let projection = project::project(store, mode);
    if position > projection.lines.len() {
        renderer.notify(Severity::Info, "Seçim yok", "Silmek için bir öğe seçin.");
        return Ok(());
    }

    // Header and placeholder lines are silently ignored, as the form did.
    let Some((day, index)) = projection.resolve(position - 1) else {
        debug!(position, "non-activity line selected; nothing to delete");
        return Ok(());
    };

    let removed = store.remove(day, index)?;
    info!(%day, index, title = %removed.title, "removed activity");
    workspace.save(store)?;

    renderer.print_projection(&project::project(store, mode))?;
    Ok(())
}

#[instrument(skip(cfg, renderer, store, args))]
fn cmd_list(
    cfg: &Config,
    renderer: &mut Renderer,
    store: &ScheduleStore,
    args: &[String],
) -> anyhow::Result<()> {
    info!("command list");
    let day = view_day(cfg, args.first().map(String::as_str))?;
    renderer.print_projection(&project::project_day(store, day))
}

#[instrument(skip(renderer, store))]
fn cmd_all(renderer: &mut Renderer, store: &ScheduleStore) -> anyhow::Result<()> {
    info!("command all");
    renderer.print_projection(&project::project_all(store))
}

#[instrument(skip(renderer, store, args))]
fn cmd_save(
    renderer: &mut Renderer,
    store: &ScheduleStore,
    args: &[String],
) -> anyhow::Result<()> {
    info!("command save");
    let path = args
        .first()
        .ok_or_else(|| anyhow!("usage: save <dosya.json>"))?;

    persist::save_to(store, Path::new(path))?;
    renderer.notify(
        Severity::Info,
        "Kaydedildi",
        &format!("Program {path} olarak kaydedildi."),
    );
    Ok(())
}

#[instrument(skip(workspace, cfg, renderer, store, args))]
fn cmd_load(
    workspace: &Workspace,
    cfg: &Config,
    renderer: &mut Renderer,
    store: &mut ScheduleStore,
    args: &[String],
) -> anyhow::Result<()> {
    info!("command load");
    let path = args
        .first()
        .ok_or_else(|| anyhow!("usage: load <dosya.json>"))?;

    // The working copy is only replaced once the whole file has loaded.
    let loaded = persist::load_from(Path::new(path))?;
    *store = loaded;
    workspace.save(store)?;

    renderer.notify(Severity::Info, "Yüklendi", "Program başarıyla yüklendi.");
    renderer.print_projection(&project::project_day(store, view_day(cfg, None)?))?;
    Ok(())
}

#[instrument(skip(renderer, store, args))]
fn cmd_export(
    renderer: &mut Renderer,
    store: &ScheduleStore,
    args: &[String],
) -> anyhow::Result<()> {
    info!("command export");
    let path = args
        .first()
        .ok_or_else(|| anyhow!("usage: export <dosya.txt>"))?;

    persist::export_to(store, Path::new(path))?;
    renderer.notify(
        Severity::Info,
        "Dışa aktarıldı",
        &format!("Program metin dosyası olarak kaydedildi: {path}"),
    );
    Ok(())
}

fn cmd_days() -> anyhow::Result<()> {
    for day in Day::ALL {
        println!("{day}");
    }
    Ok(())
}

fn cmd_help() -> anyhow::Result<()> {
    println!("dersplan <komut> [argümanlar]");
    println!();
    println!("  add <gün> <başlık> <süre-dk> [HH:MM] [--okuma]");
    println!("  list [gün]");
    println!("  all");
    println!("  delete <satır> [gün | --all]");
    println!("  save <dosya.json>");
    println!("  load <dosya.json>");
    println!("  export <dosya.txt>");
    println!("  days");
    println!("  version");
    Ok(())
}

fn cmd_version() -> anyhow::Result<()> {
    println!("dersplan {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
