use std::io::{self, IsTerminal, Write};

use anyhow::anyhow;

use crate::config::Config;
use crate::project::Projection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color_cfg = cfg.get("color").unwrap_or_else(|| "on".to_string());
        let color = match color_cfg.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" | "1" => true,
            "off" | "no" | "false" | "0" => false,
            other => return Err(anyhow!("invalid color setting: {other}")),
        };

        Ok(Self { color })
    }

    // Prints the projection with a 1-based position gutter; delete selections
    // refer to these positions. Non-selectable lines are dimmed.
    #[tracing::instrument(skip(self, projection))]
    pub fn print_projection(&mut self, projection: &Projection) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        let gutter = projection.lines.len().to_string().len();
        for (position, line) in projection.lines.iter().enumerate() {
            let text = if projection.origins[position].is_some() {
                line.clone()
            } else {
                self.paint(line, "90")
            };
            writeln!(out, "{:>gutter$}  {}", position + 1, text)?;
        }

        Ok(())
    }

    // Notification surface: fire-and-forget, severity decides stream and color.
    pub fn notify(&mut self, severity: Severity, title: &str, message: &str) {
        match severity {
            Severity::Info => {
                println!("{}: {}", self.paint(title, "32"), message);
            }
            Severity::Warning => {
                println!("{}: {}", self.paint(title, "33"), message);
            }
            Severity::Error => {
                eprintln!("{}: {}", self.paint(title, "31"), message);
            }
        }
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color || !io::stdout().is_terminal() {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}
