//! CLI output formatting utilities.
//!
//! The orchestrator stays quiet on the normal path: the delegated tools print
//! their own output. These helpers cover fatal errors and dry-run plans.

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use fwbuild_lib::dispatch::Plan;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const ERROR: &str = "✗";
  pub const ARROW: &str = "→";
  pub const PROMPT: &str = "$";
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// Render a plan as indented text, one line per step.
pub fn format_plan(plan: &Plan) -> String {
  let mut out = format!("Plan for {}\n", plan.platform);

  for (index, action) in plan.actions.iter().enumerate() {
    out.push_str(&format!("  {} {}. {}\n", symbols::ARROW, index + 1, action.kind()));
    for step in action.steps() {
      let dir = if step.dir.as_os_str().is_empty() {
        ".".to_string()
      } else {
        step.dir.display().to_string()
      };
      out.push_str(&format!("       {} {} {}\n", dir, symbols::PROMPT, step.command));
    }
  }

  out
}

pub fn print_plan(plan: &Plan, format: OutputFormat) -> anyhow::Result<()> {
  if format.is_json() {
    return print_json(plan);
  }

  let text = format_plan(plan);
  let mut lines = text.lines();
  if let Some(header) = lines.next() {
    println!("{}", header.if_supports_color(Stream::Stdout, |s| s.bold()));
  }
  for line in lines {
    println!("{}", line);
  }
  Ok(())
}
