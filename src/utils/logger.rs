// src/utils/logger.rs
// Two sinks for the `log` facade: the terminal (batch commands) and the
// viewer's console pane. Only one can be installed per process.

use gtk4::prelude::*;
use gtk4::{glib, TextView};
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use std::sync::OnceLock;

static LOG_VIEW: OnceLock<glib::SendWeakRef<TextView>> = OnceLock::new();
static LOGGER: GtkLogger = GtkLogger;

struct GtkLogger;

/// env_logger on stderr; `RUST_LOG` wins over `default_level`.
pub fn init_terminal(default_level: LevelFilter) {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level.as_str()))
    .format_target(false)
    .init();
}

pub fn init(view: &TextView) -> Result<(), SetLoggerError> {
  let buffer = view.buffer();
  let tag_table = buffer.tag_table();

  for (name, color) in [
    ("error", "#ff4444"),
    ("warn", "#ffbb33"),
    ("info", "#33b5e5"),
    ("debug", "#aaaaaa"),
  ] {
    if tag_table.lookup(name).is_none() {
      let tag = gtk4::TextTag::new(Some(name));
      tag.set_property("foreground", color);
      if name == "error" {
        tag.set_property("weight", 700);
      }
      tag_table.add(&tag);
    }
  }

  let _ = LOG_VIEW.set(view.downgrade().into());
  log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Debug))
}

impl log::Log for GtkLogger {
  fn enabled(&self, metadata: &Metadata) -> bool {
    metadata.level() <= Level::Debug
  }

  fn log(&self, record: &Record) {
    if !self.enabled(record.metadata()) {
      return;
    }

    let (icon, tag_name) = match record.level() {
      Level::Error => ("🔴", "error"),
      Level::Warn => ("🟠", "warn"),
      Level::Info => ("🔵", "info"),
      Level::Debug => ("⚪", "debug"),
      Level::Trace => ("▫️", "debug"),
    };

    let msg = format!("{}  {}\n", icon, record.args());

    glib::MainContext::default().spawn_local(async move {
      if let Some(weak_ref) = LOG_VIEW.get() {
        if let Some(view) = weak_ref.upgrade() {
          let buffer = view.buffer();
          let mut end = buffer.end_iter();

          buffer.insert_with_tags_by_name(&mut end, &msg, &[tag_name]);

          // Auto-scroll
          let mark = buffer.create_mark(None, &buffer.end_iter(), false);
          view.scroll_to_mark(&mark, 0.0, true, 0.0, 1.0);
          buffer.delete_mark(&mark);
        }
      }
    });
  }

  fn flush(&self) {}
}
