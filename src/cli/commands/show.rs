use std::path::Path;
use std::sync::Arc;

use crate::cli::parser::Commands;
use crate::config::Settings;
use crate::core::Slot;
use crate::core::index::LocationIndex;
use crate::core::session::Session;
use crate::core::timemath;
use crate::core::validation::FIELD_TIME;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use crate::utils::colors::colorize_optional;
use crate::utils::date;

/// Handle the `show` subcommand: drive a full converter session from the
/// persisted selections — type the time into the engine, blur the field,
/// tick the scheduler, and print what the engine exposes.
pub fn handle(cmd: &Commands, config_path: &Path) -> AppResult<()> {
    if let Commands::Show { time, date: on } = cmd {
        let index = Arc::new(LocationIndex::bundled()?);
        let settings = Settings::load_from(config_path)?;

        let reference = match on {
            Some(s) => date::parse_date(s)?,
            None => date::today(),
        };

        let mut session = Session::with_start(
            Arc::clone(&index),
            settings,
            reference,
            chrono::Local::now().time(),
        )
        .with_store(config_path.to_path_buf());

        if let Some(t) = time {
            if timemath::normalize(t).is_none() {
                return Err(AppError::InvalidTime(t.clone()));
            }
            session.focus_gained(FIELD_TIME);
            session.keystroke(FIELD_TIME, t);
            session.focus_lost(FIELD_TIME);
        }
        session.run_until_idle();

        let Some(from) = session.selected(Slot::One) else {
            return Err(AppError::Config("no location saved in slot 1".into()));
        };
        let Some(to) = session.selected(Slot::Two) else {
            return Err(AppError::Config("no location saved in slot 2".into()));
        };

        let committed = session.committed(FIELD_TIME).unwrap_or_default();
        let shown = timemath::normalize(committed).unwrap_or_else(|| committed.to_string());
        let view = session.view();

        messages::header("citytime");
        println!("{}  {}", shown, from.canonical_text());
        println!(
            "{}  {}  on {} ({})",
            colorize_optional(&view.time),
            to.canonical_text(),
            view.date.format("%Y-%m-%d"),
            view.zone
        );
    }
    Ok(())
}
