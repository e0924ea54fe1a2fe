use std::path::Path;

use crate::cli::commands::convert::resolve;
use crate::cli::parser::Commands;
use crate::config::Settings;
use crate::core::Slot;
use crate::core::index::LocationIndex;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;

/// Handle the `select` subcommand: resolve a city and persist it into one
/// of the two slots.
pub fn handle(cmd: &Commands, config_path: &Path) -> AppResult<()> {
    if let Commands::Select { slot, query } = cmd {
        let slot = Slot::from_number(*slot).ok_or(AppError::InvalidSlot(*slot))?;

        let index = LocationIndex::bundled()?;
        let location = resolve(&index, query)?;

        let mut settings = Settings::load_from(config_path)?;
        settings.remember(slot.index(), location);
        settings.save_to(config_path)?;

        messages::success(format!(
            "Slot {} set to {} ({})",
            slot.index() + 1,
            location.canonical_text(),
            location.timezone.name()
        ));
    }
    Ok(())
}
