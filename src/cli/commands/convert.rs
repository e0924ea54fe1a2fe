use crate::cli::parser::Commands;
use crate::core::index::LocationIndex;
use crate::core::timemath;
use crate::errors::{AppError, AppResult};
use crate::models::Location;
use crate::ui::messages;
use crate::utils::date;

/// Handle the `convert` subcommand: one-shot conversion between two cities
/// given on the command line, without touching saved selections.
pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Convert {
        time,
        from,
        to,
        date: on,
    } = cmd
    {
        let index = LocationIndex::bundled()?;

        let from_loc = resolve(&index, from)?;
        let to_loc = resolve(&index, to)?;

        let reference = match on {
            Some(s) => date::parse_date(s)?,
            None => date::today(),
        };

        let Some(converted) =
            timemath::convert(time, from_loc.timezone, to_loc.timezone, reference)
        else {
            return Err(AppError::InvalidTime(time.clone()));
        };

        let normalized = timemath::normalize(time).unwrap_or_else(|| time.clone());
        println!(
            "{}  {}  ({})",
            normalized,
            from_loc.canonical_text(),
            from_loc.timezone.name()
        );
        println!(
            "{}  {}  ({})  on {}",
            converted.time,
            to_loc.canonical_text(),
            converted.zone.name(),
            converted.date_in_zone().format("%Y-%m-%d")
        );
    }
    Ok(())
}

/// First match for a user-supplied city fragment.
pub fn resolve<'a>(index: &'a LocationIndex, query: &str) -> AppResult<&'a Location> {
    let matches = index.search(query, 2);
    match matches.first() {
        Some(location) => {
            if matches.len() > 1 {
                messages::info(format!(
                    "'{}' is ambiguous, using {}",
                    query,
                    location.canonical_text()
                ));
            }
            Ok(matches[0])
        }
        None => Err(AppError::UnknownLocation(query.to_string())),
    }
}
