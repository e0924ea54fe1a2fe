use crate::cli::parser::Commands;
use crate::core::index::LocationIndex;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::table::Table;

/// Handle the `search` subcommand: print matching dataset entries.
pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Search { query, limit } = cmd {
        let index = LocationIndex::bundled()?;
        let matches = index.search(query, *limit);

        if matches.is_empty() {
            messages::info(format!("No locations match '{}'", query));
            return Ok(());
        }

        let mut table = Table::new(vec!["City", "Country", "Timezone"]);
        for location in matches {
            table.add_row(vec![
                location.name.clone(),
                location.country.clone(),
                location.timezone.name().to_string(),
            ]);
        }
        print!("{}", table.render());
    }
    Ok(())
}
