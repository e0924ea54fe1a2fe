use clap::{Parser, Subcommand};

/// Command-line interface definition for citytime
/// CLI driver over the two-city time converter core
#[derive(Parser)]
#[command(
    name = "citytime",
    version = env!("CARGO_PKG_VERSION"),
    about = "Convert a civil time between two cities, DST-correct on any date",
    long_about = None
)]
pub struct Cli {
    /// Override settings file path (useful for tests)
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a time between two cities without touching saved selections
    Convert {
        /// Time to convert: H:mm, HH:mm, or raw digits like 930 / 0930
        time: String,

        #[arg(long, help = "Source city (name or fragment)")]
        from: String,

        #[arg(long, help = "Destination city (name or fragment)")]
        to: String,

        #[arg(long = "on", help = "Reference date YYYY-MM-DD (default: today)")]
        date: Option<String>,
    },

    /// Search the bundled location dataset
    Search {
        query: String,

        #[arg(long, default_value_t = 10, help = "Maximum number of matches")]
        limit: usize,
    },

    /// Resolve a city and save it into slot 1 or 2
    Select {
        /// Slot number: 1 or 2
        slot: u8,

        /// City to resolve (name or fragment)
        query: String,
    },

    /// Convert TIME between the two saved cities
    Show {
        /// Time to convert (default: now)
        time: Option<String>,

        #[arg(long = "on", help = "Reference date YYYY-MM-DD (default: today)")]
        date: Option<String>,
    },
}
