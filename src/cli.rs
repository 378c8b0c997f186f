use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cityscout", version, about = "Travel information aggregator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Validate configuration and store connectivity, then exit
    Check,

    /// Resolve a location and print it as JSON
    Lookup {
        /// The place name to geocode, e.g. "Seattle, WA"
        query: Vec<String>,
    },
}
