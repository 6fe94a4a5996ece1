use clap::{Parser, Subcommand, ValueEnum};

/// Scraper for the UCSD Schedule of Classes.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Log output format
    #[arg(long, value_enum, global = true, default_value_t = TracingFormat::Pretty)]
    pub tracing: TracingFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TracingFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List available terms as JSON
    Terms,
    /// List departments offered in a term as JSON
    Departments { term: String },
    /// List subjects offered in a term as JSON
    Subjects { term: String },
    /// Fetch the raw schedule results page for a term and subjects
    Schedule {
        term: String,
        #[arg(required = true)]
        subjects: Vec<String>,
        /// Only print where the results were written
        #[arg(short, long)]
        quiet: bool,
    },
}
