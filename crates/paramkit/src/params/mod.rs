use crate::prelude::{println, *};
use colored::Colorize;
use paramkit_core::{Parameter, SeriesRead};

pub mod edit;
pub mod inspect;
pub mod merge;

#[derive(Debug, clap::Parser)]
#[command(name = "params")]
#[command(about = "Query and edit URL-encoded parameter lists")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List every parameter in order
    #[clap(name = "show")]
    Show(inspect::ShowOptions),

    /// Look up the values of one parameter
    #[clap(name = "get")]
    Get(inspect::GetOptions),

    /// List the distinct parameter names
    #[clap(name = "names")]
    Names(inspect::NamesOptions),

    /// Show the first value of every distinct name
    #[clap(name = "map")]
    Map(inspect::MapOptions),

    /// Replace the value of a parameter, dropping its duplicates
    #[clap(name = "set")]
    Set(edit::SetOptions),

    /// Remove a parameter
    #[clap(name = "remove")]
    Remove(edit::RemoveOptions),

    /// Collect the values of the given names into a JSON object
    #[clap(name = "merge")]
    Merge(merge::MergeOptions),
}

pub fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Show(options) => inspect::show(options, global),
        Commands::Get(options) => inspect::get(options, global),
        Commands::Names(options) => inspect::names(options, global),
        Commands::Map(options) => inspect::map(options, global),
        Commands::Set(options) => edit::set(options, global),
        Commands::Remove(options) => edit::remove(options, global),
        Commands::Merge(options) => merge::run(options, global),
    }
}

/// Render a cell for a possibly missing value
pub fn display_value(value: Option<&str>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "(no value)".bright_black().to_string(),
    }
}

/// Print the parameters of a series as a position/name/value table
pub fn print_series<S: SeriesRead<Entry = Parameter>>(series: &S) {
    if series.is_empty() {
        println!("{}", "No parameters.".yellow());
        return;
    }

    let mut table = new_table();
    table.add_row(prettytable::row![b->"#", b->"Name", b->"Value"]);
    for (index, param) in series.iter().enumerate() {
        table.add_row(prettytable::row![
            index,
            param.name,
            display_value(param.value.as_deref())
        ]);
    }
    table.printstd();
}
