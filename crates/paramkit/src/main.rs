#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod error;
mod form;
mod page;
mod params;
mod prelude;
mod query;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Inspect, edit and paginate URL-encoded parameter lists"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "PARAMKIT_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Query and edit URL-encoded parameter lists
    Params(crate::params::App),

    /// Show one page of a line-oriented input
    Page(crate::page::PageOptions),

    /// Decode paging, sorting and filtering options
    Query(crate::query::QueryOptions),
}

fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();
    log::debug!("{:?}", app.command);

    match app.command {
        SubCommands::Params(sub_app) => crate::params::run(sub_app, app.global),
        SubCommands::Page(options) => crate::page::run(options, app.global),
        SubCommands::Query(options) => crate::query::run(options, app.global),
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
