use crate::prelude::{println, *};
use paramkit_core::query::{Query, QueryRequest};

#[derive(Debug, clap::Args, Clone)]
pub struct QueryOptions {
    /// Query string or form body, `-` to read stdin
    #[arg(value_name = "QUERY")]
    pub input: String,

    /// Print the request as received instead of the normalized query
    #[arg(long)]
    pub raw: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn decode_request(input: &str) -> Result<QueryRequest> {
    let form = crate::form::decode(input)?;
    QueryRequest::from_series(&form).wrap_err("Failed to decode query options")
}

fn print_query(query: &Query) {
    let mut table = new_table();
    table.add_row(prettytable::row!["Query", query.query.as_deref().unwrap_or("-")]);
    table.add_row(prettytable::row!["Start", query.start]);
    table.add_row(prettytable::row![
        "Limit",
        if query.limit == 0 {
            "none".to_string()
        } else {
            query.limit.to_string()
        }
    ]);
    table.add_row(prettytable::row![
        "Sort",
        query.sort_property.as_deref().unwrap_or("-")
    ]);
    table.add_row(prettytable::row![
        "Direction",
        query
            .sort_direction
            .map(|dir| f!("{:?}", dir))
            .unwrap_or_else(|| "-".to_string())
    ]);
    table.printstd();
}

pub fn run(options: QueryOptions, _global: crate::Global) -> Result<()> {
    let raw = crate::form::read_input(&options.input)?;
    let request = decode_request(&raw)?;
    log::debug!(
        "Decoded query request with {} filter(s)",
        request.filters.as_ref().map_or(0, Vec::len)
    );

    if options.raw {
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    let query = request.to_query();
    if options.json {
        println!("{}", serde_json::to_string_pretty(&query)?);
        return Ok(());
    }

    print_query(&query);
    if let Some(filters) = &request.filters {
        println!();
        for filter in filters {
            println!("Filter: {} = {}", filter.property, filter.value);
        }
    }
    Ok(())
}
