use crate::prelude::{println, *};
use colored::Colorize;
use paramkit_core::{Form, SeriesRead};
use serde::Serialize;

use super::{display_value, print_series};

#[derive(Debug, clap::Args, Clone)]
pub struct ShowOptions {
    /// Query string or form body, `-` to read stdin
    #[arg(value_name = "QUERY")]
    pub input: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct GetOptions {
    /// Query string or form body, `-` to read stdin
    #[arg(value_name = "QUERY")]
    pub input: String,

    /// Parameter name
    pub name: String,

    /// Match names case-insensitively
    #[arg(short, long)]
    pub ignore_case: bool,

    /// Join every matching value instead of returning the first one
    #[arg(short, long)]
    pub all: bool,

    /// Separator used with --all
    #[arg(short, long, env = "PARAMKIT_SEPARATOR", default_value = ",")]
    pub separator: String,

    /// Value printed when nothing matches or the match has no value
    #[arg(short, long)]
    pub default: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct NamesOptions {
    /// Query string or form body, `-` to read stdin
    #[arg(value_name = "QUERY")]
    pub input: String,
}

#[derive(Debug, clap::Args, Clone)]
pub struct MapOptions {
    /// Query string or form body, `-` to read stdin
    #[arg(value_name = "QUERY")]
    pub input: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a `get` lookup
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Lookup {
    pub name: String,
    pub ignore_case: bool,
    pub value: Option<String>,
    pub values: Vec<Option<String>>,
}

/// Resolve a lookup against a decoded form
pub fn lookup(form: &Form, options: &GetOptions) -> Lookup {
    let value = if options.all {
        form.get_values(&options.name, &options.separator, options.ignore_case)
            .or_else(|| options.default.clone())
    } else {
        form.get_first_value(
            &options.name,
            options.ignore_case,
            options.default.as_deref(),
        )
    };

    Lookup {
        name: options.name.clone(),
        ignore_case: options.ignore_case,
        value,
        values: form.get_values_array(&options.name, options.ignore_case),
    }
}

/// Sorted list of the distinct names
pub fn sorted_names(form: &Form) -> Vec<String> {
    let mut names: Vec<String> = form.get_names().into_iter().collect();
    names.sort();
    names
}

pub fn show(options: ShowOptions, global: crate::Global) -> Result<()> {
    let form = crate::form::load(&options.input)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&form.to_vec())?);
        return Ok(());
    }

    if global.verbose {
        println!("{} parameter(s)", form.len());
    }
    print_series(&form);
    Ok(())
}

pub fn get(options: GetOptions, global: crate::Global) -> Result<()> {
    let form = crate::form::load(&options.input)?;
    let result = lookup(&form, &options);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if global.verbose {
        println!(
            "{} {} ({} match(es))",
            "Name:".green(),
            result.name,
            result.values.len()
        );
    }

    match result.value {
        Some(value) => println!("{}", value),
        None => {
            log::debug!("No value found for {:?}", result.name);
            return Err(eyre!("No value for parameter {:?}", result.name));
        }
    }
    Ok(())
}

pub fn names(options: NamesOptions, _global: crate::Global) -> Result<()> {
    let form = crate::form::load(&options.input)?;

    for name in sorted_names(&form) {
        println!("{}", name);
    }
    Ok(())
}

pub fn map(options: MapOptions, _global: crate::Global) -> Result<()> {
    let form = crate::form::load(&options.input)?;
    let values = form.get_values_map();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    let mut table = new_table();
    for (name, value) in &values {
        table.add_row(prettytable::row![b->name, display_value(value.as_deref())]);
    }
    table.printstd();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::decode;

    fn create_test_options(name: &str, ignore_case: bool, all: bool) -> GetOptions {
        GetOptions {
            input: String::new(),
            name: name.to_string(),
            ignore_case,
            all,
            separator: ",".to_string(),
            default: None,
            json: false,
        }
    }

    #[test]
    fn test_lookup_first_value() {
        let form = decode("Tag=a&tag=b&Tag=c").unwrap();

        let result = lookup(&form, &create_test_options("Tag", false, false));

        assert_eq!(result.value.as_deref(), Some("a"));
        assert_eq!(
            result.values,
            vec![Some("a".to_string()), Some("c".to_string())]
        );
    }

    #[test]
    fn test_lookup_all_ignore_case() {
        let form = decode("Tag=a&tag=b&Tag=c").unwrap();

        let result = lookup(&form, &create_test_options("tag", true, true));

        assert_eq!(result.value.as_deref(), Some("a,b,c"));
        assert_eq!(result.values.len(), 3);
    }

    #[test]
    fn test_lookup_default() {
        let form = decode("flag").unwrap();
        let mut options = create_test_options("flag", false, false);
        options.default = Some("on".to_string());

        assert_eq!(lookup(&form, &options).value.as_deref(), Some("on"));

        options.name = "missing".to_string();
        options.all = true;
        assert_eq!(lookup(&form, &options).value.as_deref(), Some("on"));
    }

    #[test]
    fn test_sorted_names() {
        let form = decode("b=1&a=2&b=3&B=4").unwrap();

        assert_eq!(sorted_names(&form), vec!["B", "a", "b"]);
    }
}
