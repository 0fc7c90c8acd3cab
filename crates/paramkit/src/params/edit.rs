use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use paramkit_core::{Form, SeriesRead};

use super::print_series;

/// Restricts an edit to the positions `from..to`
#[derive(Debug, clap::Args, Clone, Default)]
pub struct RangeArgs {
    /// First position affected by the edit
    #[arg(long)]
    pub from: Option<usize>,

    /// Position after the last one affected by the edit
    #[arg(long)]
    pub to: Option<usize>,
}

#[derive(Debug, clap::Args, Clone)]
pub struct SetOptions {
    /// Query string or form body, `-` to read stdin
    #[arg(value_name = "QUERY")]
    pub input: String,

    /// Parameter name
    pub name: String,

    /// New value; omit to keep the name without value
    pub value: Option<String>,

    /// Match names case-insensitively
    #[arg(short, long)]
    pub ignore_case: bool,

    #[clap(flatten)]
    pub range: RangeArgs,

    /// Print a table instead of the encoded query string
    #[arg(long)]
    pub table: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct RemoveOptions {
    /// Query string or form body, `-` to read stdin
    #[arg(value_name = "QUERY")]
    pub input: String,

    /// Parameter name
    pub name: String,

    /// Match names case-insensitively
    #[arg(short, long)]
    pub ignore_case: bool,

    /// Only remove the first match
    #[arg(long)]
    pub first: bool,

    #[clap(flatten)]
    pub range: RangeArgs,

    /// Print a table instead of the encoded query string
    #[arg(long)]
    pub table: bool,
}

/// Live view of the part of `form` selected by `range`
///
/// Edits made through the returned series land in `form`.
pub fn select(form: &Form, range: &RangeArgs) -> Result<Form> {
    let len = form.len();
    let from = range.from.unwrap_or(0);
    let to = range.to.unwrap_or(len);

    if from > to || to > len {
        return Err(eyre!(
            "Invalid range {}..{} for {} parameter(s)",
            from,
            to,
            len
        ));
    }

    Ok(form.sub_list(from, to))
}

/// Apply a `set` edit. Returns whether an existing parameter was updated.
pub fn apply_set(form: &Form, options: &SetOptions) -> Result<bool> {
    let mut target = select(form, &options.range)?;
    let updated = target.set(
        &options.name,
        options.value.as_deref(),
        options.ignore_case,
    );

    match &updated {
        Some(param) => log::debug!("Updated {:?}", param.name),
        None => log::debug!("Appended {:?}", options.name),
    }
    Ok(updated.is_some())
}

/// Apply a `remove` edit. Returns whether anything was removed.
pub fn apply_remove(form: &Form, options: &RemoveOptions) -> Result<bool> {
    let mut target = select(form, &options.range)?;

    let changed = if options.first {
        target.remove_first(&options.name, options.ignore_case)
    } else {
        target.remove_all(&options.name, options.ignore_case)
    };
    Ok(changed)
}

fn output(form: &Form, table: bool) {
    if table {
        print_series(form);
    } else {
        println!("{}", crate::form::encode(form));
    }
}

pub fn set(options: SetOptions, global: crate::Global) -> Result<()> {
    let form = crate::form::load(&options.input)?;
    let updated = apply_set(&form, &options)?;

    if global.verbose {
        let action = if updated { "Updated" } else { "Appended" };
        eprintln!("{} {}", action.green(), options.name);
    }
    output(&form, options.table);
    Ok(())
}

pub fn remove(options: RemoveOptions, global: crate::Global) -> Result<()> {
    let form = crate::form::load(&options.input)?;
    let changed = apply_remove(&form, &options)?;

    if global.verbose && !changed {
        eprintln!("{} {}", "No parameter named".yellow(), options.name);
    }
    output(&form, options.table);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{decode, encode};

    fn create_set_options(name: &str, value: Option<&str>, range: RangeArgs) -> SetOptions {
        SetOptions {
            input: String::new(),
            name: name.to_string(),
            value: value.map(str::to_string),
            ignore_case: false,
            range,
            table: false,
        }
    }

    fn create_remove_options(name: &str, first: bool, range: RangeArgs) -> RemoveOptions {
        RemoveOptions {
            input: String::new(),
            name: name.to_string(),
            ignore_case: false,
            first,
            range,
            table: false,
        }
    }

    #[test]
    fn test_set_replaces_duplicates() {
        let form = decode("a=1&b=2&a=3").unwrap();

        let updated = apply_set(&form, &create_set_options("a", Some("9"), RangeArgs::default()))
            .unwrap();

        assert!(updated);
        assert_eq!(encode(&form), "a=9&b=2");
    }

    #[test]
    fn test_set_appends_missing() {
        let form = decode("a=1").unwrap();

        let updated =
            apply_set(&form, &create_set_options("z", None, RangeArgs::default())).unwrap();

        assert!(!updated);
        assert_eq!(encode(&form), "a=1&z");
    }

    #[test]
    fn test_set_within_range_appends_inside_range() {
        let form = decode("a=1&b=2&c=3").unwrap();
        let range = RangeArgs {
            from: Some(0),
            to: Some(2),
        };

        apply_set(&form, &create_set_options("c", Some("new"), range)).unwrap();

        assert_eq!(encode(&form), "a=1&b=2&c=new&c=3");
    }

    #[test]
    fn test_remove_within_range_leaves_rest() {
        let form = decode("a=1&a=2&a=3&a=4").unwrap();
        let range = RangeArgs {
            from: Some(1),
            to: Some(3),
        };

        assert!(apply_remove(&form, &create_remove_options("a", false, range)).unwrap());
        assert_eq!(encode(&form), "a=1&a=4");
    }

    #[test]
    fn test_remove_first_only() {
        let form = decode("a=1&a=2").unwrap();

        assert!(apply_remove(&form, &create_remove_options("a", true, RangeArgs::default())).unwrap());
        assert_eq!(encode(&form), "a=2");
    }

    #[test]
    fn test_invalid_range() {
        let form = decode("a=1").unwrap();
        let range = RangeArgs {
            from: Some(1),
            to: Some(3),
        };

        assert!(select(&form, &range).is_err());
    }
}
