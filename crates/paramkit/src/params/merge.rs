use crate::prelude::{eprintln, println, *};
use paramkit_core::merge::target_for;
use paramkit_core::{Form, MergeSlot, SeriesRead};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, clap::Args, Clone)]
pub struct MergeOptions {
    /// Query string or form body, `-` to read stdin
    #[arg(value_name = "QUERY")]
    pub input: String,

    /// Names to collect; repeat or separate with commas
    #[arg(short, long = "key", value_name = "NAME", value_delimiter = ',', required = true)]
    pub keys: Vec<String>,
}

/// Collect the values of `keys` the way method arguments are bound
pub fn collect(form: &Form, keys: &[String]) -> HashMap<String, MergeSlot> {
    let mut target = target_for(keys.iter().cloned());
    form.copy_to(&mut target);
    target
}

pub fn run(options: MergeOptions, global: crate::Global) -> Result<()> {
    let form = crate::form::load(&options.input)?;
    let target = collect(&form, &options.keys);

    if global.verbose {
        let missing: Vec<&str> = target
            .iter()
            .filter(|(_, slot)| slot.is_absent())
            .map(|(name, _)| name.as_str())
            .collect();
        if !missing.is_empty() {
            eprintln!("Missing: {}", missing.join(", "));
        }
    }

    // Sorted for stable output.
    let sorted: BTreeMap<_, _> = target.into_iter().collect();
    println!("{}", serde_json::to_string_pretty(&sorted)?);
    Ok(())
}
