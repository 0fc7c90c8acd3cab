//! `application/x-www-form-urlencoded` decoding and encoding
//!
//! Pairs are separated by `&`. A pair without `=` is a name without value,
//! `name=` is a name with an empty value. `+` decodes to a space.

use crate::prelude::*;
use paramkit_core::{Form, Parameter, SeriesRead};
use std::io::Read;

/// Decode a query string (optionally starting with `?`) or a form body.
pub fn decode(input: &str) -> std::result::Result<Form, Error> {
    let input = input.trim();
    let input = input.strip_prefix('?').unwrap_or(input);

    input
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| -> std::result::Result<Parameter, Error> {
            let (name, value) = match pair.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (pair, None),
            };

            Ok(Parameter {
                name: decode_component(name)?,
                value: value.map(decode_component).transpose()?,
            })
        })
        .collect()
}

fn decode_component(raw: &str) -> std::result::Result<String, Error> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| Error::InvalidEncoding(raw.to_string()))
}

/// Encode a series back into query string form, keeping entry order.
pub fn encode<S: SeriesRead<Entry = Parameter>>(series: &S) -> String {
    series
        .iter()
        .map(|param| match &param.value {
            Some(value) => f!(
                "{}={}",
                urlencoding::encode(&param.name),
                urlencoding::encode(value)
            ),
            None => urlencoding::encode(&param.name).into_owned(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Read the raw input argument; `-` reads everything from stdin.
pub fn read_input(arg: &str) -> std::result::Result<String, Error> {
    if arg != "-" {
        return Ok(arg.to_string());
    }

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Read and decode the input argument.
pub fn load(arg: &str) -> Result<Form> {
    let raw = read_input(arg)?;
    let form = decode(&raw)?;
    log::debug!("Decoded {} parameter(s) from {} byte(s)", form.len(), raw.len());
    Ok(form)
}
