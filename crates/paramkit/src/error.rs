#[derive(thiserror::Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("Percent-decoded text is not valid UTF-8: {0:?}")]
    InvalidEncoding(String),

    #[error("Failed to read input: {0}")]
    Input(#[from] std::io::Error),
}
