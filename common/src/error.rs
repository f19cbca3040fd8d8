use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("API error {0}: {1}")]
    Api(reqwest::StatusCode, String),
}
