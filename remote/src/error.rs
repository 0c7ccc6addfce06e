use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Malformed telemetry: {0}")]
    MalformedTelemetry(#[from] serde_json::Error),
}
