use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid shell settings: {0}")]
    Settings(String),

    #[error("invalid scene settings: {0}")]
    Scene(#[from] coin_flip::ConfigError),

    #[error("wasm core: {0}")]
    Wasm(String),

    #[error("wasm module does not export `{0}`")]
    MissingExport(&'static str),

    #[error("core result at {ptr}..+{len} is outside wasm memory")]
    OutOfBounds { ptr: usize, len: usize },

    #[error("core returned non-UTF-8 commands: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("could not encode or decode core JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<wasmtime::Error> for Error {
    fn from(e: wasmtime::Error) -> Self {
        Error::Wasm(format!("{:#}", e))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
