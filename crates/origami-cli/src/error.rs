use lattice_origami::core::io::input::InputLoadError;
use lattice_origami::core::thermo::ThermoError;
use lattice_origami::engine::error::OrigamiError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Origami(#[from] OrigamiError),

    #[error(transparent)]
    Input(#[from] InputLoadError),

    #[error(transparent)]
    Thermo(#[from] ThermoError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
