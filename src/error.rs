use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("curriculum is empty, at least one exercise is required")]
    EmptyCurriculum,

    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to create MIDI input: {0}")]
    MidiInit(#[from] midir::InitError),

    #[error("failed to connect to MIDI port: {0}")]
    MidiConnect(String),

    #[error("no MIDI input port found")]
    NoMidiPort,

    #[error("audio: {0}")]
    Audio(String),

    #[error("window: {0}")]
    Gui(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
