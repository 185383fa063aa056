use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("no audio output device: {0}")]
    NoOutputDevice(#[from] rodio::StreamError),

    #[error("could not open audio sink: {0}")]
    Sink(#[from] rodio::PlayError),

    #[error("could not decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("nothing queued")]
    EmptyQueue,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
