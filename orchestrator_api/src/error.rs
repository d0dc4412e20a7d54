use thiserror::Error;

/// Terminal status of a streaming call. The consumer reconnects after
/// `Aborted`, `StreamContextDone` and `Unavailable`; `ServerContextDone`
/// means the whole node is shutting down; `Internal` means a chain read
/// failed mid-stream.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("event subscription was closed or fell behind")]
    Aborted,
    #[error("stream context is done")]
    StreamContextDone,
    #[error("server context is done")]
    ServerContextDone,
    #[error("could not write to the stream")]
    Unavailable,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
