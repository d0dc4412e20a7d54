use futures::channel::mpsc::UnboundedSender;

use crate::error::StreamError;

/// Writes one message into the stream transport. A closed transport means
/// the consumer went away.
pub fn send<T>(sink: &UnboundedSender<T>, message: T) -> Result<(), StreamError> {
    sink.unbounded_send(message)
        .map_err(|_error| StreamError::Unavailable)
}
