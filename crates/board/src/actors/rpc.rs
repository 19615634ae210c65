//! Request/response helpers shared by the piece and board handles.

use ractor::rpc::CallResult;
use ractor::{ActorRef, Message, RpcReplyPort};

use super::errors::ActorError;

/// Send a request built around a fresh reply port and wait for the answer.
///
/// There is no timeout: every handshake runs to completion. A stopped target,
/// or one that drops the reply port without answering, maps to
/// [`ActorError::Unavailable`] naming `target`.
pub(crate) async fn request<M, T, F>(
    actor: &ActorRef<M>,
    target: &str,
    build: F,
) -> Result<T, ActorError>
where
    M: Message,
    T: Send + 'static,
    F: FnOnce(RpcReplyPort<T>) -> M,
{
    match actor.call(build, None).await {
        Ok(CallResult::Success(reply)) => Ok(reply),
        Ok(CallResult::Timeout | CallResult::SenderError) | Err(_) => {
            Err(ActorError::unavailable(target))
        }
    }
}

/// Enqueue a message that carries its own completion channel.
pub(crate) fn command<M: Message>(
    actor: &ActorRef<M>,
    target: &str,
    message: M,
) -> Result<(), ActorError> {
    actor
        .send_message(message)
        .map_err(|_| ActorError::unavailable(target))
}
