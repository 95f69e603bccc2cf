use std::future::Future;

use serde_json::Value;

/// Fault raised across the invocation boundary: the backend rejected the
/// call or the channel carrying it failed. Carries the backend's
/// human-readable message, surfaced to callers unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeError(pub String);

impl std::fmt::Display for InvokeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for InvokeError {}

/// The invocation boundary to the backend: a named command with JSON
/// arguments and a JSON (or fault) result.
///
/// The embedding shell supplies the implementation; tests use a recording
/// stub. Client code issues exactly one `invoke` per logical operation and
/// never retries.
pub trait Transport {
    fn invoke(
        &self,
        command: &str,
        args: Value,
    ) -> impl Future<Output = Result<Value, InvokeError>> + Send;
}

// A shared reference to a transport is itself a transport, so one bridge
// instance can back several clients.
impl<T: Transport> Transport for &T {
    fn invoke(
        &self,
        command: &str,
        args: Value,
    ) -> impl Future<Output = Result<Value, InvokeError>> + Send {
        (**self).invoke(command, args)
    }
}
