use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::{Value, json};

use vellum_client::{Client, Document, InvokeError, Target, Transport, protocol};

/// Transport stub: records every invocation and replays scripted results
/// in order. Once the script runs dry, each command gets a minimal
/// well-formed response.
pub struct StubTransport {
    calls: Mutex<Vec<(String, Value)>>,
    script: Mutex<VecDeque<Result<Value, InvokeError>>>,
}

impl StubTransport {
    pub fn new() -> Self {
        StubTransport {
            calls: Mutex::new(Vec::new()),
            script: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue a successful result for the next unscripted call.
    pub fn push_ok(&self, response: Value) {
        self.script.lock().unwrap().push_back(Ok(response));
    }

    /// Queue a fault for the next unscripted call.
    pub fn push_err(&self, message: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(InvokeError(message.to_string())));
    }

    /// Every `(command, args)` pair invoked so far, in call order.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for StubTransport {
    async fn invoke(&self, command: &str, args: Value) -> Result<Value, InvokeError> {
        self.calls.lock().unwrap().push((command.to_string(), args));
        if let Some(result) = self.script.lock().unwrap().pop_front() {
            return result;
        }
        Ok(default_response(command))
    }
}

fn default_response(command: &str) -> Value {
    match command {
        protocol::EXECUTE_QUERY | protocol::EXECUTE_SQL => {
            json!({ "documents": [], "total_count": 0 })
        }
        protocol::DELETE_DOCUMENT => json!(true),
        protocol::GET_DOCUMENT => Value::Null,
        // insert / update echo a persisted-document stand-in
        _ => json!({}),
    }
}

pub fn client(stub: &StubTransport) -> Client<&StubTransport> {
    Client::new(stub, Target::new("un2", "_system"))
}

/// Shorthand: a `json!` object as a `Document`.
pub fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
