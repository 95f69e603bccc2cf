mod client;
mod document;
mod operation;
pub mod protocol;
mod transaction;
mod transport;

pub use client::{Client, ClientError, Target};
pub use document::{CREATED_AT_FIELD, Document, document_id};
pub use operation::Operation;
pub use transaction::Transaction;
pub use transport::{InvokeError, Transport};
