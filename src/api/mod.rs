pub mod envelope;
pub mod rpc;
pub mod settings_data;

pub use envelope::{not_found, Envelope};
pub use rpc::RpcCall;
