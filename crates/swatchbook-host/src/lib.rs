// ABOUTME: Host-facing protocol for Swatchbook: request/response messages and the session loop
// ABOUTME: Connects a host UI channel to the core resolution and document engine

pub mod error;
pub mod handler;
pub mod protocol;
pub mod session;

pub use error::{HostError, Result};
pub use handler::{RequestHandler, run};
pub use protocol::{HostRequest, HostResponse, decode_request, encode_response};
pub use session::{DOCUMENT_GENERATED, HostSession};
