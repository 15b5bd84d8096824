//! DocVQA HTTP API.
//!
//! Two state-free endpoints (`/upload/`, `/ask/`) composing the file
//! validator, the object storage client, and the hosted VQA model, plus
//! diagnostic health and OpenAPI doc routes. Exposed as a library so the
//! endpoint test suite can build the router over in-memory fakes.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;
