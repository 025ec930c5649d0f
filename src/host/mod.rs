//! Host adapters.
//!
//! Concrete collaborators for running the startup pipeline as a process:
//! tracing, HTTP sign-in, the controller socket, a headless page and a
//! scripted recovery prompt.

pub mod http_auth;
pub mod logging;
pub mod page;
pub mod prompt;
pub mod socket;

pub use http_auth::HttpAuthClient;
pub use logging::{init_tracing, TracingLevelSink};
pub use page::HeadlessPage;
pub use prompt::ScriptedPrompt;
pub use socket::SocketController;
