//! Multi-session WebSocket server.
//!
//! Each browser connection gets its own isolated game. Clients send JSON
//! actions and receive JSON frames (snapshot plus events) about 30 times a
//! second, while a background scheduler ticks every game at 60 Hz.
//!
//! ## Usage
//!
//! Build with web feature:
//! ```sh
//! cargo build --features web
//! ```
//!
//! Run with web server:
//! ```sh
//! ./target/debug/skyflap --serve        # Default port 3000
//! ./target/debug/skyflap --serve 8080   # Custom port
//! ```

#[cfg(feature = "web")]
mod registry;

#[cfg(feature = "web")]
mod server;

#[cfg(feature = "web")]
pub use registry::{parse_action, ClientAction, LiveSession, ServerFrame, SessionRegistry};

#[cfg(feature = "web")]
pub use server::{run_scheduler, start_web_server};
