//! Interactive explorer for the Anime Explorer gateway.

pub mod backend;
pub mod commands;
pub mod render;
pub mod session;

pub use backend::{ClientError, GatewayApi, HttpGateway};
pub use commands::Command;
pub use session::{ExplorerSession, Phase, SessionError};
