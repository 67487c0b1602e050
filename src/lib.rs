//! Game management client (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, the
//! integration tests and the benchmarks can use `gamemng::{core,session,...}`.

pub use gamemng_core as core;
pub use gamemng_input as input;
pub use gamemng_session as session;
pub use gamemng_term as term;
pub use gamemng_types as types;
