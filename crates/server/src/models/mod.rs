//! Domain models owned by the server.
//!
//! Product types live in `stockroom-core` because the client shares them;
//! users never leave the server.

pub mod user;
