//! Common test infrastructure
//!
//! Spawns in-process stand-ins for the movie database and auth services,
//! and builds client state over temporary storage files.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestServer, TEST_USER, TEST_PASS};
//!
//! #[tokio::test]
//! async fn test_login() {
//!     let server = TestServer::spawn().await;
//!     let env = common::TestEnv::new(&server);
//!     let mut app = env.start().await;
//!     app.login(TEST_USER, TEST_PASS).await.unwrap();
//! }
//! ```

mod constants;
mod fixtures;
mod server;

pub use constants::*;
pub use fixtures::TestEnv;
pub use server::TestServer;

#[allow(unused_imports)]
pub use fixtures::{movie_json, test_movies};
