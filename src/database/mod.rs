//! Store contracts for the three event tables.
//!
//! Every function is generic over `ConnectionTrait` so the draw engine can run
//! them inside one transaction while the claim engine runs them one statement
//! at a time. Conditional updates return `bool` (exactly one row affected)
//! and are the only synchronisation point between concurrent requests.

pub mod codes;
pub mod connection;
pub mod prizes;
pub mod winners;

pub use connection::{DbPool, create_pool, run_migrations};
