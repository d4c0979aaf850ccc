//! Storage adapters against real Postgres and Redis containers.
//!
//! Needs a Docker daemon: `cargo test --test storage -- --ignored`.

mod accounts;
mod containers;
mod sessions;
mod users;
