// Module layout (Clean Architecture style)
// - bootstrap: CLI flags, configuration and service wiring
// - infrastructure: Postgres repositories, Redis session store, crypto
// - presentation: HTTP handlers, auth extraction and routing
// - application: use cases, ports and their errors
// - domain: accounts, users, sessions

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
