pub mod issue_session;
pub mod resolve_session;
pub mod revoke_session;
