pub mod account;
pub mod rules;
pub mod validation;
