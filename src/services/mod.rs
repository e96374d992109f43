// src/services/mod.rs

//! Domain services. Handlers stay thin and call into these with the
//! injected `Store`.

pub mod auth;
pub mod exam;
pub mod question;
pub mod submission;
