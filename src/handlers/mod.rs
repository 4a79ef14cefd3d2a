//! handlers/mod.rs
//! Módulo que agrupa los distintos handlers HTTP.
pub mod contact_handler;
pub mod health_handler;
