//! tests/mod.rs
//! Pruebas de la app completa (rutas + middlewares) con un mailer en memoria.

mod support;
