//! Domain types shared across Academy services.

pub mod user;
