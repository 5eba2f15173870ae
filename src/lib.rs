//! Hexbattle Bot - autonomous player for the hex tank battle server

pub mod core;
pub mod hex;
pub mod model;
pub mod protocol;
pub mod session;
pub mod strategy;
