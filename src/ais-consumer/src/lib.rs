#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Implements a binary that listens to an ais stream for a fixed window and persists a snapshot
//! of the last known state of every recently active vessel.

pub mod aisstream;
pub mod consumer;
pub mod error;
pub mod models;
pub mod settings;
pub mod startup;
