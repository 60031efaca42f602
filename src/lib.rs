// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod progress;

pub mod chart;
pub mod extract;
pub mod locate;
pub mod monitor;
pub mod query;
pub mod series;

pub mod cli;
pub mod gui;
