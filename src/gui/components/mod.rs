// src/gui/components/mod.rs
pub mod chart_view;
pub mod connect;
pub mod settings;
