// src/gui/components/mod.rs
pub mod board;
pub mod status_bar;
