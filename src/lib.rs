//! Dilemma Machine - Ethical Dilemma Game Engine
//!
//! This crate implements the game progression state machine, the
//! cross-player response aggregation store, and the value-profile
//! classifier behind the dilemma game.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
