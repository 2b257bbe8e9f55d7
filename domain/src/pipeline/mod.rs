//! Per-question pipeline state machine

pub mod state;
