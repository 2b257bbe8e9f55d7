//! Generation domain — per-call model parameters and the final answer.

pub mod answer;
pub mod config;
