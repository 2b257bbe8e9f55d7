//! Configuration validation types shared by the config loaders

pub mod validation;
