//! Runtime module — process lifecycle: logging, config, first load.

pub mod boot;
