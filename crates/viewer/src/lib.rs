// Module layout for the NDJSON viewer core.

// Core infrastructure
pub mod pattern;
pub mod parser;
pub mod time;
pub mod conf;

// Domain modules
pub mod schema;
pub mod query;
pub mod state;
pub mod render;
pub mod runtime;
