pub mod config;
pub mod logging;

pub mod apps;
pub mod checksum;
pub mod http;
pub mod patch;
pub mod pipeline;
pub mod release;
pub mod render;
pub mod resolver;
