pub mod config;
pub mod logging;

pub mod command;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod template;
pub mod token;
