// Application layer: polling driver and terminal output for the CLI host.

pub mod poller;
pub mod render;
