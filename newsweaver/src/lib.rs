// Library interface for newsweaver modules
// This allows tests and other binaries to import modules

pub mod parser;
pub mod pipeline;
pub mod routing;
pub mod server;
