pub mod config;
pub mod logging;
pub mod routers;
pub mod server;
pub mod upstream;

pub use sqg_protocol as protocols;
