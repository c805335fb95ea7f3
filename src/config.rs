//! Server configuration
//!
//! Command line arguments for the server binary.

use clap::Parser;

/// Default listen address
pub const DEFAULT_ADDR: &str = "127.0.0.1:2020";

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "line_chat=info,line_chat_server=info";

#[derive(Parser, Debug)]
#[command(name = "line-chat-server")]
#[command(about = "Line-oriented TCP chat room", long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(short, long, default_value = DEFAULT_ADDR)]
    pub addr: String,
}
