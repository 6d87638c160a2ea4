use clap::{Parser, Subcommand};

/// Chamados — ticketing REST backend
#[derive(Parser)]
#[command(name = "chamados", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to bind
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}
