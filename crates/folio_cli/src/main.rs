//! Folio CLI - serve and edit the site config document
//!
//! Usage: folio <command> [options]

mod commands;

use clap::{Parser, Subcommand};
use folio_common::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};
use tokio::runtime::Runtime;

#[derive(Parser)]
#[command(name = "folio", version, about = "Folio site config manager")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose/debug logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines (stderr)
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Address to bind (overrides HOST and the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides PORT and the config file)
        #[arg(long, short)]
        port: Option<u16>,

        /// Keep the document in memory instead of Supabase
        #[arg(long)]
        memory: bool,
    },

    /// Start the MCP server (JSON-RPC over stdio)
    Mcp {
        /// Keep the document in memory instead of Supabase
        #[arg(long)]
        memory: bool,
    },

    /// Print the stored document as JSON
    Show,

    /// Add a page and its sidebar entry
    Add {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        label: Option<String>,

        #[arg(long)]
        content: Option<String>,

        /// Mark the sidebar entry active
        #[arg(long)]
        active: bool,
    },

    /// Delete a page and its sidebar entry
    Delete { id: String },

    /// Change an existing item; omitted options keep their value
    Update {
        old_id: String,

        /// Rename the item
        #[arg(long)]
        id: Option<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        label: Option<String>,

        #[arg(long)]
        content: Option<String>,

        #[arg(long)]
        active: Option<bool>,
    },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { EXIT_USAGE } else { EXIT_SUCCESS };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    folio_common::telemetry::init_tracing(cli.verbose, cli.json_logs);

    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: Failed to create Tokio runtime: {}", e);
            std::process::exit(EXIT_ERROR);
        }
    };

    let result = match cli.command {
        Commands::Serve { host, port, memory } => {
            rt.block_on(commands::server::cmd_serve(host, port, memory))
        }
        Commands::Mcp { memory } => commands::server::cmd_mcp(&rt, memory),
        Commands::Show => rt.block_on(commands::items::cmd_show()),
        Commands::Add {
            id,
            title,
            label,
            content,
            active,
        } => rt.block_on(commands::items::cmd_add(id, title, label, content, active)),
        Commands::Delete { id } => rt.block_on(commands::items::cmd_delete(id)),
        Commands::Update {
            old_id,
            id,
            title,
            label,
            content,
            active,
        } => rt.block_on(commands::items::cmd_update(
            old_id, id, title, label, content, active,
        )),
    };

    if let Err(e) = result {
        tracing::debug!("Command failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(EXIT_ERROR);
    }
}
