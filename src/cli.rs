//! otflow command line, built on clap.
//!
//! Defines [`Cli`] with the [`Command`] subcommands (stages, show, next,
//! orders, board, demo) and the global flags (--config, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// otflow — production lifecycle for print-shop work orders.
#[derive(Debug, Parser)]
#[command(name = "otflow", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the configuration file (defaults to ./otflow.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// otflow subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lists the lifecycle stages in order.
    Stages,

    /// Shows the stage a stored status renders as.
    Show {
        /// Stored status key, e.g. `die_cutting`.
        status: String,

        /// Fail on unknown statuses instead of showing the first stage.
        #[arg(long)]
        strict: bool,
    },

    /// Shows the stage that follows a status.
    Next { status: String },

    /// Lists work orders from a snapshot file, highest priority first.
    Orders {
        /// JSON or TOML file with `work_orders`.
        #[arg(long)]
        file: PathBuf,

        /// Only orders whose OT number or client contains this text.
        #[arg(long)]
        search: Option<String>,

        /// Include completed orders.
        #[arg(long)]
        all: bool,
    },

    /// Renders the machine utilization board from a snapshot file.
    Board {
        /// JSON or TOML file with `machines` and `work_orders`.
        #[arg(long)]
        file: PathBuf,

        /// Only place orders whose OT number or client contains this text.
        #[arg(long)]
        search: Option<String>,

        /// Print the board as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Walks a new work order through every stage.
    Demo {
        #[arg(long, default_value = "OT-DEMO-1")]
        ot_number: String,

        #[arg(long, default_value = "Demo Client")]
        client: String,

        /// Units ordered.
        #[arg(long, default_value_t = 1000)]
        quantity: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_show_subcommand() {
        let cli = Cli::parse_from(["otflow", "show", "die_cutting", "--strict"]);
        match cli.command {
            Command::Show { status, strict } => {
                assert_eq!(status, "die_cutting");
                assert!(strict);
            }
            _ => panic!("expected Show command"),
        }
    }

    #[test]
    fn cli_parses_board_with_global_flags() {
        let cli = Cli::parse_from([
            "otflow",
            "--config",
            "shop.toml",
            "-v",
            "board",
            "--file",
            "snapshot.json",
            "--search",
            "andes",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("shop.toml")));
        match cli.command {
            Command::Board { file, search, json } => {
                assert_eq!(file, PathBuf::from("snapshot.json"));
                assert_eq!(search.as_deref(), Some("andes"));
                assert!(!json);
            }
            _ => panic!("expected Board command"),
        }
    }

    #[test]
    fn cli_parses_orders_subcommand() {
        let cli = Cli::parse_from(["otflow", "orders", "--file", "shop.toml", "--all"]);
        match cli.command {
            Command::Orders { file, search, all } => {
                assert_eq!(file, PathBuf::from("shop.toml"));
                assert!(search.is_none());
                assert!(all);
            }
            _ => panic!("expected Orders command"),
        }
    }

    #[test]
    fn cli_demo_defaults() {
        let cli = Cli::parse_from(["otflow", "demo"]);
        match cli.command {
            Command::Demo {
                ot_number,
                client,
                quantity,
            } => {
                assert_eq!(ot_number, "OT-DEMO-1");
                assert_eq!(client, "Demo Client");
                assert_eq!(quantity, 1000);
            }
            _ => panic!("expected Demo command"),
        }
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
