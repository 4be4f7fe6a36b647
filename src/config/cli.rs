use crate::domain::model::FilterCriteria;
use crate::views::ViewInput;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "drugnet")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal client for the drug relationship service")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    /// Backend base URL (default: http://127.0.0.1:8000)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Path to TOML configuration file (default: ./drugnet.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Also write the view payload to this file (.csv, .tsv or .json)
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Log as JSON lines instead of compact text
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Service status and graph size (/)
    Home,

    /// Shortest path between two drugs (/path)
    Path {
        /// Starting drug
        start: String,
        /// Destination drug
        end: String,
    },

    /// Most similar drugs to the given one (/alternatives)
    Alternatives {
        /// Drug name
        name: String,
        /// How many alternatives to return (backend default: 10)
        #[arg(long)]
        top_n: Option<u32>,
    },

    /// Filter drugs by criteria; blank criteria are ignored (/filter)
    Filter {
        /// Medical condition (substring match)
        #[arg(long)]
        condition: Option<String>,
        /// Pregnancy category (A, B, C, D, X, N)
        #[arg(long)]
        pregnancy_category: Option<String>,
        /// Access (Rx, OTC, Rx/OTC)
        #[arg(long)]
        rx_otc: Option<String>,
        /// Controlled substance schedule (N, M, U, 1-5)
        #[arg(long)]
        csa: Option<String>,
    },

    /// Search a drug by name and show its record (/details)
    Details {
        /// Full or partial drug name
        query: String,
    },

    /// Open a route by location, e.g. "/path?start=Aspirin&end=Advil"
    Open { location: String },

    /// Print the route table
    Routes,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl Command {
    /// `None` for commands that are not a single view (`open`, `routes`).
    pub fn view_input(&self) -> Option<ViewInput> {
        match self {
            Command::Home => Some(ViewInput::Home),
            Command::Path { start, end } => Some(ViewInput::Path {
                start: start.clone(),
                end: end.clone(),
            }),
            Command::Alternatives { name, top_n } => Some(ViewInput::Alternatives {
                name: name.clone(),
                top_n: *top_n,
            }),
            Command::Filter {
                condition,
                pregnancy_category,
                rx_otc,
                csa,
            } => Some(ViewInput::Filter {
                criteria: FilterCriteria {
                    condition: non_blank(condition),
                    pregnancy_category: non_blank(pregnancy_category),
                    rx_otc: non_blank(rx_otc),
                    csa: non_blank(csa),
                    ..Default::default()
                },
            }),
            Command::Details { query } => Some(ViewInput::Details {
                query: query.clone(),
            }),
            Command::Open { .. } | Command::Routes => None,
        }
    }
}
