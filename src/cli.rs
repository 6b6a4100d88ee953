use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Club leaderboard server and terminal client")]
pub struct Cli {
    /// JSON config file (defaults to ./config.json when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the leaderboard API for client commands
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Start the leaderboard API server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
        /// Insert sample players when the database is empty
        #[arg(long)]
        seed: bool,
    },
    /// Create the database schema
    InitDb {
        /// Drop existing tables first
        #[arg(long)]
        force: bool,
        /// Insert sample players when the database is empty
        #[arg(long)]
        seed: bool,
    },
    /// Show the leaderboard
    Leaderboard {
        /// Leaderboard / season id
        #[arg(short, long)]
        board: Option<String>,
        /// Only show nicknames containing this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one player's details and recent history
    Player {
        id: i64,
        #[arg(short, long)]
        board: Option<String>,
    },
    /// Submit a game result
    Submit {
        /// Game label (a dated label is suggested when omitted)
        #[arg(short, long)]
        label: Option<String>,
        #[arg(short, long)]
        board: Option<String>,
        /// Admin passcode (falls back to ADMIN_PASSCODE)
        #[arg(long)]
        passcode: Option<String>,
        /// Finishing order: `rank=nickname`, or nicknames in order
        #[arg(required = true)]
        placements: Vec<String>,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

/// Parses `rank=nickname` arguments. Bare nicknames take the next rank.
pub fn parse_placements(args: &[String]) -> Result<Vec<(u8, String)>> {
    let mut next_rank: u8 = 1;
    let mut placements = Vec::with_capacity(args.len());

    for arg in args {
        let (rank, nickname) = match arg.split_once('=') {
            Some((rank, nickname)) => match rank.trim().parse::<u8>() {
                Ok(rank) => (rank, nickname.trim()),
                Err(_) => bail!("Invalid rank in '{arg}'"),
            },
            None => (next_rank, arg.trim()),
        };
        if nickname.is_empty() {
            bail!("Missing nickname in '{arg}'");
        }
        placements.push((rank, nickname.to_string()));
        next_rank = rank.saturating_add(1);
    }
    Ok(placements)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_placements() {
        let parsed = parse_placements(&args(&["AceHigh", "RiverQueen", "5=LuckyChip", "SilentShark"])).unwrap();
        assert_eq!(
            parsed,
            vec![
                (1, "AceHigh".to_string()),
                (2, "RiverQueen".to_string()),
                (5, "LuckyChip".to_string()),
                (6, "SilentShark".to_string()),
            ]
        );

        assert!(parse_placements(&args(&["x=AceHigh"])).is_err());
        assert!(parse_placements(&args(&["2= "])).is_err());
    }

    #[test]
    fn test_cli_parses_submit() {
        let cli = Cli::try_parse_from([
            "club_leaderboard",
            "--api-url",
            "http://example.test/api",
            "submit",
            "--board",
            "spring",
            "1=AceHigh",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("http://example.test/api"));
        assert_eq!(
            cli.command,
            Command::Submit {
                label: None,
                board: Some("spring".to_string()),
                passcode: None,
                placements: vec!["1=AceHigh".to_string()],
            }
        );
    }
}
