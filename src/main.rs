use anyhow::Result;

use club_leaderboard::cli::{Cli, Command};
use club_leaderboard::{
    handle_completions, handle_init_db, handle_leaderboard, handle_player, handle_serve,
    handle_submit, interpret, load_config,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(&cli)
}

fn execute_command(cli: &Cli) -> Result<()> {
    if let Command::Completions { shell } = &cli.command {
        return handle_completions(*shell);
    }

    let config = load_config(cli)?;
    match &cli.command {
        Command::Serve { port, seed } => handle_serve(*port, *seed, config),
        Command::InitDb { force, seed } => handle_init_db(*force, *seed, &config),
        Command::Leaderboard { board, search } => {
            handle_leaderboard(board.as_deref(), search.as_deref(), &config)
        }
        Command::Player { id, board } => handle_player(*id, board.as_deref(), &config),
        Command::Submit { label, board, passcode, placements } => handle_submit(
            label.as_deref(),
            board.as_deref(),
            passcode.as_deref(),
            placements,
            &config,
        ),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
