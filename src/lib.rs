pub mod api;
pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod database;
pub mod domain;
pub mod http;
pub mod services;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use cli::Cli;
use std::path::Path;

use crate::cli::Command;
use crate::client::render::{render_leaderboard, render_panel, render_status};
use crate::client::{ApiClient, LeaderboardViewer, ResultForm};
use crate::config::settings::{AppConfig, ADMIN_PASSCODE_VAR};
use crate::database::{seed, setup};
use crate::services::server::ServerService;

pub fn interpret() -> Cli {
    Cli::parse()
}

/// Loads the config and applies command line overrides.
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(url) = &cli.api_url {
        config.client.api_url = url.clone();
    }
    Ok(config)
}

pub fn handle_serve(port: u16, seed: bool, config: AppConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = ServerService::new(port, seed, config);
        service.run().await
    })
}

pub fn handle_init_db(force: bool, seed: bool, config: &AppConfig) -> Result<()> {
    let path = &config.server.database_path;
    let conn = rusqlite::Connection::open(Path::new(path))
        .with_context(|| format!("Failed to open database {path}"))?;
    conn.pragma_update(None, "foreign_keys", "ON")?;

    setup::initialize_database(&conn, force)?;
    if seed && seed::seed_sample_data(&conn)? {
        println!("Sample players added");
    }
    println!("Database ready at {path}");
    Ok(())
}

pub fn handle_leaderboard(board: Option<&str>, search: Option<&str>, config: &AppConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let api = ApiClient::new(&config.client)?;
        let mut viewer = LeaderboardViewer::new(api, config.client.detail_cache_ttl);
        viewer
            .load(board)
            .await
            .context(client::viewer::LOAD_FAILED)?;
        if let Some(term) = search {
            viewer.set_search(term);
        }

        let rows = viewer.rows();
        print!(
            "{}",
            render_leaderboard(&viewer.current_board_label(), &rows, viewer.players().len())
        );
        Ok(())
    })
}

pub fn handle_player(id: i64, board: Option<&str>, config: &AppConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let api = ApiClient::new(&config.client)?;
        let mut viewer = LeaderboardViewer::new(api, config.client.detail_cache_ttl);
        if board.is_some() {
            viewer
                .load(board)
                .await
                .context(client::viewer::LOAD_FAILED)?;
        }
        let panel = viewer.player_panel(id).await;
        print!("{}", render_panel(&panel));
        Ok(())
    })
}

pub fn handle_submit(
    label: Option<&str>,
    board: Option<&str>,
    passcode: Option<&str>,
    placements: &[String],
    config: &AppConfig,
) -> Result<()> {
    let placements = cli::parse_placements(placements)?;
    let passcode = passcode
        .map(str::to_string)
        .or_else(|| std::env::var(ADMIN_PASSCODE_VAR).ok());

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let api = ApiClient::new(&config.client)?;
        let mut form = ResultForm::new(api, config.scoring.clone(), passcode);
        form.load_boards().await;

        if let Some(board) = board {
            form.select_board(board);
        }
        if let Some(label) = label {
            form.set_label(label);
        }
        for (rank, nickname) in &placements {
            form.set_nickname(*rank, nickname)?;
        }

        let status = form.submit().await;
        println!("{}", render_status(&status));
        if status.is_error() {
            bail!("Submission was not recorded");
        }
        Ok(())
    })
}

pub fn handle_completions(shell: clap_complete::Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
