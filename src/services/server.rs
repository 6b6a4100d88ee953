use anyhow::Result;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::config::settings::AppConfig;
use crate::database::{self, boards, seed, setup};

pub struct ServerService {
    port: u16,
    seed: bool,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, seed: bool, config: AppConfig) -> Self {
        Self { port, seed, config }
    }

    pub async fn run(self) -> Result<()> {
        let pool = database::create_pool(&self.config.server.database_path)?;
        self.prepare_database(&pool)?;

        if self.config.server.admin_passcode.is_empty() {
            log::warn!("No admin passcode configured, admin resources are open");
        }

        let state = Arc::new(AppState {
            pool,
            config: self.config,
        });

        let app = create_router(state).layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Serving leaderboard on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    fn prepare_database(&self, pool: &database::DbPool) -> Result<()> {
        let conn = database::get_connection(pool)?;
        setup::initialize_database(&conn, false)?;

        // A configured default board outside the seeded list still has to exist
        let default_board = &self.config.scoring.default_board;
        boards::ensure_board(&conn, default_board, default_board)?;

        if self.seed {
            seed::seed_sample_data(&conn)?;
        }
        Ok(())
    }
}
