//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, GetLobbyStateUseCase,
    LeaveGameUseCase, ShootUseCase, ShutdownUseCase,
};

use super::{
    handler::{get_lobby, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Battle game server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_participant_usecase,
///     disconnect_participant_usecase,
///     shoot_usecase,
///     leave_game_usecase,
///     get_lobby_state_usecase,
///     shutdown_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    app_state: Arc<AppState>,
    /// ShutdownUseCase（停止時の後始末）
    shutdown_usecase: Arc<ShutdownUseCase>,
}

impl Server {
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        shoot_usecase: Arc<ShootUseCase>,
        leave_game_usecase: Arc<LeaveGameUseCase>,
        get_lobby_state_usecase: Arc<GetLobbyStateUseCase>,
        shutdown_usecase: Arc<ShutdownUseCase>,
    ) -> Self {
        Self {
            app_state: Arc::new(AppState {
                connect_participant_usecase,
                disconnect_participant_usecase,
                shoot_usecase,
                leave_game_usecase,
                get_lobby_state_usecase,
            }),
            shutdown_usecase,
        }
    }

    /// Build the router with every endpoint and request tracing.
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/lobby", get(get_lobby))
            .layer(TraceLayer::new_for_http())
            .with_state(self.app_state.clone())
    }

    /// Run the server until Ctrl+C / SIGTERM, then tear the registry down.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Battle server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        self.shutdown_usecase.execute().await;
        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
