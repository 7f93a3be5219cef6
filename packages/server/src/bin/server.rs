//! Broadside battle server.
//!
//! Pairs WebSocket clients into two-player games and relays shots and results.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin broadside-server
//! cargo run --bin broadside-server -- --host 0.0.0.0 --port 3000 --rows 8 --cols 8 --ships 4,3,2
//! ```

use std::{collections::HashMap, sync::Arc};

use broadside_server::{
    domain::{FleetPlacer, GameConfig, MatchRegistry},
    infrastructure::message_pusher::WebSocketMessagePusher,
    ui::Server,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetLobbyStateUseCase,
        LeaveGameUseCase, ShootUseCase, ShutdownUseCase,
    },
};
use broadside_shared::{logger::setup_logger, time::SystemClock};
use clap::Parser;
use rand::{SeedableRng, rngs::SmallRng};
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "broadside-server")]
#[command(about = "Two-player grid battle server over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Number of grid rows
    #[arg(long, default_value = "10")]
    rows: usize,

    /// Number of grid columns
    #[arg(long, default_value = "10")]
    cols: usize,

    /// Ship lengths, comma separated
    #[arg(long, value_delimiter = ',', default_value = "5,4,3,3,2")]
    ships: Vec<usize>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logger(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_BIN_NAME"),
        &args.log_level,
    );

    // Initialize dependencies in order:
    // 1. FleetPlacer (validates the game configuration)
    // 2. MatchRegistry
    // 3. MessagePusher
    // 4. UseCases
    // 5. Server

    // 1. Validate the configuration once; an impossible fleet is fatal
    let config = GameConfig::new(args.rows, args.cols, args.ships);
    let placer = match FleetPlacer::new(config) {
        Ok(placer) => placer,
        Err(e) => {
            tracing::error!("Invalid game configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Game configured: {}x{} grid, ships {:?}",
        placer.config().rows,
        placer.config().cols,
        placer.config().ship_lengths
    );

    // 2. Create the registry
    let registry = Arc::new(Mutex::new(MatchRegistry::new(
        placer,
        SmallRng::from_os_rng(),
    )));

    // 3. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
        HashMap::new(),
    ))));

    // 4. Create UseCases
    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        Arc::new(SystemClock),
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let shoot_usecase = Arc::new(ShootUseCase::new(registry.clone(), message_pusher.clone()));
    let leave_game_usecase = Arc::new(LeaveGameUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let get_lobby_state_usecase = Arc::new(GetLobbyStateUseCase::new(registry.clone()));
    let shutdown_usecase = Arc::new(ShutdownUseCase::new(registry));

    // 5. Create and run the server
    let server = Server::new(
        connect_participant_usecase,
        disconnect_participant_usecase,
        shoot_usecase,
        leave_game_usecase,
        get_lobby_state_usecase,
        shutdown_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
