//! ドメイン層のエラー定義

use thiserror::Error;

use super::value_object::{ConnectionId, Seat};

/// Value Object の生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("connection id must not be empty")]
    EmptyConnectionId,

    #[error("seat must be 0 or 1, got {0}")]
    InvalidSeat(usize),
}

/// ゲーム設定エラー（起動時に致命的）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("fleet must contain at least one ship")]
    EmptyFleet,

    #[error("ship #{index} has zero length")]
    ZeroLengthShip { index: usize },

    #[error("ship #{index} of length {length} does not fit a {rows}x{cols} grid")]
    ShipTooLong {
        index: usize,
        length: usize,
        rows: usize,
        cols: usize,
    },

    #[error("fallback layout is invalid: {0}")]
    InvalidFallback(#[from] LayoutError),

    #[error("no non-adjacent layout found for ships {lengths:?} on a {rows}x{cols} grid")]
    NoValidLayout {
        rows: usize,
        cols: usize,
        lengths: Vec<usize>,
    },
}

/// 艦隊レイアウトの検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout has {actual} ships but the fleet has {expected}")]
    ShipCountMismatch { expected: usize, actual: usize },

    #[error("ship #{index} has length {actual}, expected {expected}")]
    LengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("ship #{index} leaves the grid")]
    OutOfBounds { index: usize },

    #[error("ship #{index} overlaps or touches another ship")]
    Collision { index: usize },
}

/// ランダム配置の試行が尽きた（フォールバックで回復する）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("ship #{ship_index} could not be placed after {attempts} attempts")]
    Exhausted { ship_index: usize, attempts: usize },
}

/// 盤面操作エラー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cell {index} is outside a board of {cells} cells")]
    InvalidCoordinate { index: usize, cells: usize },
}

/// 射撃が受理されなかった理由（プロトコル違反。プレイヤーには通知しない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShotRejected {
    #[error("the session is already over")]
    SessionOver,

    #[error("it is not seat {0:?}'s turn")]
    NotYourTurn(Seat),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Registry 操作エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("connection '{0}' is already registered")]
    DuplicateConnection(ConnectionId),
}

/// メッセージ送信エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' is not registered")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}
