//! Value Objects
//!
//! 識別子や座標など、値そのものに意味を持つ不変のドメイン型。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// 接続 ID（トランスポート層が払い出す、接続ごとに一意な識別子）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// 文字列から ConnectionId を作成
    ///
    /// 空文字列は受け付けない。
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyConnectionId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ConnectionId の生成器（UUID v4）
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId(Uuid::new_v4().to_string())
    }
}

/// ゲームセッション ID（プロセス内で単調増加、1 始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub const FIRST: SessionId = SessionId(1);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// 次の ID を返す
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// セッション内の席（0 または 1）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub const BOTH: [Seat; 2] = [Seat::First, Seat::Second];

    /// 席番号（0 / 1）
    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }

    /// 相手の席
    pub fn opponent(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

impl TryFrom<usize> for Seat {
    type Error = ValueObjectError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Seat::First),
            1 => Ok(Seat::Second),
            other => Err(ValueObjectError::InvalidSeat(other)),
        }
    }
}

/// 盤面上の座標（列, 行）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub col: usize,
    pub row: usize,
}

impl Coordinate {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// 行優先のセル番号に変換
    pub fn to_index(self, cols: usize) -> usize {
        self.row * cols + self.col
    }

    /// セル番号から座標を復元
    pub fn from_index(index: usize, cols: usize) -> Self {
        Self {
            col: index % cols,
            row: index / cols,
        }
    }
}

/// Unix timestamp (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_rejects_empty_string() {
        // テスト項目: 空文字列の ConnectionId は作成できない
        // given (前提条件):
        let value = "   ".to_string();

        // when (操作):
        let result = ConnectionId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyConnectionId));
    }

    #[test]
    fn test_connection_id_factory_generates_unique_ids() {
        // テスト項目: Factory が毎回異なる ID を生成する
        // given (前提条件):

        // when (操作):
        let a = ConnectionIdFactory::generate();
        let b = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn test_seat_opponent_and_index() {
        // テスト項目: 席番号と相手の席が正しく求まる
        // given (前提条件):
        let seat = Seat::First;

        // when (操作):
        let opponent = seat.opponent();

        // then (期待する結果):
        assert_eq!(seat.index(), 0);
        assert_eq!(opponent, Seat::Second);
        assert_eq!(opponent.index(), 1);
        assert_eq!(opponent.opponent(), Seat::First);
        assert_eq!(Seat::try_from(2), Err(ValueObjectError::InvalidSeat(2)));
    }

    #[test]
    fn test_coordinate_index_conversion() {
        // テスト項目: 座標とセル番号が相互に変換できる
        // given (前提条件):
        let coord = Coordinate::new(3, 2);

        // when (操作):
        let index = coord.to_index(10);

        // then (期待する結果):
        assert_eq!(index, 23);
        assert_eq!(Coordinate::from_index(index, 10), coord);
    }

    #[test]
    fn test_session_id_increments() {
        // テスト項目: SessionId が 1 から単調増加する
        // given (前提条件):
        let first = SessionId::FIRST;

        // when (操作):
        let second = first.next();

        // then (期待する結果):
        assert_eq!(first.value(), 1);
        assert_eq!(second.value(), 2);
    }
}
