//! ゲーム設定（盤面サイズと艦隊構成）

use super::error::ConfigError;

pub const DEFAULT_ROWS: usize = 10;
pub const DEFAULT_COLS: usize = 10;
pub const DEFAULT_SHIP_LENGTHS: [usize; 5] = [5, 4, 3, 3, 2];

/// 盤面サイズと艦の長さの一覧
///
/// 配置処理に渡る前に [`GameConfig::validate`] で検査される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub ship_lengths: Vec<usize>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            ship_lengths: DEFAULT_SHIP_LENGTHS.to_vec(),
        }
    }
}

impl GameConfig {
    pub fn new(rows: usize, cols: usize, ship_lengths: Vec<usize>) -> Self {
        Self {
            rows,
            cols,
            ship_lengths,
        }
    }

    /// 10x10 / [5, 4, 3, 3, 2] の標準構成かどうか
    pub fn is_standard(&self) -> bool {
        self == &Self::default()
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn total_ship_cells(&self) -> usize {
        self.ship_lengths.iter().sum()
    }

    /// 形式的な検査（盤面サイズ、艦の長さ）
    ///
    /// 艦が実際に隣接せず並べられるかは `FleetPlacer::new` が確認する。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.ship_lengths.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        let long_axis = self.rows.max(self.cols);
        for (index, &length) in self.ship_lengths.iter().enumerate() {
            if length == 0 {
                return Err(ConfigError::ZeroLengthShip { index });
            }
            if length > long_axis {
                return Err(ConfigError::ShipTooLong {
                    index,
                    length,
                    rows: self.rows,
                    cols: self.cols,
                });
            }
        }
        Ok(())
    }
}
