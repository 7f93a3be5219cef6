//! 艦隊配置サービス
//!
//! 重なりも隣接もないランダム配置と、FleetPlacer の生成時に一度だけ検証する
//! 固定のフォールバック配置を提供する。

use rand::Rng;

use crate::domain::{
    config::{DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_SHIP_LENGTHS, GameConfig},
    entity::{Orientation, Ship},
    error::{ConfigError, LayoutError, PlacementError},
    value_object::Coordinate,
};

/// 1 隻あたりのランダム試行回数（使い切るとランダム配置全体が失敗）
pub const MAX_PLACEMENT_ATTEMPTS: usize = 25;

/// 標準構成 10x10 / [5, 4, 3, 3, 2] 用の固定配置（艦ごとに `(col, row, orientation)`）
const STANDARD_FALLBACK: [(usize, usize, Orientation); 5] = [
    (1, 1, Orientation::Vertical),
    (3, 2, Orientation::Horizontal),
    (5, 5, Orientation::Vertical),
    (8, 2, Orientation::Vertical),
    (8, 8, Orientation::Horizontal),
];

/// 1 枚の盤面上の艦の配置
///
/// `cell_owner[i]` はセル `i` を占める艦の番号（空きなら `None`）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetLayout {
    rows: usize,
    cols: usize,
    cell_owner: Vec<Option<usize>>,
    ships: Vec<Ship>,
}

impl FleetLayout {
    /// 艦のない空の盤面
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cell_owner: vec![None; rows * cols],
            ships: Vec::new(),
        }
    }

    /// 明示した艦の位置から配置を組み立てる
    ///
    /// 艦の数と長さ、盤面内かどうか、重なりと隣接を検査する。
    pub fn from_ships(
        rows: usize,
        cols: usize,
        lengths: &[usize],
        ships: Vec<Ship>,
    ) -> Result<Self, LayoutError> {
        if ships.len() != lengths.len() {
            return Err(LayoutError::ShipCountMismatch {
                expected: lengths.len(),
                actual: ships.len(),
            });
        }
        let mut layout = Self::empty(rows, cols);
        for (index, (ship, &expected)) in ships.into_iter().zip(lengths).enumerate() {
            if ship.length() != expected {
                return Err(LayoutError::LengthMismatch {
                    index,
                    expected,
                    actual: ship.length(),
                });
            }
            if !ship.fits(rows, cols) {
                return Err(LayoutError::OutOfBounds { index });
            }
            if !layout.can_place(&ship) {
                return Err(LayoutError::Collision { index });
            }
            layout.commit(ship);
        }
        Ok(layout)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_owner(&self) -> &[Option<usize>] {
        &self.cell_owner
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn into_parts(self) -> (Vec<Option<usize>>, Vec<Ship>) {
        (self.cell_owner, self.ships)
    }

    /// 盤面内に収まり、占有セルとその周囲 8 近傍がすべて空いていれば置ける
    pub fn can_place(&self, ship: &Ship) -> bool {
        if !ship.fits(self.rows, self.cols) {
            return false;
        }
        let first = ship.anchor();
        let span = ship.length() - 1;
        let last = match ship.orientation() {
            Orientation::Horizontal => Coordinate::new(first.col + span, first.row),
            Orientation::Vertical => Coordinate::new(first.col, first.row + span),
        };
        let col_range = first.col.saturating_sub(1)..=(last.col + 1).min(self.cols - 1);
        let row_range = first.row.saturating_sub(1)..=(last.row + 1).min(self.rows - 1);

        row_range.into_iter().all(|row| {
            col_range
                .clone()
                .all(|col| self.cell_owner[row * self.cols + col].is_none())
        })
    }

    fn commit(&mut self, ship: Ship) {
        let index = self.ships.len();
        for coord in ship.footprint() {
            self.cell_owner[coord.to_index(self.cols)] = Some(index);
        }
        self.ships.push(ship);
    }

    fn uncommit_last(&mut self) {
        if let Some(ship) = self.ships.pop() {
            for coord in ship.footprint() {
                self.cell_owner[coord.to_index(self.cols)] = None;
            }
        }
    }
}

/// `rows` x `cols` の盤面に `lengths` の艦をランダムに配置する
///
/// 艦は順番に、それまでに置いた艦を避けて置かれる。
/// [`MAX_PLACEMENT_ATTEMPTS`] 回で置き場所が見つからない艦があれば全体が失敗する。
pub fn place_fleet<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    lengths: &[usize],
    rng: &mut R,
) -> Result<FleetLayout, PlacementError> {
    let mut layout = FleetLayout::empty(rows, cols);

    for (ship_index, &length) in lengths.iter().enumerate() {
        let placed = (0..MAX_PLACEMENT_ATTEMPTS)
            .filter_map(|_| random_candidate(rows, cols, length, rng))
            .find(|candidate| layout.can_place(candidate));

        match placed {
            Some(ship) => layout.commit(ship),
            None => {
                return Err(PlacementError::Exhausted {
                    ship_index,
                    attempts: MAX_PLACEMENT_ATTEMPTS,
                });
            }
        }
    }

    Ok(layout)
}

/// 収まる向きから一様に選び、盤面内に収まる起点を一様に選ぶ
fn random_candidate<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    length: usize,
    rng: &mut R,
) -> Option<Ship> {
    let orientation = match (length <= cols, length <= rows) {
        (true, true) => {
            if rng.random_bool(0.5) {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            }
        }
        (true, false) => Orientation::Horizontal,
        (false, true) => Orientation::Vertical,
        (false, false) => return None,
    };
    let (max_col, max_row) = match orientation {
        Orientation::Horizontal => (cols - length, rows - 1),
        Orientation::Vertical => (cols - 1, rows - length),
    };
    let anchor = Coordinate::new(rng.random_range(0..=max_col), rng.random_range(0..=max_row));
    Some(Ship::new(length, anchor, orientation))
}

/// ゲーム設定ごとの艦隊配置
///
/// 生成時に設定とフォールバック配置を一度だけ検証するので、
/// 以後の [`FleetPlacer::place`] は失敗しない。
#[derive(Debug, Clone)]
pub struct FleetPlacer {
    config: GameConfig,
    fallback: FleetLayout,
}

impl FleetPlacer {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let fallback = if config.is_standard() {
            standard_fallback()?
        } else {
            search_layout(&config).ok_or_else(|| ConfigError::NoValidLayout {
                rows: config.rows,
                cols: config.cols,
                lengths: config.ship_lengths.clone(),
            })?
        };

        Ok(Self { config, fallback })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn fallback(&self) -> &FleetLayout {
        &self.fallback
    }

    /// ランダム配置のみ
    pub fn place_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<FleetLayout, PlacementError> {
        place_fleet(
            self.config.rows,
            self.config.cols,
            &self.config.ship_lengths,
            rng,
        )
    }

    /// ランダム配置。試行を使い切ったらフォールバック配置を返す
    pub fn place<R: Rng + ?Sized>(&self, rng: &mut R) -> FleetLayout {
        match self.place_random(rng) {
            Ok(layout) => layout,
            Err(e) => {
                tracing::debug!("Random placement failed ({}), using fallback layout", e);
                self.fallback.clone()
            }
        }
    }
}

fn standard_fallback() -> Result<FleetLayout, LayoutError> {
    let ships = STANDARD_FALLBACK
        .iter()
        .zip(DEFAULT_SHIP_LENGTHS)
        .map(|(&(col, row, orientation), length)| {
            Ship::new(length, Coordinate::new(col, row), orientation)
        })
        .collect();
    FleetLayout::from_ships(DEFAULT_ROWS, DEFAULT_COLS, &DEFAULT_SHIP_LENGTHS, ships)
}

/// フォールバック探索で `can_place` を評価する回数の上限
pub const SEARCH_BUDGET: usize = 2_000_000;

/// 艦どうしが接しないために必要な最小面積での事前判定
///
/// 各艦を右と下に 1 セル広げた `2 x (長さ + 1)` の領域は互いに重ならず、
/// すべて `(rows + 1) x (cols + 1)` の盤面に収まる必要がある。
fn exceeds_capacity(config: &GameConfig) -> bool {
    let required: usize = config
        .ship_lengths
        .iter()
        .map(|&length| 2 * (length + 1))
        .sum();
    config.total_ship_cells() > config.cell_count()
        || required > (config.rows + 1) * (config.cols + 1)
}

/// バックトラックで最初に見つかった配置（行優先、横向き → 縦向きの順）
///
/// 探索量は [`SEARCH_BUDGET`] で打ち切り、見つからなければ `None`。
fn search_layout(config: &GameConfig) -> Option<FleetLayout> {
    if exceeds_capacity(config) {
        return None;
    }
    let mut search = LayoutSearch {
        layout: FleetLayout::empty(config.rows, config.cols),
        budget: SEARCH_BUDGET,
    };
    search
        .backtrack(&config.ship_lengths, None, 0)
        .then_some(search.layout)
}

struct LayoutSearch {
    layout: FleetLayout,
    budget: usize,
}

impl LayoutSearch {
    /// `slot` は `(row * cols + col) * 2 + orientation` の通し番号。
    /// 直前と同じ長さの艦は直前より後ろの slot からだけ試す（同じ配置の並べ替えを除く）。
    fn backtrack(
        &mut self,
        lengths: &[usize],
        previous: Option<usize>,
        first_slot: usize,
    ) -> bool {
        let Some((&length, rest)) = lengths.split_first() else {
            return true;
        };
        let start = if previous == Some(length) { first_slot } else { 0 };
        let slots = self.layout.rows * self.layout.cols * 2;

        for slot in start..slots {
            if self.budget == 0 {
                return false;
            }
            self.budget -= 1;

            let cell = slot / 2;
            let orientation = if slot % 2 == 0 {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let anchor = Coordinate::from_index(cell, self.layout.cols);
            let ship = Ship::new(length, anchor, orientation);
            if !self.layout.can_place(&ship) {
                continue;
            }
            self.layout.commit(ship);
            if self.backtrack(rest, Some(length), slot + 1) {
                return true;
            }
            self.layout.uncommit_last();
        }
        false
    }
}
