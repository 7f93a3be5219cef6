//! PlayerBoard entity（1 人分の艦隊と、それに対する射撃の記録）

use crate::domain::{
    entity::Ship, error::BoardError, service::FleetLayout, value_object::Coordinate,
};

/// セルごとの射撃状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShotMark {
    #[default]
    Unshot,
    Miss,
    Hit,
}

/// 閲覧者から見たセルの表示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellView {
    /// 未射撃の海（相手から見た未射撃の艦セルも含む）
    Empty,
    /// 未射撃の艦セル（所有者のみ）
    Ship,
    Miss,
    Hit,
    /// 撃沈済みの艦の命中セル
    Sunk,
}

/// 閲覧者と盤面の関係
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perspective {
    Owner,
    Opponent,
}

/// 1 発の射撃の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotReport {
    pub hit: bool,
    /// 射撃済みのセル（状態は変わらない）
    pub repeated: bool,
    /// この射撃で沈んだ艦の番号
    pub sunk: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerBoard {
    rows: usize,
    cols: usize,
    cell_owner: Vec<Option<usize>>,
    shots: Vec<ShotMark>,
    ships: Vec<Ship>,
}

impl PlayerBoard {
    pub fn new(layout: FleetLayout) -> Self {
        let rows = layout.rows();
        let cols = layout.cols();
        let (cell_owner, ships) = layout.into_parts();
        Self {
            rows,
            cols,
            shots: vec![ShotMark::Unshot; cell_owner.len()],
            cell_owner,
            ships,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.cell_owner.len()
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn shot_mark(&self, cell_index: usize) -> Option<ShotMark> {
        self.shots.get(cell_index).copied()
    }

    pub fn ship_at(&self, cell_index: usize) -> Option<usize> {
        self.cell_owner.get(cell_index).copied().flatten()
    }

    /// `cell_index` への射撃を処理する
    ///
    /// 射撃済みのセルは記録どおりの結果を返すだけで、艦の命中数を二重に数えない。
    pub fn receive_shot(&mut self, cell_index: usize) -> Result<ShotReport, BoardError> {
        let cells = self.cell_count();
        let mark = self
            .shots
            .get_mut(cell_index)
            .ok_or(BoardError::InvalidCoordinate {
                index: cell_index,
                cells,
            })?;

        match *mark {
            ShotMark::Hit => {
                return Ok(ShotReport {
                    hit: true,
                    repeated: true,
                    sunk: None,
                });
            }
            ShotMark::Miss => {
                return Ok(ShotReport {
                    hit: false,
                    repeated: true,
                    sunk: None,
                });
            }
            ShotMark::Unshot => {}
        }

        match self.cell_owner[cell_index] {
            Some(ship_index) => {
                *mark = ShotMark::Hit;
                let ship = &mut self.ships[ship_index];
                ship.register_hit();
                Ok(ShotReport {
                    hit: true,
                    repeated: false,
                    sunk: ship.is_sunk().then_some(ship_index),
                })
            }
            None => {
                *mark = ShotMark::Miss;
                Ok(ShotReport {
                    hit: false,
                    repeated: false,
                    sunk: None,
                })
            }
        }
    }

    /// 未撃沈の艦の数
    pub fn ships_remaining(&self) -> usize {
        self.ships.iter().filter(|ship| !ship.is_sunk()).count()
    }

    /// 撃沈済みの艦（艦隊の順）
    pub fn sunk_ships(&self) -> Vec<&Ship> {
        self.ships.iter().filter(|ship| ship.is_sunk()).collect()
    }

    pub fn all_sunk(&self) -> bool {
        self.ships_remaining() == 0
    }

    /// 指定した視点で全セルを描画する
    ///
    /// 相手には射撃結果しか見えず、未射撃の艦セルは `Empty` になる。
    pub fn render(&self, perspective: Perspective) -> Vec<CellView> {
        self.shots
            .iter()
            .zip(&self.cell_owner)
            .map(|(mark, owner)| match (mark, owner) {
                (ShotMark::Hit, Some(ship)) if self.ships[*ship].is_sunk() => CellView::Sunk,
                (ShotMark::Hit, _) => CellView::Hit,
                (ShotMark::Miss, _) => CellView::Miss,
                (ShotMark::Unshot, Some(_)) if perspective == Perspective::Owner => {
                    CellView::Ship
                }
                (ShotMark::Unshot, _) => CellView::Empty,
            })
            .collect()
    }

    /// セル番号に対応する座標
    pub fn coordinate(&self, cell_index: usize) -> Coordinate {
        Coordinate::from_index(cell_index, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::Orientation;

    /// 4x4 の盤面: (0,0)-(1,0) に長さ 2、(3,3) に長さ 1 の艦
    fn create_test_board() -> PlayerBoard {
        let ships = vec![
            Ship::new(2, Coordinate::new(0, 0), Orientation::Horizontal),
            Ship::new(1, Coordinate::new(3, 3), Orientation::Vertical),
        ];
        PlayerBoard::new(FleetLayout::from_ships(4, 4, &[2, 1], ships).unwrap())
    }

    #[test]
    fn test_receive_shot_hit_and_miss() {
        // テスト項目: 艦のあるセルは命中、ないセルは外れになる
        // given (前提条件):
        let mut board = create_test_board();

        // when (操作):
        let hit = board.receive_shot(0).unwrap();
        let miss = board.receive_shot(5).unwrap();

        // then (期待する結果):
        assert!(hit.hit);
        assert!(!hit.repeated);
        assert_eq!(hit.sunk, None);
        assert!(!miss.hit);
        assert_eq!(board.shot_mark(0), Some(ShotMark::Hit));
        assert_eq!(board.shot_mark(5), Some(ShotMark::Miss));
        assert_eq!(board.ships()[0].hits(), 1);
    }

    #[test]
    fn test_receive_shot_out_of_range() {
        // テスト項目: 範囲外のセル番号は InvalidCoordinate になる
        // given (前提条件):
        let mut board = create_test_board();

        // when (操作):
        let result = board.receive_shot(16);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(BoardError::InvalidCoordinate {
                index: 16,
                cells: 16
            })
        );
    }

    #[test]
    fn test_repeated_shot_does_not_double_count() {
        // テスト項目: 同じセルへの再射撃は命中数を増やさず、同じ結果を返す
        // given (前提条件):
        let mut board = create_test_board();
        board.receive_shot(0).unwrap();

        // when (操作):
        let again = board.receive_shot(0).unwrap();

        // then (期待する結果):
        assert!(again.hit);
        assert!(again.repeated);
        assert_eq!(board.ships()[0].hits(), 1);
        assert!(!board.ships()[0].is_sunk());
    }

    #[test]
    fn test_sinking_every_ship_empties_the_board() {
        // テスト項目: 全ての艦を撃沈すると残り隻数が 0 になる
        // given (前提条件):
        let mut board = create_test_board();
        assert_eq!(board.ships_remaining(), 2);

        // when (操作):
        board.receive_shot(0).unwrap();
        let sinking = board.receive_shot(1).unwrap();
        let remaining_after_first = board.ships_remaining();
        let last = board.receive_shot(15).unwrap();

        // then (期待する結果):
        assert_eq!(sinking.sunk, Some(0));
        assert_eq!(remaining_after_first, 1);
        assert_eq!(last.sunk, Some(1));
        assert!(board.all_sunk());
        assert_eq!(board.sunk_ships().len(), 2);
    }

    #[test]
    fn test_render_hides_fleet_from_opponent() {
        // テスト項目: 相手視点では未射撃の艦セルが見えない
        // given (前提条件):
        let mut board = create_test_board();
        board.receive_shot(0).unwrap();
        board.receive_shot(2).unwrap();

        // when (操作):
        let owner = board.render(Perspective::Owner);
        let opponent = board.render(Perspective::Opponent);

        // then (期待する結果):
        assert_eq!(owner[0], CellView::Hit);
        assert_eq!(owner[1], CellView::Ship);
        assert_eq!(owner[2], CellView::Miss);
        assert_eq!(owner[15], CellView::Ship);
        assert_eq!(opponent[0], CellView::Hit);
        assert_eq!(opponent[1], CellView::Empty);
        assert_eq!(opponent[2], CellView::Miss);
        assert_eq!(opponent[15], CellView::Empty);
    }

    #[test]
    fn test_render_marks_sunk_ships() {
        // テスト項目: 撃沈された艦の命中セルは両視点で Sunk と表示される
        // given (前提条件):
        let mut board = create_test_board();
        board.receive_shot(0).unwrap();
        board.receive_shot(1).unwrap();

        // when (操作):
        let opponent = board.render(Perspective::Opponent);

        // then (期待する結果):
        assert_eq!(opponent[0], CellView::Sunk);
        assert_eq!(opponent[1], CellView::Sunk);
        assert_eq!(board.render(Perspective::Owner)[1], CellView::Sunk);
    }
}
