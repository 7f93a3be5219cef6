//! Ship entity

use crate::domain::value_object::Coordinate;

/// 艦の向き
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// 配置済みの艦（起点は左上のセル）と命中数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    length: usize,
    anchor: Coordinate,
    orientation: Orientation,
    hits: usize,
}

impl Ship {
    pub fn new(length: usize, anchor: Coordinate, orientation: Orientation) -> Self {
        Self {
            length,
            anchor,
            orientation,
            hits: 0,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn anchor(&self) -> Coordinate {
        self.anchor
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn is_sunk(&self) -> bool {
        self.hits == self.length
    }

    /// 命中を 1 回記録する（`length` で頭打ち）
    pub fn register_hit(&mut self) {
        if self.hits < self.length {
            self.hits += 1;
        }
    }

    /// 艦が占めるセル（起点から順に）
    pub fn footprint(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.length).map(move |i| match self.orientation {
            Orientation::Horizontal => Coordinate::new(self.anchor.col + i, self.anchor.row),
            Orientation::Vertical => Coordinate::new(self.anchor.col, self.anchor.row + i),
        })
    }

    /// `rows` x `cols` の盤面に収まるか
    pub fn fits(&self, rows: usize, cols: usize) -> bool {
        match self.orientation {
            Orientation::Horizontal => {
                self.anchor.row < rows && self.anchor.col + self.length <= cols
            }
            Orientation::Vertical => {
                self.anchor.col < cols && self.anchor.row + self.length <= rows
            }
        }
    }

    /// `coord` を占めているか
    pub fn covers(&self, coord: Coordinate) -> bool {
        self.footprint().any(|c| c == coord)
    }
}
