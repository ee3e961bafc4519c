//! 정렬/집계 모듈
//!
//! KWIC 행을 특정 위치(3L, 2L, 1L, C, 1R, 2R, 3R 등)의 값으로 정렬하거나
//! 그 위치에 나타난 값들의 빈도를 집계합니다.
//! 모든 정렬은 안정 정렬이므로 같은 키끼리는 원래 순서가 유지됩니다.

use clap::ValueEnum;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{KwicError, Result};
use crate::window::Row;

/// 정렬 방식
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum SortMode {
    /// 선택한 칸의 문자열 오름차순 (유니코드 코드포인트 순)
    #[default]
    Alphabetic,
    /// 선택한 칸 값의 출현 빈도 내림차순
    Frequency,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Alphabetic => write!(f, "alphabetic"),
            SortMode::Frequency => write!(f, "frequency"),
        }
    }
}

/// 가운데 기준 상대 위치 (음수 = 왼쪽, 0 = 가운데, 양수 = 오른쪽)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position(pub isize);

impl Position {
    pub const CENTER: Position = Position(0);

    /// n번째 왼쪽 칸
    pub fn left(n: usize) -> Self {
        Position(-(n as isize))
    }

    /// n번째 오른쪽 칸
    pub fn right(n: usize) -> Self {
        Position(n as isize)
    }

    /// 상대 위치 값
    pub fn offset(&self) -> isize {
        self.0
    }

    /// 주어진 문맥 크기에서의 절대 칸 인덱스
    pub fn cell_index(&self, span: usize) -> Option<usize> {
        if self.0.unsigned_abs() > span {
            return None;
        }
        Some((span as isize + self.0) as usize)
    }

    /// 문맥 크기 안에 있는지 검사
    pub fn validate(&self, span: usize) -> Result<()> {
        match self.cell_index(span) {
            Some(_) => Ok(()),
            None => Err(KwicError::InvalidPosition {
                position: self.to_string(),
                span,
            }),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "C"),
            n if n < 0 => write!(f, "{}L", -n),
            n => write!(f, "{}R", n),
        }
    }
}

impl FromStr for Position {
    type Err = String;

    /// `3L`, `L3`, `C`, `center`, `1R`, `R1` 형식 파싱
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim().to_ascii_uppercase();
        if s == "C" || s == "CENTER" || s == "0" {
            return Ok(Position::CENTER);
        }

        let invalid = || format!("정렬 위치 형식이 잘못되었습니다: '{}' (예: 3L, 1L, C, 1R)", s);
        let (digits, side) = if let Some(d) = s.strip_suffix('L').or_else(|| s.strip_prefix('L')) {
            (d, -1)
        } else if let Some(d) = s.strip_suffix('R').or_else(|| s.strip_prefix('R')) {
            (d, 1)
        } else {
            return Err(invalid());
        };

        let n: isize = digits.parse().map_err(|_| invalid())?;
        if n <= 0 {
            return Err(invalid());
        }
        Ok(Position(side * n))
    }
}

/// 행마다 선택한 칸의 값을 뽑음 (범위를 벗어나면 에러)
fn keys<T: AsRef<Row>>(items: &[T], position: Position) -> Result<Vec<&str>> {
    items
        .iter()
        .map(|item| {
            let row = item.as_ref();
            row.cell(position.offset())
                .ok_or_else(|| KwicError::InvalidPosition {
                    position: position.to_string(),
                    span: row.span,
                })
        })
        .collect()
}

/// 행 정렬
///
/// # Arguments
/// * `items` - 정렬할 행 (`Row` 또는 `Row`를 담은 타입)
/// * `position` - 정렬 기준 위치
/// * `mode` - 정렬 방식
///
/// # Returns
/// 재정렬된 새 목록 (행이 추가되거나 빠지지 않음)
pub fn sort_rows<T: AsRef<Row> + Clone>(
    items: &[T],
    position: Position,
    mode: SortMode,
) -> Result<Vec<T>> {
    let keys = keys(items, position)?;
    let mut order: Vec<usize> = (0..items.len()).collect();

    match mode {
        SortMode::Alphabetic => {
            order.sort_by(|&a, &b| keys[a].cmp(keys[b]));
        }
        SortMode::Frequency => {
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for &key in &keys {
                *counts.entry(key).or_insert(0) += 1;
            }
            order.sort_by_key(|&i| Reverse(counts[keys[i]]));
        }
    }

    Ok(order.into_iter().map(|i| items[i].clone()).collect())
}

/// 선택한 위치의 값별 빈도표
///
/// 빈도 내림차순이며, 빈도가 같으면 먼저 나타난 값이 앞에 옵니다.
pub fn frequencies<T: AsRef<Row>>(items: &[T], position: Position) -> Result<Vec<(String, usize)>> {
    let keys = keys(items, position)?;
    let mut table: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for key in keys {
        match index.get(key) {
            Some(&i) => table[i].1 += 1,
            None => {
                index.insert(key, table.len());
                table.push((key.to_string(), 1));
            }
        }
    }

    table.sort_by_key(|(_, count)| Reverse(*count));
    Ok(table)
}
