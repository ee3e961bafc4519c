//! KWIC 문맥 창 모듈
//!
//! 일치한 토큰을 가운데에 두고 좌우 `span`개의 문맥 토큰을 고정 폭 행으로 잘라냅니다.
//! 행의 칸 수는 항상 `2 * span + 1`이고 가운데 칸의 인덱스는 `span`입니다.
//! 문맥이 모자라면 가운데에서 먼 쪽 칸이 빈 문자열로 남습니다.

use serde::Serialize;

/// 고정 폭 KWIC 행
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// 좌우 문맥 크기
    pub span: usize,
    /// 왼쪽 문맥, 가운데, 오른쪽 문맥 순서의 칸
    pub cells: Vec<String>,
}

impl Row {
    /// 빈 행 생성
    pub fn empty(span: usize) -> Self {
        Self {
            span,
            cells: vec![String::new(); 2 * span + 1],
        }
    }

    /// 가운데(일치한) 토큰
    pub fn center(&self) -> &str {
        &self.cells[self.span]
    }

    /// 가운데 기준 상대 위치의 칸 (음수 = 왼쪽, 양수 = 오른쪽)
    pub fn cell(&self, offset: isize) -> Option<&str> {
        self.index_of(offset).map(|i| self.cells[i].as_str())
    }

    /// 상대 위치를 절대 칸 인덱스로 변환
    pub fn index_of(&self, offset: isize) -> Option<usize> {
        if offset.unsigned_abs() > self.span {
            return None;
        }
        Some((self.span as isize + offset) as usize)
    }

    /// 왼쪽 문맥 칸
    pub fn left(&self) -> &[String] {
        &self.cells[..self.span]
    }

    /// 오른쪽 문맥 칸
    pub fn right(&self) -> &[String] {
        &self.cells[self.span + 1..]
    }

    /// 탭으로 연결한 한 줄 (텍스트 내보내기용)
    pub fn to_tsv(&self) -> String {
        self.cells.join("\t")
    }
}

impl AsRef<Row> for Row {
    fn as_ref(&self) -> &Row {
        self
    }
}

/// 토큰 목록에서 KWIC 행 추출
///
/// # Arguments
/// * `tokens` - 한 줄의 토큰 목록
/// * `center_index` - 일치한 토큰의 인덱스
/// * `span` - 좌우 문맥 크기
///
/// # Returns
/// `2 * span + 1`칸의 행 (인덱스가 범위를 벗어나면 None)
///
/// # Examples
/// ```
/// use jkwic::window::window;
///
/// let tokens = ["a", "b", "c", "d"];
/// let row = window(&tokens, 1, 2).unwrap();
/// assert_eq!(row.cells, vec!["", "a", "b", "c", "d"]);
/// ```
pub fn window<S: AsRef<str>>(tokens: &[S], center_index: usize, span: usize) -> Option<Row> {
    let center = tokens.get(center_index)?;
    let mut row = Row::empty(span);

    let left_start = center_index.saturating_sub(span);
    let left = &tokens[left_start..center_index];
    // 왼쪽 문맥은 가운데 쪽으로 붙여 채움
    let offset = span - left.len();
    for (i, token) in left.iter().enumerate() {
        row.cells[offset + i] = token.as_ref().to_string();
    }

    row.cells[span] = center.as_ref().to_string();

    let right_end = (center_index + 1 + span).min(tokens.len());
    for (i, token) in tokens[center_index + 1..right_end].iter().enumerate() {
        row.cells[span + 1 + i] = token.as_ref().to_string();
    }

    Some(row)
}
