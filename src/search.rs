//! KWIC 검색 파이프라인 모듈
//!
//! 줄 목록 → 토큰화 → 토큰 매칭 → 문맥 창 → 정렬 순서로 한 번의 검색을 수행합니다.
//! 검색어 컴파일 에러는 매칭을 시작하기 전에 검색 전체를 중단시키고,
//! 토큰 단위의 예외 상황은 "불일치"로 흡수됩니다.

use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;

use crate::error::{KwicError, Result};
use crate::input::SourceMap;
use crate::matcher::{Matcher, PosFilter, ScanMode, SearchMode, UntaggedPolicy};
use crate::sort::{self, Position, SortMode};
use crate::stats::Statistics;
use crate::token::{strip_bom, tokenize, Token};
use crate::window::{window, Row};

/// 기본 좌우 문맥 크기
pub const DEFAULT_SPAN: usize = 3;

/// 검색 옵션
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// 검색 방식
    pub mode: SearchMode,
    /// 자소 패턴 적용 위치 (None이면 패턴 형태에 따라 결정)
    pub scan: Option<ScanMode>,
    /// 품사 필터
    pub pos_filter: PosFilter,
    /// 태그 없는 토큰 처리 방식
    pub untagged: UntaggedPolicy,
    /// 좌우 문맥 크기
    pub span: usize,
    /// 정렬 기준 (None이면 입력 순서 유지)
    pub sort: Option<(Position, SortMode)>,
    /// 줄 단위 병렬 매칭 여부
    pub parallel: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            mode: SearchMode::default(),
            scan: None,
            pos_filter: PosFilter::default(),
            untagged: UntaggedPolicy::default(),
            span: DEFAULT_SPAN,
            sort: None,
            parallel: false,
        }
    }
}

impl SearchOptions {
    /// 기본 옵션 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 검색 방식 설정
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// 자소 패턴 적용 위치 설정
    pub fn with_scan(mut self, scan: Option<ScanMode>) -> Self {
        self.scan = scan;
        self
    }

    /// 품사 필터 설정
    pub fn with_pos_filter(mut self, pos_filter: PosFilter) -> Self {
        self.pos_filter = pos_filter;
        self
    }

    /// 태그 없는 토큰 처리 방식 설정
    pub fn with_untagged(mut self, untagged: UntaggedPolicy) -> Self {
        self.untagged = untagged;
        self
    }

    /// 좌우 문맥 크기 설정
    pub fn with_span(mut self, span: usize) -> Self {
        self.span = span;
        self
    }

    /// 정렬 기준 설정
    pub fn with_sort(mut self, sort: Option<(Position, SortMode)>) -> Self {
        self.sort = sort;
        self
    }

    /// 병렬 매칭 설정
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// 옵션 조합 검사
    pub fn validate(&self) -> Result<()> {
        if self.span == 0 {
            return Err(KwicError::InvalidSpan { span: self.span });
        }
        if let Some((position, _)) = self.sort {
            position.validate(self.span)?;
        }
        Ok(())
    }
}

/// 검색 결과 한 건
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hit {
    /// 출처 파일 (`ResultSet::locate` 이후에만 채워짐)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    /// 줄 번호 (1부터)
    pub line: usize,
    /// 줄 안에서 일치한 토큰의 인덱스 (0부터)
    pub index: usize,
    /// KWIC 행
    #[serde(flatten)]
    pub row: Row,
}

impl AsRef<Row> for Hit {
    fn as_ref(&self) -> &Row {
        &self.row
    }
}

/// 한 번의 검색 결과
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    pub hits: Vec<Hit>,
}

impl ResultSet {
    /// 총 일치 건수
    pub fn total(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// KWIC 행 순회
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.hits.iter().map(|h| &h.row)
    }

    /// 다른 기준으로 재정렬한 새 결과
    pub fn sorted(&self, position: Position, mode: SortMode) -> Result<ResultSet> {
        Ok(ResultSet {
            hits: sort::sort_rows(&self.hits, position, mode)?,
        })
    }

    /// 이어 붙인 줄 번호를 출처 파일과 파일 안 줄 번호로 바꿈
    pub fn locate(&mut self, sources: &SourceMap) {
        for hit in &mut self.hits {
            if let Some((path, line)) = sources.locate(hit.line) {
                hit.source = Some(path.to_path_buf());
                hit.line = line;
            }
        }
    }

    /// 선택한 위치의 빈도표
    pub fn frequencies(&self, position: Position) -> Result<Vec<(String, usize)>> {
        sort::frequencies(&self.hits, position)
    }
}

/// KWIC 검색
///
/// # Arguments
/// * `lines` - 입력 줄 (`형태/품사` 토큰이 공백으로 구분됨)
/// * `query` - 검색어
/// * `options` - 검색 옵션
///
/// # Returns
/// 정렬까지 끝난 `ResultSet` 또는 검색어/옵션 에러
///
/// # Examples
/// ```
/// use jkwic::search::{search, SearchOptions};
///
/// let lines = ["최고/NNG 의/JKG 작품/NNG 이/JKS 다/EF"];
/// let result = search(&lines, "작품", &SearchOptions::new()).unwrap();
/// assert_eq!(result.total(), 1);
/// assert_eq!(result.hits[0].row.center(), "작품/NNG");
/// ```
pub fn search<I, S>(lines: I, query: &str, options: &SearchOptions) -> Result<ResultSet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str> + Sync,
{
    search_with_stats(lines, query, options, None)
}

/// 통계를 함께 수집하는 KWIC 검색
pub fn search_with_stats<I, S>(
    lines: I,
    query: &str,
    options: &SearchOptions,
    stats: Option<&Statistics>,
) -> Result<ResultSet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str> + Sync,
{
    options.validate()?;
    let matcher = Matcher::new(query, options.mode, options.scan)?;
    log::debug!(
        "검색 시작: query={:?}, mode={}, span={}, parallel={}",
        query,
        matcher.mode(),
        options.span,
        options.parallel
    );

    let lines: Vec<S> = lines.into_iter().collect();
    let scan_line = |(i, line): (usize, &S)| -> Vec<Hit> {
        let text = if i == 0 {
            strip_bom(line.as_ref())
        } else {
            line.as_ref()
        };
        let tokens = tokenize(text);
        let mut hits = Vec::new();
        let mut untagged = 0;

        for (index, raw) in tokens.iter().enumerate() {
            let token = Token::parse(raw);
            if !token.is_tagged() {
                untagged += 1;
            }
            if !matcher.matches(&token, &options.pos_filter, options.untagged) {
                continue;
            }
            if let Some(row) = window(&tokens, index, options.span) {
                hits.push(Hit {
                    source: None,
                    line: i + 1,
                    index,
                    row,
                });
            }
        }

        if let Some(stats) = stats {
            stats.add_tokens(tokens.len());
            stats.add_matches(hits.len());
            if options.untagged == UntaggedPolicy::Skip {
                stats.add_untagged(untagged);
            }
        }
        hits
    };

    // 병렬 처리해도 줄 순서대로 모은 뒤 한 번만 정렬
    let per_line: Vec<Vec<Hit>> = if options.parallel {
        lines.par_iter().enumerate().map(scan_line).collect()
    } else {
        lines.iter().enumerate().map(scan_line).collect()
    };

    if let Some(stats) = stats {
        stats.add_lines(lines.len());
    }

    let hits: Vec<Hit> = per_line.into_iter().flatten().collect();
    log::debug!("일치 {}건", hits.len());

    let hits = match options.sort {
        Some((position, mode)) => sort::sort_rows(&hits, position, mode)?,
        None => hits,
    };

    Ok(ResultSet { hits })
}
