//! jkwic - 자소 패턴 KWIC 검색기
//!
//! 형태소 태깅된 한국어 텍스트(`형태/품사` 토큰)에서 검색어와 일치하는 토큰을 찾아
//! 좌우 문맥과 함께 고정 폭 KWIC(Keyword-In-Context) 행으로 돌려주는 라이브러리 및 CLI 도구입니다.
//!
//! # 주요 기능
//!
//! - 🔤 **자소 패턴 검색**: `최[ㅈ/*/*]`, `[ㅎ/*/*]다`처럼 초성/중성/종성 단위로 검색
//! - 🔍 **세 가지 검색 방식**: 문자열 포함, 정규식, 자소 패턴
//! - 🎯 **품사 필터**: 지정한 품사의 토큰만 검색
//! - 📏 **고정 폭 KWIC 행**: 좌우 문맥 크기 설정 (예: ±3 → 7칸, ±10 → 21칸)
//! - 🔃 **정렬/집계**: 특정 위치 값의 가나다순 또는 빈도순 정렬, 빈도표
//! - 🚀 **병렬 매칭**: Rayon 줄 단위 병렬 처리 (결과 순서는 순차 처리와 동일)
//! - 📝 **내보내기**: 탭 구분 텍스트, JSON Lines
//!
//! # 예제
//!
//! ```
//! use jkwic::{search, Position, SearchMode, SearchOptions, SortMode};
//!
//! let lines = ["최고/NNG 의/JKG 작품/NNG 이/JKS 다/EF"];
//! let options = SearchOptions::new()
//!     .with_mode(SearchMode::Jamo)
//!     .with_sort(Some((Position::CENTER, SortMode::Alphabetic)));
//!
//! let result = search(&lines, "최[ㄱ/*/*]", &options).unwrap();
//! assert_eq!(result.total(), 1);
//! assert_eq!(result.hits[0].row.center(), "최고/NNG");
//! ```

pub mod cli;
pub mod error;
pub mod export;
pub mod input;
pub mod jamo;
pub mod matcher;
pub mod pattern;
pub mod search;
pub mod sort;
pub mod stats;
pub mod token;
pub mod window;

// Re-exports for convenient access
pub use error::{KwicError, Result};
pub use matcher::{matches, Matcher, PosFilter, ScanMode, SearchMode, UntaggedPolicy};
pub use pattern::{parse as parse_pattern, JamoPattern, Slot};
pub use search::{search, search_with_stats, Hit, ResultSet, SearchOptions};
pub use sort::{frequencies, sort_rows, Position, SortMode};
pub use stats::{format_bytes, Statistics};
pub use token::Token;
pub use window::{window, Row};
