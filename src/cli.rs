//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::export::ExportFormat;
use crate::matcher::{PosFilter, ScanMode, SearchMode, UntaggedPolicy};
use crate::search::{SearchOptions, DEFAULT_SPAN};
use crate::sort::{Position, SortMode};

/// 출력 형식
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq)]
pub enum OutputFormat {
    /// 컬러 KWIC 표
    #[default]
    Table,
    /// 탭 구분 텍스트
    Tsv,
    /// JSON Lines
    Jsonl,
}

impl OutputFormat {
    /// 파일 내보내기 형식 (표 형식은 없음)
    pub fn export_format(&self) -> Option<ExportFormat> {
        match self {
            OutputFormat::Table => None,
            OutputFormat::Tsv => Some(ExportFormat::Tsv),
            OutputFormat::Jsonl => Some(ExportFormat::JsonLines),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Tsv => write!(f, "tsv"),
            OutputFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

/// jkwic CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "jkwic",
    author = "YourName <your@email.com>",
    version,
    about = "자소 패턴 KWIC 검색기 - 형태소 태깅된 한국어 텍스트의 용례 검색 CLI 도구",
    long_about = r#"
자소 패턴 KWIC 검색기
=====================

`형태/품사` 토큰이 공백으로 구분된 텍스트에서 검색어와 일치하는 토큰을 찾아
좌우 문맥과 함께 고정 폭 KWIC 행으로 보여 줍니다.

검색 방식:
  • literal : 문자열 포함 (대소문자 구분)
  • regex   : 정규식
  • jamo    : 자소 패턴  접두[초성/중성/종성]접미  (* = 아무 자모)

예제:
  jkwic "최[ㄱ/*/*]" -i corpus.txt -m jamo
  jkwic "[ㅎ/*/*]다" -i ./corpus -m jamo --scan scan-all
  jkwic "하" -i corpus.txt -t "VV,NNG" --sort-by 1R --sort-mode frequency
  jkwic "^작" -i corpus.txt -m regex -f tsv -o result.tsv
"#
)]
pub struct Args {
    /// 검색어
    pub query: String,

    /// 입력 파일 또는 폴더 (없으면 표준 입력)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// 검색 방식
    #[arg(short, long, value_enum, default_value_t = SearchMode::Literal)]
    pub mode: SearchMode,

    /// 자소 패턴 적용 위치 (기본값: 접두/접미가 있으면 anchored, 없으면 scan-all)
    #[arg(long, value_enum)]
    pub scan: Option<ScanMode>,

    /// 품사 필터 (쉼표로 구분, 예: "VV,NNG")
    #[arg(short, long)]
    pub tags: Option<String>,

    /// 품사 태그가 없는 토큰도 검색 대상에 포함
    #[arg(long)]
    pub allow_untagged: bool,

    /// 좌우 문맥 토큰 수
    #[arg(short, long, default_value_t = DEFAULT_SPAN)]
    pub span: usize,

    /// 정렬 기준 위치 (3L, 2L, 1L, C, 1R, 2R, 3R)
    #[arg(long)]
    pub sort_by: Option<Position>,

    /// 정렬 방식
    #[arg(long, value_enum, default_value_t = SortMode::Alphabetic)]
    pub sort_mode: SortMode,

    /// 출력 형식
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// 결과 파일 경로 (없으면 화면 출력)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 화면에 보여 줄 최대 건수 (총 건수는 항상 표시)
    #[arg(long)]
    pub limit: Option<usize>,

    /// 정렬 기준 위치의 빈도표 출력
    #[arg(long)]
    pub freq: bool,

    /// 입력 폴더의 파일 이름 패턴 필터 (glob 형식, 예: "news_*")
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// 최대 폴더 탐색 깊이
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// 병렬 처리 스레드 수 (지정하면 줄 단위 병렬 매칭)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// 상세 출력 모드
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 품사 필터 생성
    pub fn pos_filter(&self) -> PosFilter {
        self.tags
            .as_deref()
            .map(PosFilter::parse)
            .unwrap_or_default()
    }

    /// 정렬 기준 (위치가 없으면 입력 순서 유지)
    pub fn sort_key(&self) -> Option<(Position, SortMode)> {
        self.sort_by.map(|position| (position, self.sort_mode))
    }

    /// 빈도표 기준 위치 (정렬 위치가 없으면 가운데)
    pub fn freq_position(&self) -> Position {
        self.sort_by.unwrap_or(Position::CENTER)
    }

    /// 검색 옵션 생성
    pub fn search_options(&self) -> SearchOptions {
        let untagged = if self.allow_untagged {
            UntaggedPolicy::Match
        } else {
            UntaggedPolicy::Skip
        };

        SearchOptions::new()
            .with_mode(self.mode)
            .with_scan(self.scan)
            .with_pos_filter(self.pos_filter())
            .with_untagged(untagged)
            .with_span(self.span)
            .with_sort(self.sort_key())
            .with_parallel(self.threads.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["jkwic", "다"]).unwrap();
        assert_eq!(args.query, "다");
        assert_eq!(args.mode, SearchMode::Literal);
        assert_eq!(args.span, DEFAULT_SPAN);
        assert_eq!(args.format, OutputFormat::Table);
        assert!(args.sort_key().is_none());
        assert_eq!(args.freq_position(), Position::CENTER);
        assert!(args.pos_filter().is_empty());
    }

    #[test]
    fn test_parse_full() {
        let args = Args::try_parse_from([
            "jkwic",
            "[ㅎ/*/*]다",
            "-m",
            "jamo",
            "--scan",
            "scan-all-except-last",
            "-t",
            "VV, NNG",
            "--span",
            "10",
            "--sort-by",
            "2L",
            "--sort-mode",
            "frequency",
            "-f",
            "jsonl",
            "--allow-untagged",
        ])
        .unwrap();

        assert_eq!(args.mode, SearchMode::Jamo);
        assert_eq!(args.scan, Some(ScanMode::ScanAllExceptLast));
        assert_eq!(args.sort_key(), Some((Position(-2), SortMode::Frequency)));
        assert_eq!(args.format.export_format(), Some(ExportFormat::JsonLines));

        let options = args.search_options();
        assert_eq!(options.span, 10);
        assert_eq!(options.untagged, UntaggedPolicy::Match);
        assert!(options.pos_filter.accepts(Some("NNG")));
        assert!(!options.parallel);
    }

    #[test]
    fn test_parse_bad_position() {
        assert!(Args::try_parse_from(["jkwic", "다", "--sort-by", "X"]).is_err());
    }
}
