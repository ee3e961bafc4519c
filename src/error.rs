//! 에러 타입 정의 모듈
//!
//! jkwic에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! 패턴/정규식 컴파일 에러는 검색 전체를 중단시키고,
//! 토큰 단위의 예외 상황(분해 불가 문자, 태그 없는 토큰)은 에러가 아니라 "불일치"로 처리됩니다.

use std::path::PathBuf;
use thiserror::Error;

/// 올바른 자소 패턴 예시 (에러 메시지용)
pub const PATTERN_EXAMPLE: &str = "최[ㅈ/*/*], [ㅎ/*/*]다, [ㄱ/ㅏ/*]";

/// jkwic에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum KwicError {
    /// 자소 패턴 구문 오류
    #[error("패턴 형식이 잘못되었습니다 ({pattern}): {reason}. 예: {example}")]
    MalformedPattern {
        pattern: String,
        reason: String,
        example: &'static str,
    },

    /// 정규식 컴파일 실패
    #[error("유효하지 않은 정규식 ({pattern}): {reason}")]
    InvalidRegex { pattern: String, reason: String },

    /// 빈 검색어
    #[error("검색어가 비어 있습니다")]
    EmptyQuery,

    /// 정렬 위치가 문맥 범위를 벗어남
    #[error("정렬 위치 {position}가 문맥 범위(±{span})를 벗어났습니다")]
    InvalidPosition { position: String, span: usize },

    /// 문맥 크기 오류
    #[error("문맥 크기는 1 이상이어야 합니다: {span}")]
    InvalidSpan { span: usize },

    /// 입력 경로가 존재하지 않음
    #[error("입력 경로를 찾을 수 없습니다: {path}")]
    InputNotFound { path: PathBuf },

    /// 입력 파일 열기 실패
    #[error("파일을 열 수 없습니다 ({file}): {reason}")]
    FileOpenError { file: PathBuf, reason: String },

    /// UTF-8 디코딩 실패
    #[error("UTF-8 텍스트가 아닙니다 ({file}): {reason}")]
    InvalidEncoding { file: PathBuf, reason: String },

    /// 처리할 파일 없음
    #[error("처리할 텍스트 파일이 없습니다")]
    NoFilesFound,

    /// 결과 쓰기 실패
    #[error("결과 쓰기 실패: {reason}")]
    WriteError { reason: String },
}

impl KwicError {
    /// 자소 패턴 구문 오류 생성
    pub(crate) fn malformed(pattern: &str, reason: impl Into<String>) -> Self {
        KwicError::MalformedPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
            example: PATTERN_EXAMPLE,
        }
    }
}

/// jkwic 결과 타입 별칭
pub type Result<T> = std::result::Result<T, KwicError>;
