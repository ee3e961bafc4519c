//! 결과 내보내기 모듈
//!
//! 검색 결과를 탭 구분 텍스트 또는 JSON Lines로 씁니다.

use std::io::Write;

use crate::error::{KwicError, Result};
use crate::search::ResultSet;

/// 내보내기 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// 칸을 탭으로 연결한 한 줄
    Tsv,
    /// 결과 한 건당 JSON 객체 한 줄
    JsonLines,
}

fn write_error(e: impl std::fmt::Display) -> KwicError {
    KwicError::WriteError {
        reason: e.to_string(),
    }
}

/// 결과를 지정한 형식으로 쓰기
///
/// # Returns
/// 쓴 건수
pub fn export<W: Write>(result: &ResultSet, format: ExportFormat, writer: &mut W) -> Result<usize> {
    for hit in &result.hits {
        let line = match format {
            ExportFormat::Tsv => hit.row.to_tsv(),
            ExportFormat::JsonLines => serde_json::to_string(hit).map_err(write_error)?,
        };
        writeln!(writer, "{}", line).map_err(write_error)?;
    }
    writer.flush().map_err(write_error)?;
    Ok(result.total())
}
