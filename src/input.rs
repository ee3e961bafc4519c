//! 입력 텍스트 읽기 모듈
//!
//! 검색할 텍스트 파일을 찾고 줄 단위로 읽어 들입니다.
//! 첫 줄의 UTF-8 BOM은 제거하며, 대용량 파일은 메모리 매핑으로 읽습니다.

use glob::Pattern;
use memmap2::Mmap;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{KwicError, Result};
use crate::token::strip_bom;

/// 입력 파일 확장자
pub const TEXT_EXTENSION: &str = "txt";

/// 파일 이름 글로브 필터
#[derive(Default)]
pub struct FileFilter {
    pattern: Option<Pattern>,
}

impl FileFilter {
    /// 새 파일 필터 생성 (패턴이 없으면 모든 파일 통과)
    ///
    /// # Examples
    /// ```
    /// use jkwic::input::FileFilter;
    ///
    /// let filter = FileFilter::new(Some("news_*")).unwrap();
    /// assert!(filter.matches("news_2024.txt"));
    /// assert!(!filter.matches("blog_2024.txt"));
    /// ```
    pub fn new(pattern: Option<&str>) -> std::result::Result<Self, glob::PatternError> {
        Ok(Self {
            pattern: pattern.map(Pattern::new).transpose()?,
        })
    }

    /// 파일 이름이 패턴과 일치하는지 확인
    pub fn matches(&self, file_name: &str) -> bool {
        self.pattern.as_ref().map_or(true, |p| p.matches(file_name))
    }
}

/// 읽기 옵션
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// 대용량 파일 임계값 (이상이면 메모리 매핑 사용)
    pub mmap_threshold: u64,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            mmap_threshold: 10 * 1024 * 1024, // 10MB
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

/// 읽어 들인 입력 파일
#[derive(Debug)]
pub struct Document {
    /// 파일 경로
    pub path: PathBuf,
    /// 줄 목록 (BOM 제거됨)
    pub lines: Vec<String>,
    /// 파일 크기
    pub size: u64,
}

/// 여러 파일을 이어 붙인 줄 목록에서 각 줄의 출처를 찾는 색인
#[derive(Debug, Default, Clone)]
pub struct SourceMap {
    /// (파일 경로, 이어 붙인 목록에서 그 파일 첫 줄의 0부터 세는 위치)
    starts: Vec<(PathBuf, usize)>,
    total: usize,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 다음 파일 등록
    pub fn push(&mut self, path: &Path, line_count: usize) {
        self.starts.push((path.to_path_buf(), self.total));
        self.total += line_count;
    }

    /// 이어 붙인 목록의 줄 번호(1부터)를 (파일, 파일 안 줄 번호)로 변환
    ///
    /// # Examples
    /// ```
    /// use std::path::Path;
    /// use jkwic::input::SourceMap;
    ///
    /// let mut sources = SourceMap::new();
    /// sources.push(Path::new("a.txt"), 2);
    /// sources.push(Path::new("b.txt"), 3);
    ///
    /// assert_eq!(sources.locate(2), Some((Path::new("a.txt"), 2)));
    /// assert_eq!(sources.locate(3), Some((Path::new("b.txt"), 1)));
    /// assert_eq!(sources.locate(6), None);
    /// ```
    pub fn locate(&self, line: usize) -> Option<(&Path, usize)> {
        if line == 0 || line > self.total {
            return None;
        }
        let index = line - 1;
        // 빈 파일은 시작 위치가 다음 파일과 같으므로 마지막 후보를 고름
        let slot = self.starts.partition_point(|(_, start)| *start <= index);
        let (path, start) = self.starts.get(slot.checked_sub(1)?)?;
        Some((path.as_path(), index - start + 1))
    }
}

/// 검색할 텍스트 파일 수집
///
/// 파일 경로가 주어지면 그 파일만, 폴더가 주어지면 하위의 `.txt` 파일을
/// 경로 순으로 모읍니다.
pub fn collect_text_files(
    root: &Path,
    filter: &FileFilter,
    max_depth: Option<usize>,
) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(KwicError::InputNotFound {
            path: root.to_path_buf(),
        });
    }
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let walker = match max_depth {
        Some(depth) => WalkDir::new(root).max_depth(depth),
        None => WalkDir::new(root),
    };

    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|s| s.to_str())
                .map(|s| s.eq_ignore_ascii_case(TEXT_EXTENSION))
                .unwrap_or(false)
        })
        .filter(|e| {
            e.path()
                .file_name()
                .and_then(|s| s.to_str())
                .map(|s| filter.matches(s))
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    log::debug!("입력 파일 {}개 발견: {:?}", files.len(), root);
    Ok(files)
}

/// 파일 하나를 줄 단위로 읽기
pub fn read_document(path: &Path, options: &ReadOptions) -> Result<Document> {
    let open_error = |e: std::io::Error| KwicError::FileOpenError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    };

    let size = fs::metadata(path).map_err(open_error)?.len();
    let lines = if size >= options.mmap_threshold {
        // 대용량 파일: 메모리 매핑 사용
        let file = File::open(path).map_err(open_error)?;
        let mmap = unsafe { Mmap::map(&file).map_err(open_error)? };
        decode_lines(&mmap, path)?
    } else {
        let bytes = fs::read(path).map_err(open_error)?;
        decode_lines(&bytes, path)?
    };

    Ok(Document {
        path: path.to_path_buf(),
        lines,
        size,
    })
}

/// 임의의 리더(표준 입력 등)에서 줄 단위로 읽기
pub fn read_lines_from<R: Read>(mut reader: R, name: &Path) -> Result<Document> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| KwicError::FileOpenError {
            file: name.to_path_buf(),
            reason: e.to_string(),
        })?;

    Ok(Document {
        path: name.to_path_buf(),
        lines: decode_lines(&bytes, name)?,
        size: bytes.len() as u64,
    })
}

/// UTF-8 디코딩 후 줄 분리 (첫 줄 BOM 제거)
fn decode_lines(bytes: &[u8], path: &Path) -> Result<Vec<String>> {
    let text = std::str::from_utf8(bytes).map_err(|e| KwicError::InvalidEncoding {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(strip_bom(text).lines().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_file_filter() {
        let filter = FileFilter::new(Some("corpus_?.txt")).unwrap();
        assert!(filter.matches("corpus_1.txt"));
        assert!(!filter.matches("corpus_12.txt"));

        let none = FileFilter::new(None).unwrap();
        assert!(none.matches("anything.txt"));

        assert!(FileFilter::new(Some("[invalid")).is_err());
    }

    #[test]
    fn test_source_map_locate() {
        let mut sources = SourceMap::new();
        sources.push(Path::new("a.txt"), 2);
        sources.push(Path::new("empty.txt"), 0);
        sources.push(Path::new("b.txt"), 1);

        assert_eq!(sources.locate(0), None);
        assert_eq!(sources.locate(1), Some((Path::new("a.txt"), 1)));
        assert_eq!(sources.locate(2), Some((Path::new("a.txt"), 2)));
        assert_eq!(sources.locate(3), Some((Path::new("b.txt"), 1)));
        assert_eq!(sources.locate(4), None);

        assert_eq!(SourceMap::new().locate(1), None);
    }

    #[test]
    fn test_read_document_strips_bom() {
        let dir = TempDir::new().unwrap();
        let path = write(
            dir.path(),
            "a.txt",
            "\u{FEFF}최고/NNG 의/JKG\r\n작품/NNG\n".as_bytes(),
        );

        let doc = read_document(&path, &ReadOptions::new()).unwrap();
        assert_eq!(doc.lines, vec!["최고/NNG 의/JKG", "작품/NNG"]);
        assert!(doc.size > 0);
    }

    #[test]
    fn test_read_document_mmap() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "big.txt", "하다/VV\n다른/MAG\n".as_bytes());

        let options = ReadOptions { mmap_threshold: 1 };
        let doc = read_document(&path, &options).unwrap();
        assert_eq!(doc.lines.len(), 2);
    }

    #[test]
    fn test_read_document_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "bad.txt", &[0xff, 0xfe, 0x00]);

        let err = read_document(&path, &ReadOptions::new()).unwrap_err();
        assert!(matches!(err, KwicError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_read_lines_from_reader() {
        let input = "가/NNG\n나/NNG";
        let doc = read_lines_from(input.as_bytes(), Path::new("<stdin>")).unwrap();
        assert_eq!(doc.lines, vec!["가/NNG", "나/NNG"]);
        assert_eq!(doc.size, input.len() as u64);
    }

    #[test]
    fn test_collect_text_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.txt", b"");
        write(dir.path(), "a.txt", b"");
        write(dir.path(), "c.json", b"");
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        write(&sub, "d.TXT", b"");

        let files = collect_text_files(dir.path(), &FileFilter::default(), None).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files[0].ends_with("a.txt"));

        let shallow = collect_text_files(dir.path(), &FileFilter::default(), Some(1)).unwrap();
        assert_eq!(shallow.len(), 2);
    }

    #[test]
    fn test_collect_single_file_and_missing() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "only.md", b"");
        let files = collect_text_files(&path, &FileFilter::default(), None).unwrap();
        assert_eq!(files, vec![path]);

        let missing = collect_text_files(&dir.path().join("nope"), &FileFilter::default(), None);
        assert!(matches!(missing, Err(KwicError::InputNotFound { .. })));
    }
}
