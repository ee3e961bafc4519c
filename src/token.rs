//! 토큰 분리 모듈
//!
//! 형태소 분석기가 만든 `형태/품사` 토큰을 다룹니다.
//! 형태 안에 `/`가 들어갈 수 있으므로 가장 오른쪽 `/`에서 나눕니다.

/// 태그 구분자
pub const TAG_DELIMITER: char = '/';

/// UTF-8 BOM
const BOM: char = '\u{FEFF}';

/// `형태/품사` 토큰
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// 원본 토큰 문자열
    pub raw: &'a str,
    /// 표층형
    pub form: &'a str,
    /// 품사 태그 (구분자가 없으면 None)
    pub tag: Option<&'a str>,
}

impl<'a> Token<'a> {
    /// 원본 토큰을 형태와 품사로 분리
    ///
    /// # Examples
    /// ```
    /// use jkwic::token::Token;
    ///
    /// let t = Token::parse("하다/VV");
    /// assert_eq!(t.form, "하다");
    /// assert_eq!(t.tag, Some("VV"));
    ///
    /// let slash = Token::parse("//SP");
    /// assert_eq!(slash.form, "/");
    /// ```
    pub fn parse(raw: &'a str) -> Self {
        match raw.rsplit_once(TAG_DELIMITER) {
            Some((form, tag)) => Self {
                raw,
                form,
                tag: Some(tag),
            },
            None => Self {
                raw,
                form: raw,
                tag: None,
            },
        }
    }

    /// 품사 태그가 붙어 있는지 확인
    pub fn is_tagged(&self) -> bool {
        self.tag.is_some()
    }
}

/// 한 줄을 공백 기준으로 토큰화
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// 줄 앞의 BOM 제거
pub fn strip_bom(line: &str) -> &str {
    line.strip_prefix(BOM).unwrap_or(line)
}
