//! 토큰 매칭 모듈
//!
//! 토큰 하나가 검색어와 일치하는지 판정합니다.
//! 검색 방식은 문자열 포함(literal), 정규식(regex), 자소 패턴(jamo) 세 가지이며
//! 품사 필터와 태그 없는 토큰 처리 방식을 함께 적용합니다.

use clap::ValueEnum;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;

use crate::error::{KwicError, Result};
use crate::pattern::{self, JamoPattern};
use crate::token::Token;

/// 검색 방식
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// 문자열 포함 (대소문자 구분)
    #[default]
    Literal,
    /// 정규식 검색
    Regex,
    /// 자소 패턴 검색
    Jamo,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Literal => write!(f, "literal"),
            SearchMode::Regex => write!(f, "regex"),
            SearchMode::Jamo => write!(f, "jamo"),
        }
    }
}

/// 자소 패턴을 단어의 어느 음절에 적용할지
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ScanMode {
    /// 접두 문자열 바로 다음 음절만 검사 (접미 문자열은 단어 끝에 고정)
    Anchored,
    /// 단어 안의 모든 음절 검사
    ScanAll,
    /// 마지막 음절을 제외한 모든 음절 검사 (이전 출력과의 호환용)
    ScanAllExceptLast,
}

impl ScanMode {
    /// 설정이 없을 때의 기본값: 접두/접미가 있으면 고정, 없으면 전체 검사
    pub fn default_for(pattern: &JamoPattern) -> Self {
        if pattern.is_bare() {
            ScanMode::ScanAll
        } else {
            ScanMode::Anchored
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanMode::Anchored => write!(f, "anchored"),
            ScanMode::ScanAll => write!(f, "scan-all"),
            ScanMode::ScanAllExceptLast => write!(f, "scan-all-except-last"),
        }
    }
}

/// 품사 태그가 없는 토큰 처리 방식
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UntaggedPolicy {
    /// 검색 대상에서 제외
    #[default]
    Skip,
    /// 토큰 전체를 표층형으로 보고 검색 (품사 필터는 통과하지 못함)
    Match,
}

/// 품사 필터
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PosFilter {
    tags: HashSet<String>,
}

impl PosFilter {
    /// 태그 목록으로 필터 생성
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags
                .into_iter()
                .map(Into::<String>::into)
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// 쉼표로 구분된 태그 목록 파싱 (예: "VV, NNG")
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(',').map(|s| s.trim().to_string()))
    }

    /// 필터가 비어 있는지 확인 (비어 있으면 모든 토큰 허용)
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// 태그가 필터를 통과하는지 확인
    pub fn accepts(&self, tag: Option<&str>) -> bool {
        if self.is_empty() {
            return true;
        }
        tag.map(|t| self.tags.contains(t)).unwrap_or(false)
    }
}

/// 컴파일된 검색어
#[derive(Debug, Clone)]
pub enum Matcher {
    /// 문자열 포함
    Literal(String),
    /// 정규식
    Regex(Regex),
    /// 자소 패턴
    Jamo { pattern: JamoPattern, scan: ScanMode },
}

impl Matcher {
    /// 검색어 컴파일
    ///
    /// # Arguments
    /// * `query` - 검색어
    /// * `mode` - 검색 방식
    /// * `scan` - 자소 패턴 적용 위치 (None이면 패턴 형태에 따라 결정)
    ///
    /// # Returns
    /// 컴파일된 `Matcher` 또는 에러 (잘못된 자소 패턴, 잘못된 정규식, 빈 검색어)
    ///
    /// # Examples
    /// ```
    /// use jkwic::matcher::{Matcher, SearchMode};
    ///
    /// let m = Matcher::new("다", SearchMode::Literal, None).unwrap();
    /// assert!(m.matches_form("하다"));
    /// assert!(!m.matches_form("하고"));
    /// ```
    pub fn new(query: &str, mode: SearchMode, scan: Option<ScanMode>) -> Result<Self> {
        let query = query.trim();
        if query.is_empty() {
            return Err(KwicError::EmptyQuery);
        }

        let matcher = match mode {
            SearchMode::Literal => Matcher::Literal(query.to_string()),
            SearchMode::Regex => {
                let regex = Regex::new(query).map_err(|e| KwicError::InvalidRegex {
                    pattern: query.to_string(),
                    reason: e.to_string(),
                })?;
                Matcher::Regex(regex)
            }
            SearchMode::Jamo => {
                let pattern = pattern::parse(query)?;
                let scan = scan.unwrap_or_else(|| ScanMode::default_for(&pattern));
                Matcher::Jamo { pattern, scan }
            }
        };

        Ok(matcher)
    }

    /// 검색 방식 반환
    pub fn mode(&self) -> SearchMode {
        match self {
            Matcher::Literal(_) => SearchMode::Literal,
            Matcher::Regex(_) => SearchMode::Regex,
            Matcher::Jamo { .. } => SearchMode::Jamo,
        }
    }

    /// 표층형이 검색어와 일치하는지 확인
    pub fn matches_form(&self, form: &str) -> bool {
        match self {
            Matcher::Literal(needle) => form.contains(needle.as_str()),
            Matcher::Regex(regex) => regex.is_match(form),
            Matcher::Jamo { pattern, scan } => matches_jamo(pattern, *scan, form),
        }
    }

    /// 토큰이 검색 대상이고 검색어와 일치하는지 확인
    pub fn matches(&self, token: &Token<'_>, filter: &PosFilter, untagged: UntaggedPolicy) -> bool {
        if !token.is_tagged() && untagged == UntaggedPolicy::Skip {
            return false;
        }
        filter.accepts(token.tag) && self.matches_form(token.form)
    }
}

/// 자소 패턴 매칭
fn matches_jamo(pattern: &JamoPattern, scan: ScanMode, form: &str) -> bool {
    let chars: Vec<char> = form.chars().collect();
    let prefix: Vec<char> = pattern.prefix.chars().collect();
    let suffix: Vec<char> = pattern.suffix.chars().collect();

    // 접두 바로 뒤에 대상 음절이 있어야 함
    if chars.len() <= prefix.len() {
        return false;
    }

    let matches_at = |i: usize| {
        chars[..i].ends_with(&prefix)
            && chars[i + 1..].starts_with(&suffix)
            && pattern.matches_syllable(chars[i])
    };

    match scan {
        // 대상 음절이 접미의 일부여도 됨 (`[ㄷ/*/*]다`는 `다`와 일치)
        ScanMode::Anchored => {
            chars.starts_with(&prefix)
                && chars.ends_with(&suffix)
                && pattern.matches_syllable(chars[prefix.len()])
        }
        ScanMode::ScanAll => (0..chars.len()).any(matches_at),
        ScanMode::ScanAllExceptLast => (0..chars.len() - 1).any(matches_at),
    }
}

/// 원본 토큰 하나에 대한 일회성 매칭
///
/// 여러 토큰을 검사할 때는 `Matcher`를 한 번 만들어 재사용하세요.
/// 태그 없는 토큰은 검색 대상에서 제외됩니다.
pub fn matches(
    raw_token: &str,
    query: &str,
    mode: SearchMode,
    pos_filter: &PosFilter,
) -> Result<bool> {
    let matcher = Matcher::new(query, mode, None)?;
    Ok(matcher.matches(&Token::parse(raw_token), pos_filter, UntaggedPolicy::Skip))
}
