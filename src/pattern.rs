//! 자소 패턴 파싱 모듈
//!
//! `최[ㅈ/*/*]`, `[ㅎ/*/*]다`, `[ㄱ/ㅏ/*]` 형식의 자소 패턴을 해석합니다.
//! 대괄호 안은 `초성/중성/종성` 세 칸이며, 각 칸은 `*`(아무 자모) 또는 자모 하나입니다.
//! 대괄호 앞뒤의 문자열은 단어 안에서 패턴 위치를 고정하는 접두/접미 문자열입니다.

use std::fmt;

use crate::error::{KwicError, Result};
use crate::jamo::{self, normalize, normalize_trail};

/// 와일드카드 기호
pub const WILDCARD: &str = "*";

/// 패턴의 한 칸
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// 아무 자모나 허용 (종성 칸이면 종성 없음도 허용)
    Any,
    /// 특정 조합형 자모
    Jamo(char),
}

impl Slot {
    /// 분해된 자모가 이 칸을 만족하는지 확인
    pub fn accepts(&self, value: Option<char>) -> bool {
        match self {
            Slot::Any => true,
            Slot::Jamo(j) => value == Some(*j),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Any => write!(f, "{}", WILDCARD),
            Slot::Jamo(j) => write!(f, "{}", j),
        }
    }
}

/// 파싱된 자소 패턴
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JamoPattern {
    /// 대상 음절 앞의 문자열
    pub prefix: String,
    /// 초성 칸
    pub lead: Slot,
    /// 중성 칸
    pub vowel: Slot,
    /// 종성 칸
    pub trail: Slot,
    /// 대상 음절 뒤의 문자열
    pub suffix: String,
}

impl JamoPattern {
    /// 접두/접미 문자열 없이 대괄호만 있는 패턴인지 확인
    pub fn is_bare(&self) -> bool {
        self.prefix.is_empty() && self.suffix.is_empty()
    }

    /// 음절 하나가 세 칸을 모두 만족하는지 확인
    ///
    /// 완성형 한글이 아닌 문자는 항상 불일치입니다.
    pub fn matches_syllable(&self, c: char) -> bool {
        let s = jamo::decompose(c);
        s.is_syllable()
            && self.lead.accepts(Some(s.lead))
            && self.vowel.accepts(s.vowel)
            && self.trail.accepts(s.trail)
    }
}

impl fmt::Display for JamoPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}/{}/{}]{}",
            self.prefix, self.lead, self.vowel, self.trail, self.suffix
        )
    }
}

/// 자소 패턴 문자열 파싱
///
/// # Arguments
/// * `query` - `접두[초성/중성/종성]접미` 형식의 패턴
///
/// # Returns
/// 정규화된 `JamoPattern` 또는 `KwicError::MalformedPattern`
///
/// # Examples
/// ```
/// use jkwic::pattern::{parse, Slot};
///
/// let p = parse("최[ㅈ/*/*]").unwrap();
/// assert_eq!(p.prefix, "최");
/// assert_eq!(p.lead, Slot::Jamo('\u{110C}'));
/// assert_eq!(p.vowel, Slot::Any);
///
/// assert!(parse("최ㅈ").is_err());
/// ```
pub fn parse(query: &str) -> Result<JamoPattern> {
    let query = query.trim();

    let opens = query.matches('[').count();
    let closes = query.matches(']').count();
    if opens == 0 && closes == 0 {
        return Err(KwicError::malformed(query, "대괄호가 없습니다"));
    }
    if opens != 1 || closes != 1 {
        return Err(KwicError::malformed(
            query,
            "대괄호는 한 쌍만 사용할 수 있습니다",
        ));
    }

    // 개수를 위에서 확인했으므로 둘 다 존재
    let (open, close) = match (query.find('['), query.find(']')) {
        (Some(open), Some(close)) if open < close => (open, close),
        _ => return Err(KwicError::malformed(query, "대괄호 짝이 맞지 않습니다")),
    };

    let prefix = &query[..open];
    let inner = &query[open + 1..close];
    let suffix = &query[close + 1..];

    let fields: Vec<&str> = inner.split('/').collect();
    if fields.len() != 3 {
        return Err(KwicError::malformed(
            query,
            format!(
                "대괄호 안은 초성/중성/종성 세 칸이어야 합니다 (현재 {}칸)",
                fields.len()
            ),
        ));
    }

    Ok(JamoPattern {
        prefix: prefix.to_string(),
        lead: parse_slot(query, fields[0], normalize)?,
        vowel: parse_slot(query, fields[1], normalize)?,
        trail: parse_slot(query, fields[2], normalize_trail)?,
        suffix: suffix.to_string(),
    })
}

/// 한 칸 파싱: `*` 또는 자모 한 글자
fn parse_slot(query: &str, field: &str, normalizer: fn(char) -> char) -> Result<Slot> {
    let field = field.trim();
    if field == WILDCARD {
        return Ok(Slot::Any);
    }

    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Slot::Jamo(normalizer(c))),
        (None, _) => Err(KwicError::malformed(query, "비어 있는 칸이 있습니다")),
        _ => Err(KwicError::malformed(
            query,
            format!("각 칸에는 자모 하나 또는 '*'만 올 수 있습니다: '{}'", field),
        )),
    }
}
