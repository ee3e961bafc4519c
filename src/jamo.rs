//! 한글 자모 분해/조합 모듈
//!
//! 완성형 한글 음절(U+AC00..=U+D7A3)을 초성/중성/종성으로 분해하고,
//! 호환용 자모(ㄱ, ㅏ 등 키보드로 입력하는 자모)를 조합형 자모로 정규화합니다.
//!
//! 분해 결과의 자모는 모두 조합형(conjoining) 자모입니다.
//! - 초성: U+1100..=U+1112 (19개)
//! - 중성: U+1161..=U+1175 (21개)
//! - 종성: U+11A8..=U+11C2 (27개, 인덱스 0은 종성 없음)

/// 한글 음절 시작 코드포인트 (가)
const SYLLABLE_BASE: u32 = 0xAC00;
/// 한글 음절 마지막 코드포인트 (힣)
const SYLLABLE_LAST: u32 = 0xD7A3;

/// 초성 개수
pub const LEAD_COUNT: u32 = 19;
/// 중성 개수
pub const VOWEL_COUNT: u32 = 21;
/// 종성 개수 (종성 없음 포함)
pub const TRAIL_COUNT: u32 = 28;

const LEAD_BASE: u32 = 0x1100;
const VOWEL_BASE: u32 = 0x1161;
/// 종성 인덱스 1에 해당하는 코드포인트 (인덱스 0은 종성 없음)
const TRAIL_BASE: u32 = 0x11A7;

const COMPAT_VOWEL_FIRST: u32 = 0x314F; // ㅏ
const COMPAT_VOWEL_LAST: u32 = 0x3163; // ㅣ

/// 초성 순서의 호환용 자음
#[rustfmt::skip]
const LEAD_COMPAT: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ',
    'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// 종성 순서(인덱스 1..=27)의 호환용 자음
#[rustfmt::skip]
const TRAIL_COMPAT: [char; 27] = [
    'ㄱ', 'ㄲ', 'ㄳ', 'ㄴ', 'ㄵ', 'ㄶ', 'ㄷ', 'ㄹ', 'ㄺ', 'ㄻ',
    'ㄼ', 'ㄽ', 'ㄾ', 'ㄿ', 'ㅀ', 'ㅁ', 'ㅂ', 'ㅄ', 'ㅅ', 'ㅆ',
    'ㅇ', 'ㅈ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// 음절 분해 결과
///
/// 완성형 한글이 아닌 문자는 `lead`에 원래 문자를 담고
/// `vowel`, `trail`이 모두 `None`인 형태로 표현됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syllable {
    /// 초성 (분해 불가 문자면 원래 문자)
    pub lead: char,
    /// 중성
    pub vowel: Option<char>,
    /// 종성 (없으면 None)
    pub trail: Option<char>,
}

impl Syllable {
    /// 실제 한글 음절을 분해한 결과인지 확인
    pub fn is_syllable(&self) -> bool {
        self.vowel.is_some()
    }
}

/// 완성형 한글 음절인지 확인
pub fn is_syllable(c: char) -> bool {
    (SYLLABLE_BASE..=SYLLABLE_LAST).contains(&(c as u32))
}

/// 완성형 한글을 초성/중성/종성 인덱스로 분해
/// 반환: (초성 인덱스, 중성 인덱스, 종성 인덱스)
pub fn decompose_indices(c: char) -> Option<(u32, u32, u32)> {
    if !is_syllable(c) {
        return None;
    }
    let offset = c as u32 - SYLLABLE_BASE;
    let lead = offset / (VOWEL_COUNT * TRAIL_COUNT);
    let vowel = (offset % (VOWEL_COUNT * TRAIL_COUNT)) / TRAIL_COUNT;
    let trail = offset % TRAIL_COUNT;
    Some((lead, vowel, trail))
}

/// 초성/중성/종성 인덱스로 완성된 한글 음절 생성
/// - lead: 초성 인덱스 (0~18)
/// - vowel: 중성 인덱스 (0~20)
/// - trail: 종성 인덱스 (0~27, 0 = 종성 없음)
pub fn compose(lead: u32, vowel: u32, trail: u32) -> Option<char> {
    if lead >= LEAD_COUNT || vowel >= VOWEL_COUNT || trail >= TRAIL_COUNT {
        return None;
    }
    char::from_u32(SYLLABLE_BASE + (lead * VOWEL_COUNT + vowel) * TRAIL_COUNT + trail)
}

/// 음절 하나를 조합형 자모로 분해
///
/// # Examples
/// ```
/// use jkwic::jamo::decompose;
///
/// let s = decompose('한');
/// assert_eq!(s.lead, '\u{1112}');
/// assert_eq!(s.vowel, Some('\u{1161}'));
/// assert_eq!(s.trail, Some('\u{11AB}'));
///
/// let not_hangul = decompose('a');
/// assert_eq!(not_hangul.lead, 'a');
/// assert!(!not_hangul.is_syllable());
/// ```
pub fn decompose(c: char) -> Syllable {
    match decompose_indices(c) {
        Some((lead, vowel, trail)) => Syllable {
            lead: positional(LEAD_BASE, lead).unwrap_or(c),
            vowel: positional(VOWEL_BASE, vowel),
            trail: if trail == 0 {
                None
            } else {
                positional(TRAIL_BASE, trail)
            },
        },
        None => Syllable {
            lead: c,
            vowel: None,
            trail: None,
        },
    }
}

fn positional(base: u32, index: u32) -> Option<char> {
    char::from_u32(base + index)
}

/// 호환용 자모를 조합형 초성/중성으로 정규화
///
/// 자음 19개는 초성 형태로, 모음 21개는 중성 형태로 바뀝니다.
/// 매핑이 없는 문자는 그대로 반환됩니다.
pub fn normalize(c: char) -> char {
    if let Some(index) = LEAD_COMPAT.iter().position(|&j| j == c) {
        return positional(LEAD_BASE, index as u32).unwrap_or(c);
    }
    let code = c as u32;
    if (COMPAT_VOWEL_FIRST..=COMPAT_VOWEL_LAST).contains(&code) {
        return positional(VOWEL_BASE, code - COMPAT_VOWEL_FIRST).unwrap_or(c);
    }
    c
}

/// 자음을 조합형 종성으로 정규화
///
/// 호환용 자음(겹받침 포함)과 조합형 초성을 모두 받습니다.
/// 종성이 될 수 없는 자음(ㄸ, ㅃ, ㅉ)과 그 밖의 문자는 그대로 반환됩니다.
pub fn normalize_trail(c: char) -> char {
    let code = c as u32;
    let compat = if (LEAD_BASE..LEAD_BASE + LEAD_COUNT).contains(&code) {
        LEAD_COMPAT[(code - LEAD_BASE) as usize]
    } else {
        c
    };
    match TRAIL_COMPAT.iter().position(|&j| j == compat) {
        Some(index) => positional(TRAIL_BASE, index as u32 + 1).unwrap_or(c),
        None => c,
    }
}
