//! 통계 및 유틸리티 모듈
//!
//! 검색 통계 수집 및 포맷팅을 담당합니다.
//! 줄 단위 병렬 매칭에서도 함께 쓸 수 있도록 카운터는 원자적 타입입니다.

use colored::Colorize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// 검색 통계 구조체
#[derive(Debug, Default)]
pub struct Statistics {
    /// 입력 파일 수
    pub total_files: usize,
    /// 읽은 줄 수
    pub lines_read: AtomicUsize,
    /// 검사한 토큰 수
    pub tokens_scanned: AtomicUsize,
    /// 태그가 없어 건너뛴 토큰 수
    pub untagged_skipped: AtomicUsize,
    /// 일치 건수
    pub match_count: AtomicUsize,
    /// 읽은 총 바이트
    pub total_bytes_read: AtomicU64,
    /// 검색 시작 시간
    start_time: Option<Instant>,
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// 읽은 줄 수 증가
    pub fn add_lines(&self, count: usize) {
        self.lines_read.fetch_add(count, Ordering::Relaxed);
    }

    /// 검사한 토큰 수 증가
    pub fn add_tokens(&self, count: usize) {
        self.tokens_scanned.fetch_add(count, Ordering::Relaxed);
    }

    /// 건너뛴 토큰 수 증가
    pub fn add_untagged(&self, count: usize) {
        self.untagged_skipped.fetch_add(count, Ordering::Relaxed);
    }

    /// 일치 건수 증가
    pub fn add_matches(&self, count: usize) {
        self.match_count.fetch_add(count, Ordering::Relaxed);
    }

    /// 읽은 바이트 추가
    pub fn add_bytes_read(&self, bytes: u64) {
        self.total_bytes_read.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn get_lines_read(&self) -> usize {
        self.lines_read.load(Ordering::Relaxed)
    }

    pub fn get_tokens_scanned(&self) -> usize {
        self.tokens_scanned.load(Ordering::Relaxed)
    }

    pub fn get_untagged_skipped(&self) -> usize {
        self.untagged_skipped.load(Ordering::Relaxed)
    }

    pub fn get_match_count(&self) -> usize {
        self.match_count.load(Ordering::Relaxed)
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// 검색 통계 요약 출력
    pub fn print_summary(&self) {
        let matches = self.get_match_count();
        let skipped = self.get_untagged_skipped();
        let bytes_read = self.total_bytes_read.load(Ordering::Relaxed);

        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 📊 검색 통계".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!(
            "  {} 입력 파일:    {}",
            "📁".bright_cyan(),
            self.total_files
        );
        println!(
            "  {} 입력 용량:    {}",
            "📥".bright_yellow(),
            format_bytes(bytes_read)
        );
        println!(
            "  {} 줄 수:        {}",
            "📄".bright_white(),
            self.get_lines_read()
        );
        println!(
            "  {} 토큰 수:      {}",
            "🔤".bright_white(),
            self.get_tokens_scanned()
        );

        if skipped > 0 {
            println!(
                "  {} 태그 없음:    {}",
                "⚠️".bright_yellow(),
                skipped.to_string().yellow()
            );
        }

        println!(
            "  {} 일치:         {}",
            "✅".bright_green(),
            matches.to_string().green()
        );
        println!(
            "  {} 검색 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(self.elapsed())
        );

        println!("{}", "═".repeat(50).bright_blue());
    }
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Examples
/// ```
/// use jkwic::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];

    let mut value = bytes as f64;
    let mut unit = None;
    for next in UNITS {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = Some(next);
    }

    match unit {
        Some(unit) => format!("{:.2} {}", value, unit),
        None => format!("{} B", bytes),
    }
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 3600 {
        format!("{}시간 {}분", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}분 {}초", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}.{:03}초", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}
