//! jkwic - 자소 패턴 KWIC 검색기
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use jkwic::{
    cli::{Args, OutputFormat},
    export::{export, ExportFormat},
    input::{
        collect_text_files, read_document, read_lines_from, FileFilter, ReadOptions, SourceMap,
    },
    search::{search_with_stats, Hit, ResultSet},
    stats::Statistics,
    window::Row,
};

fn main() -> Result<()> {
    let args = Args::parse();

    // 로깅 초기화 (기본 warn, -v면 debug)
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    // 스레드 풀 설정
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("스레드 풀 초기화 실패")?;
    }

    // 표준 출력으로 TSV/JSONL을 내보낼 때는 장식 출력을 하지 않음
    let decorated = args.format == OutputFormat::Table || args.output.is_some();

    if decorated {
        print_header(&args);
    }

    // 입력 읽기
    let (lines, sources, stats) = load_lines(&args, decorated)?;

    // 검색
    let options = args.search_options();
    let mut result = search_with_stats(&lines, &args.query, &options, Some(&stats))
        .with_context(|| format!("검색 실패: {}", args.query))?;
    result.locate(&sources);

    // 결과 출력
    match (&args.output, args.format.export_format()) {
        (Some(path), format) => write_output(path, &result, format.unwrap_or(ExportFormat::Tsv))?,
        (None, Some(format)) => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            export(&result, format, &mut writer)?;
        }
        (None, None) => print_table(&result, args.limit),
    }

    if args.freq {
        print_frequencies(&args, &result)?;
    }

    if decorated {
        stats.print_summary();
        println!(
            "\n{} 총 {}건 결과\n",
            "✅".bright_green(),
            result.total().to_string().bright_green()
        );
    }

    Ok(())
}

/// 헤더 출력
fn print_header(args: &Args) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!("{}", " 🔍 자소 패턴 KWIC 검색기".bright_white().bold());
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} 검색어: {}", "🔤".bright_cyan(), args.query);
    println!("  {} 검색 방식: {}", "⚙️".bright_yellow(), args.mode);

    if let Some(scan) = args.scan {
        println!("  {} 적용 위치: {}", "📍".bright_yellow(), scan);
    }

    match args.input {
        Some(ref input) => println!("  {} 입력: {:?}", "📂".bright_cyan(), input),
        None => println!("  {} 입력: 표준 입력", "📂".bright_cyan()),
    }

    if let Some(ref tags) = args.tags {
        println!("  {} 품사 필터: {}", "🎯".bright_magenta(), tags);
    }

    println!("  {} 문맥 크기: ±{}", "📏".bright_white(), args.span);

    if let Some((position, mode)) = args.sort_key() {
        println!("  {} 정렬: {} ({})", "🔃".bright_white(), position, mode);
    }

    if let Some(ref output) = args.output {
        println!("  {} 출력 파일: {:?} ({})", "📄".bright_green(), output, args.format);
    }

    println!("{}", "═".repeat(50).bright_blue());
}

/// 입력 줄 읽기 (파일/폴더 또는 표준 입력)
fn load_lines(args: &Args, decorated: bool) -> Result<(Vec<String>, SourceMap, Statistics)> {
    let mut sources = SourceMap::new();

    let input = match args.input {
        Some(ref input) => input,
        None => {
            let document = read_lines_from(io::stdin().lock(), Path::new("<stdin>"))?;
            let stats = Statistics::new(1);
            stats.add_bytes_read(document.size);
            return Ok((document.lines, sources, stats));
        }
    };

    let filter = FileFilter::new(args.pattern.as_deref())
        .map_err(|e| anyhow::anyhow!("유효하지 않은 파일 패턴: {}", e))?;
    let files = collect_text_files(input, &filter, args.max_depth)?;
    if files.is_empty() {
        return Err(jkwic::KwicError::NoFilesFound.into());
    }

    let stats = Statistics::new(files.len());
    let options = ReadOptions::new();
    let pb = if decorated {
        create_progress_bar(files.len())
    } else {
        ProgressBar::hidden()
    };

    let mut lines = Vec::new();
    for path in &files {
        let document = read_document(path, &options)?;
        log::debug!("{:?}: {}줄", document.path, document.lines.len());
        stats.add_bytes_read(document.size);
        sources.push(&document.path, document.lines.len());
        lines.extend(document.lines);
        pb.inc(1);
    }
    pb.finish_with_message("완료!");

    Ok((lines, sources, stats))
}

/// 결과 파일 쓰기
fn write_output(path: &PathBuf, result: &ResultSet, format: ExportFormat) -> Result<()> {
    let file = File::create(path).with_context(|| format!("출력 파일 생성 실패: {:?}", path))?;
    let mut writer = BufWriter::new(file);
    let count = export(result, format, &mut writer)?;
    println!("\n{} {}건 저장: {:?}", "💾".bright_cyan(), count, path);
    Ok(())
}

/// 진행률 바 생성
fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb
}

/// 가운데 기준 상대 위치별 색상
fn style_cell(cell: &str, offset: isize) -> ColoredString {
    match offset.unsigned_abs() {
        0 => cell.blue().bold(),
        1 => cell.red(),
        2 => cell.green(),
        3 => cell.purple(),
        _ => cell.normal(),
    }
}

/// 한 행을 컬러 KWIC 줄로 변환
fn render_row(row: &Row) -> String {
    let span = row.span as isize;
    row.cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| !cell.is_empty())
        .map(|(i, cell)| style_cell(cell, i as isize - span).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 결과 위치 표시 (`파일이름:줄` 또는 줄 번호만)
fn location(hit: &Hit) -> String {
    match hit.source.as_deref().and_then(Path::file_name) {
        Some(name) => format!("{}:{}", name.to_string_lossy(), hit.line),
        None => hit.line.to_string(),
    }
}

/// KWIC 표 출력
fn print_table(result: &ResultSet, limit: Option<usize>) {
    println!();
    let shown = limit.unwrap_or(result.total()).min(result.total());
    for hit in result.hits.iter().take(shown) {
        println!("  {:>12} │ {}", location(hit).dimmed(), render_row(&hit.row));
    }

    if shown < result.total() {
        println!(
            "\n{} {}건 중 {}건만 표시했습니다.",
            "ℹ️".bright_blue(),
            result.total(),
            shown
        );
    }
}

/// 빈도표 출력
fn print_frequencies(args: &Args, result: &ResultSet) -> Result<()> {
    let position = args.freq_position();
    let table = result.frequencies(position)?;

    println!("\n{}", format!("📈 {} 위치 빈도", position).bright_cyan());
    for (value, count) in table.iter().take(args.limit.unwrap_or(table.len())) {
        let label = if value.is_empty() { "(없음)" } else { value.as_str() };
        println!("  {:>6}  {}", count.to_string().bright_green(), label);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jkwic::window::window;

    #[test]
    fn test_render_row_skips_empty_cells() {
        colored::control::set_override(false);
        let row = window(&["가/NNG", "나/JX"], 0, 2).unwrap();
        assert_eq!(render_row(&row), "가/NNG 나/JX");
    }

    #[test]
    fn test_location_shows_file_name() {
        let row = window(&["가/NNG"], 0, 1).unwrap();
        let mut hit = Hit {
            source: None,
            line: 7,
            index: 0,
            row,
        };
        assert_eq!(location(&hit), "7");

        hit.source = Some(PathBuf::from("corpus").join("news_1.txt"));
        assert_eq!(location(&hit), "news_1.txt:7");
    }

    #[test]
    fn test_style_cell_plain_beyond_three() {
        colored::control::set_override(false);
        assert_eq!(style_cell("x", 5).to_string(), "x");
        assert_eq!(style_cell("x", -1).to_string(), "x");
    }
}
