//! 통합 테스트 모듈
//!
//! jkwic의 전체 기능을 테스트합니다.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SENTENCE: &str = "최고/NNG 의/JKG 작품/NNG 이/JKS 다/EF";

/// 테스트용 텍스트 파일 생성 헬퍼
fn create_text_file(dir: &std::path::Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// 테스트용 말뭉치 디렉토리 생성
fn setup_corpus_directory() -> TempDir {
    let temp_dir = TempDir::new().unwrap();

    create_text_file(
        temp_dir.path(),
        "news_1.txt",
        "\u{FEFF}최고/NNG 의/JKG 작품/NNG 이/JKS 다/EF\n공부/NNG 하/XSV 다/EF\n",
    );
    create_text_file(
        temp_dir.path(),
        "news_2.txt",
        "하다/VV 다른/MAG 하얀/VA 작품/NNG\n",
    );
    create_text_file(temp_dir.path(), "notes.md", "하다/VV\n");

    temp_dir
}

mod scenario_tests {
    use super::*;
    use jkwic::{search, PosFilter, SearchMode, SearchOptions, UntaggedPolicy};

    #[test]
    fn test_jamo_prefix_anchored() {
        let options = SearchOptions::new().with_mode(SearchMode::Jamo);

        // 고의 초성은 ㄱ이므로 ㅈ 패턴으로는 찾지 못함
        let result = search([SENTENCE], "최[ㅈ/*/*]", &options).unwrap();
        assert_eq!(result.total(), 0);

        let result = search([SENTENCE], "최[ㄱ/*/*]", &options).unwrap();
        assert_eq!(result.total(), 1);
        assert_eq!(result.hits[0].row.center(), "최고/NNG");
    }

    #[test]
    fn test_literal_ignores_pos_without_filter() {
        let lines = ["하다/VV 다른/MAG"];
        let result = search(lines, "다", &SearchOptions::new()).unwrap();
        let centers: Vec<&str> = result.rows().map(|r| r.center()).collect();
        assert_eq!(centers, vec!["하다/VV", "다른/MAG"]);
    }

    #[test]
    fn test_pos_filter_excludes_other_tags() {
        let lines = ["하다/VV 하얀/VA 하늘/NNG 하/XSV"];
        let options = SearchOptions::new().with_pos_filter(PosFilter::parse("VV,NNG"));
        let result = search(lines, "하", &options).unwrap();
        let centers: Vec<&str> = result.rows().map(|r| r.center()).collect();
        assert_eq!(centers, vec!["하다/VV", "하늘/NNG"]);
    }

    #[test]
    fn test_jamo_non_hangul_tokens_do_not_abort() {
        let lines = ["Rust/SL 2024/SN 하다/VV ?/SF"];
        let options = SearchOptions::new().with_mode(SearchMode::Jamo);
        let result = search(lines, "[ㅎ/*/*]", &options).unwrap();
        assert_eq!(result.total(), 1);
    }

    #[test]
    fn test_jamo_suffix_may_cover_target() {
        let options = SearchOptions::new().with_mode(SearchMode::Jamo);
        let result = search(["다/EF 하다/VV"], "[ㄷ/*/*]다", &options).unwrap();
        let centers: Vec<&str> = result.rows().map(|r| r.center()).collect();
        assert_eq!(centers, vec!["다/EF"]);

        let options = options.with_untagged(UntaggedPolicy::Match);
        let result = search(["다"], "[ㄷ/*/*]다", &options).unwrap();
        assert_eq!(result.total(), 1);
    }

    #[test]
    fn test_regex_mode() {
        let lines = [SENTENCE];
        let options = SearchOptions::new().with_mode(SearchMode::Regex);
        let result = search(lines, "^(작품|최고)$", &options).unwrap();
        assert_eq!(result.total(), 2);
    }
}

mod window_tests {
    use jkwic::window;

    #[test]
    fn test_span_three_on_ten_tokens() {
        let tokens: Vec<String> = (0..10).map(|i| format!("w{}", i)).collect();
        let row = window(&tokens, 5, 3).unwrap();

        assert_eq!(row.cells.len(), 7);
        assert_eq!(row.cells[3], "w5");
        assert_eq!(row.left(), &["w2", "w3", "w4"]);
        assert_eq!(row.right(), &["w6", "w7", "w8"]);
    }

    #[test]
    fn test_span_ten_row_width() {
        let tokens = ["a", "b", "c"];
        let row = window(&tokens, 0, 10).unwrap();
        assert_eq!(row.cells.len(), 21);
        assert_eq!(row.center(), "a");
        assert_eq!(row.cell(2), Some("c"));
    }
}

mod sort_tests {
    use jkwic::{search, Position, SearchOptions, SortMode};

    fn lines() -> Vec<String> {
        vec![
            "가/NNG 를/JKO".to_string(),
            "가/NNG 는/JX".to_string(),
            "가/NNG 를/JKO".to_string(),
            "가/NNG".to_string(),
            "가/NNG 는/JX".to_string(),
            "가/NNG 를/JKO".to_string(),
        ]
    }

    #[test]
    fn test_alphabetic_non_decreasing() {
        let options =
            SearchOptions::new().with_sort(Some((Position::right(1), SortMode::Alphabetic)));
        let result = search(&lines(), "가", &options).unwrap();

        let values: Vec<&str> = result.rows().map(|r| r.cell(1).unwrap()).collect();
        assert_eq!(values[0], "");
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_frequency_groups_descending() {
        let options =
            SearchOptions::new().with_sort(Some((Position::right(1), SortMode::Frequency)));
        let result = search(&lines(), "가", &options).unwrap();
        assert_eq!(result.total(), 6);

        let values: Vec<&str> = result.rows().map(|r| r.cell(1).unwrap()).collect();
        assert_eq!(values, vec!["를/JKO", "를/JKO", "를/JKO", "는/JX", "는/JX", ""]);

        // 같은 빈도 안에서는 원래 줄 순서
        let order: Vec<usize> = result.hits.iter().map(|h| h.line).collect();
        assert_eq!(order, vec![1, 3, 6, 2, 5, 4]);
    }

    #[test]
    fn test_frequency_table() {
        let result = search(&lines(), "가", &SearchOptions::new()).unwrap();
        let table = result.frequencies(Position::right(1)).unwrap();
        assert_eq!(table[0], ("를/JKO".to_string(), 3));
        assert_eq!(table[1], ("는/JX".to_string(), 2));
        assert_eq!(table[2], (String::new(), 1));
    }
}

mod input_tests {
    use super::*;
    use jkwic::input::{collect_text_files, read_document, FileFilter, ReadOptions, SourceMap};
    use jkwic::{search, SearchOptions};

    #[test]
    fn test_search_over_directory() {
        let dir = setup_corpus_directory();
        let files = collect_text_files(dir.path(), &FileFilter::default(), None).unwrap();
        assert_eq!(files.len(), 2);

        let mut lines = Vec::new();
        for path in &files {
            lines.extend(read_document(path, &ReadOptions::new()).unwrap().lines);
        }
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("최고/NNG"));

        let result = search(&lines, "작품", &SearchOptions::new()).unwrap();
        assert_eq!(result.total(), 2);
        assert_eq!(result.hits[1].line, 3);
    }

    #[test]
    fn test_hits_traced_to_source_file() {
        let dir = setup_corpus_directory();
        let files = collect_text_files(dir.path(), &FileFilter::default(), None).unwrap();

        let mut lines = Vec::new();
        let mut sources = SourceMap::new();
        for path in &files {
            let doc = read_document(path, &ReadOptions::new()).unwrap();
            sources.push(&doc.path, doc.lines.len());
            lines.extend(doc.lines);
        }

        let mut result = search(&lines, "작품", &SearchOptions::new()).unwrap();
        result.locate(&sources);

        let hit = &result.hits[1];
        assert!(hit.source.as_ref().unwrap().ends_with("news_2.txt"));
        assert_eq!(hit.line, 1);
        assert!(result.hits[0]
            .source
            .as_ref()
            .unwrap()
            .ends_with("news_1.txt"));
    }

    #[test]
    fn test_file_pattern_filter() {
        let dir = setup_corpus_directory();
        let filter = FileFilter::new(Some("*_2.txt")).unwrap();
        let files = collect_text_files(dir.path(), &filter, None).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("news_2.txt"));
    }
}

mod export_tests {
    use jkwic::export::{export, ExportFormat};
    use jkwic::{search, SearchOptions};

    #[test]
    fn test_tsv_export_is_fixed_width() {
        let lines = [super::SENTENCE];
        let result = search(lines, "의", &SearchOptions::new()).unwrap();

        let mut out = Vec::new();
        export(&result, ExportFormat::Tsv, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let line = text.lines().next().unwrap();
        assert_eq!(line.split('\t').count(), 7);
        assert_eq!(line, "\t\t최고/NNG\t의/JKG\t작품/NNG\t이/JKS\t다/EF");
    }
}

mod error_tests {
    use jkwic::{search, KwicError, SearchMode, SearchOptions};

    #[test]
    fn test_malformed_pattern_message_has_example() {
        let options = SearchOptions::new().with_mode(SearchMode::Jamo);
        let err = search(["하다/VV"], "[ㅎ/*]", &options).unwrap_err();
        assert!(matches!(err, KwicError::MalformedPattern { .. }));
        assert!(err.to_string().contains("[ㅎ/*/*]다"));
    }

    #[test]
    fn test_invalid_regex_display() {
        let options = SearchOptions::new().with_mode(SearchMode::Regex);
        let err = search(["하다/VV"], "하(", &options).unwrap_err();
        assert!(err.to_string().contains("유효하지 않은 정규식"));
    }
}

mod cli_tests {
    use clap::Parser;
    use jkwic::cli::Args;
    use jkwic::{search, Position, SearchMode, SortMode};

    #[test]
    fn test_args_drive_search() {
        let args = Args::try_parse_from([
            "jkwic",
            "[ㅎ/*/*]다",
            "--mode",
            "jamo",
            "--scan",
            "scan-all",
            "--sort-by",
            "C",
        ])
        .unwrap();

        assert_eq!(args.mode, SearchMode::Jamo);
        assert_eq!(args.sort_key(), Some((Position::CENTER, SortMode::Alphabetic)));

        let lines = ["공부하다/VV 하다/VV 다/EF"];
        let result = search(lines, &args.query, &args.search_options()).unwrap();
        let centers: Vec<&str> = result.rows().map(|r| r.center()).collect();
        assert_eq!(centers, vec!["공부하다/VV", "하다/VV"]);
    }
}
