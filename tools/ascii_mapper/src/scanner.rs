use crate::driver::lines_with_endings;
use crate::engine::Transliterator;
use crate::models::LineRecord;

/// Dry run over one file: one record per line containing non-ASCII chars,
/// with either the ASCII rewrite or the reason it cannot be produced.
/// Unlike `map`, a bad line does not stop the scan.
pub fn scan_text(
    engine: &Transliterator,
    source: &str,
    file_path: &str,
    relative_id_prefix: &str,
) -> Vec<LineRecord> {
    let mut records = Vec::new();

    for (line_no, line) in lines_with_endings(source) {
        let non_ascii = line.chars().filter(|c| !c.is_ascii()).count();
        if non_ascii == 0 {
            continue;
        }

        let comment = engine.is_comment(line);
        let (replacement, error) = match engine.transliterate(line) {
            Ok(mapped) => (Some(trim_eol(&mapped).to_string()), None),
            Err(e) => (None, Some(e.to_string())),
        };

        records.push(LineRecord {
            id: format!("{}:{}", relative_id_prefix, line_no),
            file_path: file_path.to_string(),
            line_no,
            original_text: trim_eol(line).to_string(),
            non_ascii_chars: non_ascii,
            comment,
            replacement,
            error,
        });
    }

    records
}

fn trim_eol(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(src: &str) -> Vec<LineRecord> {
        scan_text(&Transliterator::default(), src, "/proj/a.cpp", "a.cpp")
    }

    #[test]
    fn test_only_non_ascii_lines() {
        let records = scan("int x;\ndouble \u{03B8} = 0;\r\nreturn;\n");
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id, "a.cpp:2");
        assert_eq!(r.line_no, 2);
        assert_eq!(r.original_text, "double \u{03B8} = 0;");
        assert_eq!(r.replacement.as_deref(), Some("double theta = 0;"));
        assert_eq!(r.non_ascii_chars, 1);
        assert!(!r.comment);
        assert!(r.error.is_none());
    }

    #[test]
    fn test_scan_continues_past_errors() {
        let records = scan("a = 1\u{20AC};\n// \u{2603}\nb\u{2081} = 2;\n");
        assert_eq!(records.len(), 3);
        assert!(records[0].error.as_deref().unwrap().contains("U+20AC"));
        assert!(records[0].replacement.is_none());
        assert!(records[1].comment);
        assert_eq!(records[1].replacement.as_deref(), Some("// \u{2603}"));
        assert_eq!(records[2].replacement.as_deref(), Some("b_1 = 2;"));
    }

    #[test]
    fn test_no_false_positives() {
        assert!(scan("int x = 42; // plain ascii comment\nvoid foo() {}\n").is_empty());
    }

    #[test]
    fn test_record_serializes_without_empty_fields() {
        let records = scan("\u{03C0}\n");
        let json = serde_json::to_string(&records[0]).unwrap();
        assert!(json.contains("\"replacement\":\"pi\""));
        assert!(!json.contains("\"error\""));
    }
}
