//! Tests for kv config parsing, comment stripping and numeric grammar

#[cfg(test)]
mod tests {
    use num_traits::ToPrimitive;
    use std::path::Path;
    use tilebloom::GeneratorError;
    use tilebloom::config::loader::{
        ConfigValue, RawConfig, is_numeric_literal, load_kv_config, parse_kv_config,
        parse_number,
    };

    fn parse(text: &str) -> tilebloom::Result<RawConfig> {
        parse_kv_config(text, Path::new("params.bloom"))
    }

    // Tests integer and decimal values keep their written kind
    // Verified by storing every value as a float
    #[test]
    fn test_parse_keeps_numeric_kind() {
        let config = parse("width = 64\nvar_threshold = 250.5\n").unwrap();

        assert_eq!(config.get("width"), Some(ConfigValue::Integer(64)));
        assert_eq!(config.get("var_threshold"), Some(ConfigValue::Float(250.5)));
        assert_eq!(config.len(), 2);
    }

    // Tests comments, blank lines and surrounding whitespace are ignored
    // Verified by skipping comment stripping
    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let text = "# detector parameters\n\n   tile   =   8   # small tiles\n\t\n# seed = 5\n";
        let config = parse(text).unwrap();

        assert_eq!(config.get("tile"), Some(ConfigValue::Integer(8)));
        assert_eq!(config.get("seed"), None);
        assert_eq!(config.entry("tile").map(|entry| entry.line), Some(3));
    }

    // Tests a later assignment of the same key wins
    // Verified by keeping the first occurrence
    #[test]
    fn test_duplicate_key_last_wins() {
        let config = parse("seed = 1\nseed = 9\n").unwrap();

        assert_eq!(config.get("seed"), Some(ConfigValue::Integer(9)));
        assert_eq!(config.entry("seed").map(|entry| entry.line), Some(2));
    }

    // Tests unknown keys are still accepted syntactically
    // Verified by rejecting unrecognized keys in the loader
    #[test]
    fn test_unknown_keys_parsed() {
        let config = parse("gamma = 2.2\n").unwrap();
        assert_eq!(config.get("gamma"), Some(ConfigValue::Float(2.2)));
    }

    // Tests missing separator reports path, line and stripped content
    // Verified by reporting 0-based line numbers
    #[test]
    fn test_missing_separator_is_syntax_error() {
        let err = parse("tile = 16\nwidth 160  # oops\n").unwrap_err();

        match &err {
            GeneratorError::ConfigSyntax { line, content, .. } => {
                assert_eq!(*line, 2);
                assert_eq!(content, "width 160");
            }
            other => unreachable!("Expected ConfigSyntax, got {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "params.bloom:2: expected 'key = value', got: width 160"
        );
    }

    // Tests non-numeric values are value errors naming the value
    // Verified by accepting any value text
    #[test]
    fn test_non_numeric_value_is_value_error() {
        let err = parse("width = abc\n").unwrap_err();

        assert!(matches!(err, GeneratorError::ConfigValue { line: 1, .. }));
        assert_eq!(err.to_string(), "params.bloom:1: value must be number, got: abc");
    }

    // Tests the line is split at the first separator only
    // Verified by splitting at the last separator
    #[test]
    fn test_split_at_first_separator() {
        let err = parse("width = 1 = 2\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "params.bloom:1: value must be number, got: 1 = 2"
        );
    }

    // Tests the accepted numeric grammar
    // Verified by allowing a leading plus sign
    #[test]
    fn test_numeric_literal_grammar() {
        for accepted in ["0", "42", "-7", "3.25", "-0.5", "007"] {
            assert!(is_numeric_literal(accepted), "should accept {accepted}");
        }
        for rejected in ["", "-", "+1", "1.", ".5", "1e3", "1.2.3", "abc", "1_000", " 1"] {
            assert!(!is_numeric_literal(rejected), "should reject {rejected:?}");
        }
    }

    // Tests integer literals beyond 64 bits are rejected rather than wrapped
    // Verified by saturating on overflow
    #[test]
    fn test_integer_overflow_rejected() {
        assert_eq!(parse_number("99999999999999999999"), None);
        assert!(parse("seed = 99999999999999999999\n").is_err());
    }

    // Tests coercion helpers truncate toward zero
    // Verified by rounding instead of truncating
    #[test]
    fn test_config_value_to_primitive() {
        assert_eq!(ConfigValue::Float(15.9).to_i64(), Some(15));
        assert_eq!(ConfigValue::Float(-2.7).to_i64(), Some(-2));
        assert_eq!(ConfigValue::Integer(3).to_f64(), Some(3.0));
        assert_eq!(ConfigValue::Float(1.0e30).to_i64(), None);
    }

    // Tests reading a config from disk
    // Verified by ignoring file contents
    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("detector.bloom");
        std::fs::write(&path, "height = 48\n").unwrap();

        let config = load_kv_config(&path).unwrap();
        assert_eq!(config.get("height"), Some(ConfigValue::Integer(48)));
        assert_eq!(config.path(), path.as_path());
    }

    // Tests a missing file is a file system error
    // Verified by returning an empty config for missing files
    #[test]
    fn test_load_missing_file() {
        let err = load_kv_config(Path::new("does/not/exist.bloom")).unwrap_err();
        assert!(matches!(err, GeneratorError::FileSystem { .. }));
    }
}
