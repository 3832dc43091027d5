use envdoc::schema::{MASK, Schema, ValueType};
use envdoc::{IssueKind, Mode, parse_str, parse_str_with_mode};

#[test]
fn parses_clean_fixture_in_both_modes() {
    let fixture = include_str!("fixtures/app-basic.env");

    for mode in [Mode::Lenient, Mode::Strict] {
        let report = parse_str_with_mode(fixture, mode);
        assert!(report.is_clean(), "unexpected issues in {mode:?}: {report:?}");
        assert_eq!(report.env.len(), 10);

        let env = &report.env;
        assert_eq!(env.value("APP_NAME").expect("APP_NAME"), "envdoc");
        assert_eq!(
            env.value("GREETING").expect("GREETING"),
            "hello # not a comment"
        );
        assert_eq!(env.value("LITERAL").expect("LITERAL"), "single quoted");
        assert_eq!(
            env.value("PADDED").expect("PADDED"),
            "  keep inner spaces  "
        );
        assert_eq!(
            env.value("ESCAPED").expect("ESCAPED"),
            "she said \\\"hi\\\""
        );
        assert_eq!(env.value("INLINE").expect("INLINE"), "value");
        assert_eq!(
            env.value("URL").expect("URL"),
            "https://example.com/?a=1&b=2"
        );
        assert_eq!(env.get("GREETING").expect("GREETING").line, 8);
    }
}

#[test]
fn messy_fixture_lenient_findings() {
    let report = parse_str(include_str!("fixtures/messy.env"));

    let error_lines: Vec<_> = report.errors.iter().map(|issue| issue.line).collect();
    assert_eq!(error_lines, vec![2, 3]);
    assert!(
        report
            .errors
            .iter()
            .all(|issue| issue.kind == IssueKind::Syntax)
    );

    let warnings: Vec<_> = report
        .warnings
        .iter()
        .map(|issue| (issue.line, issue.kind, issue.message.as_str()))
        .collect();
    assert_eq!(
        warnings,
        vec![
            (4, IssueKind::Warning, "missing value"),
            (
                7,
                IssueKind::Duplicate,
                "duplicate key detected; first occurrence on line 6"
            ),
            (8, IssueKind::Warning, "unclosed quoted value"),
            (9, IssueKind::Warning, "content after closing quote"),
            (10, IssueKind::Warning, "dangling escape at end of value"),
        ]
    );

    let keys: Vec<_> = report.env.keys().collect();
    assert_eq!(
        keys,
        vec!["EMPTY", "lower_key", "DUP", "TAIL", "BACKSLASH", "GOOD"]
    );
    assert_eq!(report.env.value("DUP"), Some("first"));
    assert_eq!(report.env.value("TAIL"), Some("quoted"));
    assert_eq!(report.env.value("BACKSLASH"), Some("ends\\"));
}

#[test]
fn messy_fixture_strict_findings() {
    let report = parse_str_with_mode(include_str!("fixtures/messy.env"), Mode::Strict);

    assert!(report.warnings.is_empty());
    let errors: Vec<_> = report
        .errors
        .iter()
        .map(|issue| (issue.line, issue.kind))
        .collect();
    assert_eq!(
        errors,
        vec![
            (2, IssueKind::Syntax),
            (3, IssueKind::Syntax),
            (4, IssueKind::Strict),
            (5, IssueKind::Strict),
            (7, IssueKind::Duplicate),
            (8, IssueKind::Strict),
            (9, IssueKind::Strict),
            (10, IssueKind::Strict),
        ]
    );

    let keys: Vec<_> = report.env.keys().collect();
    assert_eq!(keys, vec!["EMPTY", "DUP", "TAIL", "BACKSLASH", "GOOD"]);
}

#[test]
fn schema_from_fixture_masks_secrets() {
    let report = parse_str(include_str!("fixtures/secrets.env"));
    let schema = Schema::generate(&report.env, false);

    for key in ["DB_PASSWORD", "GITHUB_TOKEN", "DATABASE_URL"] {
        let item = schema.get(key).expect("sensitive key present");
        assert!(item.sensitive, "{key} should be sensitive");
        assert_eq!(item.example, MASK);
    }

    let level = schema.get("LOG_LEVEL").expect("LOG_LEVEL");
    assert!(!level.sensitive);
    assert_eq!(level.example, "info");
    assert_eq!(level.value_type, ValueType::String);
}

#[test]
fn schema_types_from_fixture() {
    let report = parse_str(include_str!("fixtures/app-basic.env"));
    let schema = Schema::generate(&report.env, false);

    let types: Vec<_> = ["PORT", "DEBUG", "RATIO", "APP_NAME"]
        .into_iter()
        .map(|key| schema.get(key).expect("key present").value_type)
        .collect();
    assert_eq!(
        types,
        vec![
            ValueType::Integer,
            ValueType::Boolean,
            ValueType::Float,
            ValueType::String
        ]
    );
}
