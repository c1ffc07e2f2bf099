use super::*;

fn items() -> Vec<DiscItem> {
    vec![
        DiscItem::Str {
            start_sector: 100,
            end_sector: 2400,
            start_frame: 1,
            end_frame: 450,
            audio_samples: 0,
        },
        DiscItem::Str {
            start_sector: 2401,
            end_sector: 2500,
            start_frame: 0,
            end_frame: 12,
            audio_samples: 40320,
        },
        DiscItem::Xa {
            start_sector: 3000,
            end_sector: 9000,
            channels: BTreeSet::from([0, 5, 31]),
        },
        DiscItem::Xa {
            start_sector: 9001,
            end_sector: 9001,
            channels: BTreeSet::new(),
        },
        DiscItem::Tim {
            start_sector: 12,
            end_sector: 14,
            start_offset: 1024,
        },
    ]
}

#[test]
fn test_display() {
    let lines: Vec<String> = items().iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "STR:100-2400:1-450",
            "STR:2401-2500:0-12:40320",
            "XA:3000-9000:0,5,31",
            "XA:9001-9001:",
            "TIM:12-14:1024",
        ]
    );
}

#[test]
fn test_round_trip() {
    for item in items() {
        let parsed: DiscItem = item.to_string().parse().unwrap();
        assert_eq!(parsed, item);
    }
}

#[test]
fn test_parse_index_skips_comments_and_blanks() {
    let text = format!("# strxa index\n\n{}   \n# end\n", format_index(&items()));
    let (parsed, errors) = parse_index(&text);
    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(parsed, items());
}

#[test]
fn test_parse_errors_are_per_line() {
    let text = "\
STR:1-2:3-4
MDEC:1-2:3
XA:5-6
TIM:7-x:0
STR:9-3:0-1
XA:1-2:0,32
TIM:20-21:16
";
    let (parsed, errors) = parse_index(text);
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[1].tag(), "TIM");

    let kinds: Vec<(usize, IndexParseErrorKind)> =
        errors.into_iter().map(|e| (e.line, e.kind)).collect();
    assert_eq!(
        kinds,
        vec![
            (2, IndexParseErrorKind::UnknownTag("MDEC".into())),
            (
                3,
                IndexParseErrorKind::FieldCount {
                    expected: "3",
                    actual: 2
                }
            ),
            (4, IndexParseErrorKind::InvalidNumber("x".into())),
            (5, IndexParseErrorKind::InvalidRange("9-3".into())),
            (6, IndexParseErrorKind::InvalidChannel(32)),
        ]
    );
}

#[test]
fn test_missing_range_separator() {
    assert_eq!(
        "TIM:12:0".parse::<DiscItem>(),
        Err(IndexParseErrorKind::InvalidRange("12".into()))
    );
}

#[test]
fn test_error_display_has_line() {
    let (_, errors) = parse_index("\n\nBOGUS:1-2:3\n");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "line 3: unknown item tag 'BOGUS'");
}
