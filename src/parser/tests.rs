use super::*;

// ========================================================================
// Relation suffixes
// ========================================================================

fn relation_of(raw: &str) -> RelationType {
    parse_on_key(JoinSigil::App, "Moment", raw).unwrap().relation
}

#[test]
fn test_exact() {
    let on = parse_on_key(JoinSigil::App, "Moment", "userId@").unwrap();
    assert_eq!(
        on,
        OnClause {
            negated: false,
            relation: RelationType::Exact,
            key: "userId".to_string(),
        }
    );
}

#[test]
fn test_one_to_many_and_many_to_one() {
    assert_eq!(relation_of("id{}@"), RelationType::OneToMany);

    let on = parse_on_key(JoinSigil::App, "Moment", "contactIdList<>@").unwrap();
    assert_eq!(on.relation, RelationType::ManyToOne);
    assert_eq!(on.key, "contactIdList");
}

#[test]
fn test_comparisons() {
    assert_eq!(relation_of("date>=@"), RelationType::GreaterEqual);
    assert_eq!(relation_of("date<=@"), RelationType::LessEqual);
    assert_eq!(relation_of("date>@"), RelationType::Greater);
    assert_eq!(relation_of("date<@"), RelationType::Less);
}

#[test]
fn test_regex() {
    assert_eq!(relation_of("name~@"), RelationType::Regex { case_sensitive: true });
    assert_eq!(relation_of("name*~@"), RelationType::Regex { case_sensitive: false });
}

#[test]
fn test_like_markers() {
    assert_eq!(relation_of("key$@"), RelationType::Like(LikeMarkers::none()));
    assert_eq!(
        relation_of("key%$@"),
        RelationType::Like(LikeMarkers::single(Wildcard::Percent))
    );
    assert_eq!(
        relation_of("key_%$@"),
        RelationType::Like(LikeMarkers::pair(Wildcard::Underscore, Wildcard::Percent))
    );
    assert_eq!(
        relation_of("key?%$@"),
        RelationType::Like(LikeMarkers::pair(Wildcard::Question, Wildcard::Percent))
    );
    assert_eq!(
        relation_of("key_?$@"),
        RelationType::Like(LikeMarkers::pair(Wildcard::Underscore, Wildcard::Question))
    );
    assert_eq!(relation_of("key_?$@").suffix(), "_?$");

    let on = parse_on_key(JoinSigil::App, "T", "key%$@").unwrap();
    assert_eq!(on.key, "key");
}

#[test]
fn test_like_rejects_repeated_marker() {
    let err = parse_on_key(JoinSigil::App, "T", "key%%$@").unwrap_err();
    assert!(matches!(err, KeyError::MalformedKeySyntax { .. }));
    assert!(err.to_string().contains("repeated wildcard '%'"));

    assert!(matches!(
        parse_on_key(JoinSigil::App, "T", "key??$@"),
        Err(KeyError::MalformedKeySyntax { .. })
    ));
}

#[test]
fn test_like_rejects_lone_question() {
    let err = parse_on_key(JoinSigil::App, "T", "key?$@").unwrap_err();
    assert!(matches!(err, KeyError::MalformedKeySyntax { .. }));
}

#[test]
fn test_suffix_priority() {
    // `{}` wins over everything, `$` wins over `~`
    assert_eq!(relation_of("a{}@"), RelationType::OneToMany);
    assert!(matches!(
        parse_on_key(JoinSigil::App, "T", "a~$@"),
        Err(KeyError::InvalidIdentifier { .. })
    ));
}

// ========================================================================
// Failures
// ========================================================================

#[test]
fn test_missing_terminator() {
    let err = parse_on_key(JoinSigil::App, "Moment", "userId").unwrap_err();
    match err {
        KeyError::MalformedKeySyntax {
            join_type,
            table,
            key,
            ..
        } => {
            assert_eq!(join_type, "@");
            assert_eq!(table, "Moment");
            assert_eq!(key, "userId");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_combinators_rejected() {
    for raw in ["a&b@", "a|b@", "&id@", "|id{}@"] {
        assert!(
            matches!(
                parse_on_key(JoinSigil::Left, "User", raw),
                Err(KeyError::MalformedKeySyntax { .. })
            ),
            "{raw} should be rejected"
        );
    }
}

#[test]
fn test_invalid_identifier() {
    let err = parse_on_key(JoinSigil::Inner, "User", "user-id@").unwrap_err();
    match &err {
        KeyError::InvalidIdentifier { join_type, name, .. } => {
            assert_eq!(join_type, "&");
            assert_eq!(name, "user-id");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().starts_with("&/.../User/user-id@"));

    assert!(parse_on_key(JoinSigil::App, "T", "@").is_err());
    assert!(parse_on_key(JoinSigil::App, "T", "1id@").is_err());
}

// ========================================================================
// Logic prefix
// ========================================================================

#[test]
fn test_negation() {
    let on = parse_on_key(JoinSigil::App, "Moment", "!userId@").unwrap();
    assert!(on.negated);
    assert_eq!(on.key, "userId");
    assert_eq!(on.relation, RelationType::Exact);

    let on = parse_on_key(JoinSigil::App, "Moment", "!id{}@").unwrap();
    assert!(on.negated);
    assert_eq!(on.relation, RelationType::OneToMany);
}

#[test]
fn test_custom_logic_parser() {
    let tilde = |key: &str| Logic {
        negated: key.starts_with('~'),
        key: key.trim_start_matches('~').to_string(),
    };
    let on = parse_on_key_with(JoinSigil::App, "Moment", "~userId>@", &tilde).unwrap();
    assert!(on.negated);
    assert_eq!(on.key, "userId");
    assert_eq!(on.relation, RelationType::Greater);
}
