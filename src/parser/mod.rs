//! On-clause key parser.
//!
//! Parses the reference keys of a join into [`OnClause`]s.
//!
//! # Syntax Overview
//!
//! ```text
//! !contactIdList<>@
//! ┬──────┬─────┬─┬
//! │      │     │ └── Ref terminator (required)
//! │      │     └── Relation suffix (optional)
//! │      └── Field name
//! └── Negation (handled by the logic parser)
//! ```
//!
//! Relation suffixes are matched in this order, first match wins:
//! `{}`, `<>`, `[%_?]{0,2}$`, `*~`, `~`, `>=`, `<=`, `>`, `<`.

pub mod tokens;

#[cfg(test)]
mod tests;

use tracing::debug;

use crate::ast::*;
use crate::error::{KeyError, KeyResult};

pub use self::tokens::is_name;

/// A key split into its negation flag and canonical name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logic {
    pub negated: bool,
    pub key: String,
}

/// Splits logic prefixes off a key.
///
/// Plugged into the on-clause parser so the prefix grammar can evolve
/// independently. Any `Fn(&str) -> Logic` works as a parser.
pub trait LogicParser {
    fn parse_logic(&self, key: &str) -> Logic;
}

/// The default logic parser: a leading `!` negates the key.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixLogic;

impl LogicParser for PrefixLogic {
    fn parse_logic(&self, key: &str) -> Logic {
        let (rest, negated) = tokens::parse_logic_prefix(key).unwrap_or((key, false));
        Logic {
            negated,
            key: rest.to_string(),
        }
    }
}

impl<F> LogicParser for F
where
    F: Fn(&str) -> Logic,
{
    fn parse_logic(&self, key: &str) -> Logic {
        self(key)
    }
}

/// Parse a reference key like `userId@` or `contactIdList<>@` with the default logic parser.
pub fn parse_on_key(join_type: JoinSigil, table: &str, raw_key: &str) -> KeyResult<OnClause> {
    parse_on_key_with(join_type, table, raw_key, &PrefixLogic)
}

/// Parse a reference key, delegating logic prefixes to `logic`.
pub fn parse_on_key_with(
    join_type: JoinSigil,
    table: &str,
    raw_key: &str,
    logic: &dyn LogicParser,
) -> KeyResult<OnClause> {
    let malformed = |reason: String| {
        debug!(join_type = %join_type, table, key = raw_key, "rejecting ref key: {}", reason);
        KeyError::malformed(join_type.as_str(), table, raw_key, reason)
    };

    let Some(key) = raw_key.strip_suffix('@') else {
        return Err(malformed(
            "ref key must end with '@', e.g. \"userId@\": \"/Moment/userId\"".to_string(),
        ));
    };

    let (key, relation) = split_relation(key).map_err(&malformed)?;

    if key.contains('&') || key.contains('|') {
        return Err(malformed(format!(
            "'{}' uses '&' or '|', only the '!' logic prefix is supported",
            key
        )));
    }

    let Logic { negated, key } = logic.parse_logic(key);

    if !is_name(&key) {
        debug!(join_type = %join_type, table, key = raw_key, name = %key, "rejecting ref key: bad name");
        return Err(KeyError::InvalidIdentifier {
            join_type: join_type.as_str().to_string(),
            table: table.to_string(),
            key: raw_key.to_string(),
            name: key,
        });
    }

    Ok(OnClause {
        negated,
        relation,
        key,
    })
}

/// Strip the relation suffix off a key whose `@` is already removed.
fn split_relation(key: &str) -> Result<(&str, RelationType), String> {
    if let Some(k) = key.strip_suffix("{}") {
        return Ok((k, RelationType::OneToMany));
    }
    if let Some(k) = key.strip_suffix("<>") {
        return Ok((k, RelationType::ManyToOne));
    }
    if let Some(k) = key.strip_suffix('$') {
        return split_like(k);
    }
    if let Some(k) = key.strip_suffix("*~") {
        return Ok((k, RelationType::Regex { case_sensitive: false }));
    }
    if let Some(k) = key.strip_suffix('~') {
        return Ok((k, RelationType::Regex { case_sensitive: true }));
    }
    if let Some(k) = key.strip_suffix(">=") {
        return Ok((k, RelationType::GreaterEqual));
    }
    if let Some(k) = key.strip_suffix("<=") {
        return Ok((k, RelationType::LessEqual));
    }
    if let Some(k) = key.strip_suffix('>') {
        return Ok((k, RelationType::Greater));
    }
    if let Some(k) = key.strip_suffix('<') {
        return Ok((k, RelationType::Less));
    }
    Ok((key, RelationType::Exact))
}

/// Take up to two wildcard markers off the end of a `$` key.
fn split_like(key: &str) -> Result<(&str, RelationType), String> {
    let Some((k, last)) = pop_wildcard(key) else {
        return Ok((key, RelationType::Like(LikeMarkers::none())));
    };

    match pop_wildcard(k) {
        Some((_, prev)) if prev == last => Err(format!(
            "repeated wildcard '{}' before '$', each marker may appear once",
            last.as_char()
        )),
        Some((k, prev)) => Ok((k, RelationType::Like(LikeMarkers::pair(prev, last)))),
        None if last == Wildcard::Question => {
            Err("a lone '?' before '$' must be combined with '%' or '_'".to_string())
        }
        None => Ok((k, RelationType::Like(LikeMarkers::single(last)))),
    }
}

fn pop_wildcard(key: &str) -> Option<(&str, Wildcard)> {
    let c = key.chars().next_back()?;
    let marker = Wildcard::from_char(c)?;
    Some((&key[..key.len() - c.len_utf8()], marker))
}
