use nom::{
    bytes::complete::take_while,
    character::complete::{char, satisfy},
    combinator::{all_consuming, map, opt, recognize},
    sequence::{pair, preceded},
    IResult,
};

/// Parse a field or table name: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn parse_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

/// Whether the whole string is a valid name.
pub fn is_name(input: &str) -> bool {
    all_consuming(parse_name)(input).is_ok()
}

/// Parse a table key: `Table` or `Table:alias`.
pub fn parse_table_key(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    pair(parse_name, opt(preceded(char(':'), parse_name)))(input)
}

/// Parse the negation prefix of a logic key (`!key`).
pub fn parse_logic_prefix(input: &str) -> IResult<&str, bool> {
    map(opt(char('!')), |bang| bang.is_some())(input)
}

/// Split a reference path like `/Moment:main/userId` into its table key and key.
///
/// Only the last two segments matter, so `/[]/Comment/momentId` works too.
pub fn split_target_ref(input: &str) -> Option<(&str, Option<&str>, &str)> {
    let (prefix, key) = input.rsplit_once('/')?;
    let table_key = prefix.rsplit('/').next()?;

    let (_, (table, alias)) = all_consuming(parse_table_key)(table_key).ok()?;
    if !is_name(key) {
        return None;
    }
    Some((table, alias, key))
}
