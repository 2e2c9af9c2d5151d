//! Key formatting.
//!
//! Turns divider-delimited words into one identifier:
//!
//! ```text
//! A-b-cd-Efg  --format_hyphen-->  aBCdEfg
//! Comment[]   --format_array_key--> CommentList
//! Moment:m    --format_object_key--> m
//! ```
//!
//! Keys that match no rule come back unchanged, which keeps odd keys
//! readable when debugging a response.

use std::borrow::Cow;

use crate::config::FormatToggles;


/// Upper- or lower-case the first character only.
pub fn first_case(s: &str, upper: bool) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => {
            let mut out = String::with_capacity(s.len());
            if upper {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// `@key` => `key`
pub fn format_at(key: &str) -> &str {
    key.strip_prefix('@').unwrap_or(key)
}

/// `key:alias` => `alias`
pub fn format_colon(key: &str) -> &str {
    key.split_once(':').map_or(key, |(_, alias)| alias)
}

/// Remove every `divider` and concatenate the words.
///
/// `other_case` re-cases each whole word first (`Some(true)` upper,
/// `Some(false)` lower), then `first_case` re-cases the first character of
/// each word. `None` leaves that aspect as it is.
pub fn format_divider_cased(
    key: &str,
    divider: &str,
    first_case: Option<bool>,
    other_case: Option<bool>,
) -> String {
    if divider.is_empty() {
        return key.to_string();
    }

    let mut name = String::with_capacity(key.len());
    for part in key.split(divider) {
        let part: Cow<'_, str> = match other_case {
            Some(true) => Cow::Owned(part.to_uppercase()),
            Some(false) => Cow::Owned(part.to_lowercase()),
            None => Cow::Borrowed(part),
        };
        match first_case {
            Some(upper) => name.push_str(&self::first_case(&part, upper)),
            None => name.push_str(&part),
        }
    }
    name
}

/// `A-b-cd-Efg` with `Some(true)` => `ABCdEfg`. Words are lower-cased first.
pub fn format_divider_with(key: &str, divider: &str, first_case: Option<bool>) -> String {
    format_divider_cased(key, divider, first_case, Some(false))
}

/// `A-b-cd-Efg` => `aBCdEfg`. A key without `divider` is returned as is.
pub fn format_divider(key: &str, divider: &str) -> String {
    if divider.is_empty() || !key.contains(divider) {
        return key.to_string();
    }
    first_case(&format_divider_with(key, divider, Some(true)), false)
}

/// `A-b-cd-Efg` => `aBCdEfg`
pub fn format_hyphen(key: &str) -> String {
    format_divider(key, "-")
}

/// `A_b_cd_Efg` => `aBCdEfg`
pub fn format_underline(key: &str) -> String {
    format_divider(key, "_")
}

/// `A$b$cd$Efg` => `aBCdEfg`
pub fn format_dollar(key: &str) -> String {
    format_divider(key, "$")
}

/// `A.b.cd.Efg` => `aBCdEfg`
pub fn format_dot(key: &str) -> String {
    format_divider(key, ".")
}

/// `A/b/cd/Efg` => `aBCdEfg`
pub fn format_slash(key: &str) -> String {
    format_divider(key, "/")
}

/// `A/b/cd/Efg` with `Some(true)` => `ABCdEfg`, with `None` => `abcdefg`.
/// No extra re-casing of the result's first character.
pub fn format_slash_with(key: &str, first_case: Option<bool>) -> String {
    format_divider_with(key, "/", first_case)
}

/// Switches for [`format_key`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyFormat {
    /// `A:b` => `b`
    pub colon: bool,
    /// `@a` => `a`
    pub at: bool,
    pub hyphen: bool,
    pub underline: bool,
    pub dollar: bool,
    /// Case of the result's first character. `None` keeps the case the
    /// key's first character had before any divider was removed.
    pub first_case: Option<bool>,
}

/// Format a key with independent switches, applied in order:
/// colon, at, hyphen, underline, dollar, first case.
pub fn format_key(key: &str, format: &KeyFormat) -> String {
    let mut key = key;
    if format.colon {
        key = format_colon(key);
    }
    if format.at {
        // keywords only lose the prefix, `@a-b` stays `a-b` unless hyphen is on
        key = format_at(key);
    }

    let mut name = Cow::Borrowed(key);
    for (on, divider) in [
        (format.hyphen, "-"),
        (format.underline, "_"),
        (format.dollar, "$"),
    ] {
        if on && name.contains(divider) {
            name = Cow::Owned(format_divider_with(&name, divider, Some(true)));
        }
    }

    match format.first_case {
        Some(upper) => first_case(&name, upper),
        None if matches!(name, Cow::Borrowed(_)) => name.into_owned(),
        None => keep_first_case(&name, key),
    }
}

/// Re-case the first character of `name` to match the first character of `reference`.
fn keep_first_case(name: &str, reference: &str) -> String {
    match reference.chars().next() {
        Some(c) if c.is_lowercase() => first_case(name, false),
        Some(c) if c.is_uppercase() => first_case(name, true),
        _ => name.to_string(),
    }
}

fn pluralize(stem: &str) -> String {
    if stem.is_empty() {
        "list".to_string()
    } else {
        format!("{}List", stem)
    }
}

/// Key of an array value.
///
/// `key[]` => `keyList`, `Table-column:alias[]` => `alias`. The alias is
/// taken as written, so `Comment:[]` gives an empty key. Hyphens are
/// always removed, underscores and dollars only when toggled.
pub fn format_array_key(key: &str, toggles: &FormatToggles) -> String {
    let stem = key.strip_suffix("[]");

    if let Some((_, alias)) = stem.unwrap_or(key).split_once(':') {
        return alias.to_string();
    }

    let key = match stem {
        Some(stem) => Cow::Owned(pluralize(stem)),
        None => Cow::Borrowed(key),
    };

    format_key(
        &key,
        &KeyFormat {
            colon: false,
            at: true,
            hyphen: true,
            underline: toggles.underline,
            dollar: toggles.dollar,
            first_case: None,
        },
    )
}

/// Key of an object value. `name` => `name`, `Table:alias` => `alias`, `@key` => `key`.
pub fn format_object_key(key: &str, toggles: &FormatToggles) -> String {
    if let Some((_, alias)) = key.split_once(':') {
        return alias.to_string();
    }

    format_key(
        key,
        &KeyFormat {
            colon: false,
            at: true,
            hyphen: toggles.hyphen,
            underline: toggles.underline,
            dollar: toggles.dollar,
            first_case: None,
        },
    )
}

/// Key of a scalar value. No alias handling; with every toggle off only
/// an `@` prefix is removed.
pub fn format_other_key(key: &str, toggles: &FormatToggles) -> String {
    format_key(
        key,
        &KeyFormat {
            colon: false,
            at: true,
            hyphen: toggles.hyphen,
            underline: toggles.underline,
            dollar: toggles.dollar,
            first_case: None,
        },
    )
}

/// `name:alias` => `name`
pub fn table_name(full_name: &str) -> &str {
    full_name.split_once(':').map_or(full_name, |(name, _)| name)
}

/// Name of a generated variable: `Comment[]` => `CommentList`,
/// `user-name:owner_id` => `OwnerId`.
pub fn variable_name(full_name: &str) -> String {
    let name = match full_name.strip_suffix("[]") {
        Some(stem) => Cow::Owned(pluralize(stem)),
        None => Cow::Borrowed(full_name),
    };

    format_key(
        &name,
        &KeyFormat {
            colon: true,
            at: true,
            hyphen: true,
            underline: true,
            dollar: false,
            first_case: Some(true),
        },
    )
}
