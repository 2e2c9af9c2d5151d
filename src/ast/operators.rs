use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::KeyError;

/// The join type, written as a one-character sigil in front of a join path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinSigil {
    /// `@` - separate query, stitched into the parent in memory
    App,
    /// `<` - LEFT JOIN
    Left,
    /// `>` - RIGHT JOIN
    Right,
    /// `*` - CROSS JOIN
    Cross,
    /// `&` - INNER JOIN
    Inner,
    /// `|` or empty - FULL JOIN
    Full,
    /// `!` - OUTER JOIN
    Outer,
    /// `^` - SIDE JOIN
    Side,
    /// `(` - ANTI JOIN
    Anti,
    /// `)` - FOREIGN JOIN
    Foreign,
    /// `~` - ASOF JOIN
    Asof,
}

impl JoinSigil {
    pub const ALL: [JoinSigil; 11] = [
        JoinSigil::App,
        JoinSigil::Left,
        JoinSigil::Right,
        JoinSigil::Cross,
        JoinSigil::Inner,
        JoinSigil::Full,
        JoinSigil::Outer,
        JoinSigil::Side,
        JoinSigil::Anti,
        JoinSigil::Foreign,
        JoinSigil::Asof,
    ];

    /// Decode a sigil. The empty string is a full join.
    pub fn parse(sigil: &str) -> Result<Self, KeyError> {
        match sigil {
            "@" => Ok(JoinSigil::App),
            "<" => Ok(JoinSigil::Left),
            ">" => Ok(JoinSigil::Right),
            "*" => Ok(JoinSigil::Cross),
            "&" => Ok(JoinSigil::Inner),
            "|" | "" => Ok(JoinSigil::Full),
            "!" => Ok(JoinSigil::Outer),
            "^" => Ok(JoinSigil::Side),
            "(" => Ok(JoinSigil::Anti),
            ")" => Ok(JoinSigil::Foreign),
            "~" => Ok(JoinSigil::Asof),
            other => Err(KeyError::unsupported(other)),
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        let mut buf = [0u8; 4];
        Self::parse(c.encode_utf8(&mut buf)).ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JoinSigil::App => "@",
            JoinSigil::Left => "<",
            JoinSigil::Right => ">",
            JoinSigil::Cross => "*",
            JoinSigil::Inner => "&",
            JoinSigil::Full => "|",
            JoinSigil::Outer => "!",
            JoinSigil::Side => "^",
            JoinSigil::Anti => "(",
            JoinSigil::Foreign => ")",
            JoinSigil::Asof => "~",
        }
    }

    pub fn is_app_join(&self) -> bool {
        *self == JoinSigil::App
    }

    pub fn is_sql_join(&self) -> bool {
        !self.is_app_join()
    }

    pub fn is_left_join(&self) -> bool {
        *self == JoinSigil::Left
    }

    pub fn is_right_join(&self) -> bool {
        *self == JoinSigil::Right
    }

    pub fn is_left_or_right_join(&self) -> bool {
        self.is_left_join() || self.is_right_join()
    }

    pub fn is_cross_join(&self) -> bool {
        *self == JoinSigil::Cross
    }

    pub fn is_inner_join(&self) -> bool {
        *self == JoinSigil::Inner
    }

    pub fn is_full_join(&self) -> bool {
        *self == JoinSigil::Full
    }

    pub fn is_outer_join(&self) -> bool {
        *self == JoinSigil::Outer
    }

    pub fn is_side_join(&self) -> bool {
        *self == JoinSigil::Side
    }

    pub fn is_anti_join(&self) -> bool {
        *self == JoinSigil::Anti
    }

    pub fn is_foreign_join(&self) -> bool {
        *self == JoinSigil::Foreign
    }

    pub fn is_asof_join(&self) -> bool {
        *self == JoinSigil::Asof
    }

    /// Whether the vice table's result set may be cached and shared.
    ///
    /// Full, outer, anti, side and asof joins depend on unmatched or
    /// duplicate vice rows, so a cached result could hide rows they need.
    pub fn can_cache_vice_table(&self) -> bool {
        matches!(
            self,
            JoinSigil::App
                | JoinSigil::Left
                | JoinSigil::Right
                | JoinSigil::Inner
                | JoinSigil::Cross
                | JoinSigil::Foreign
        )
    }
}

impl FromStr for JoinSigil {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<char> for JoinSigil {
    type Error = KeyError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c).ok_or_else(|| KeyError::unsupported(c.to_string()))
    }
}

impl std::fmt::Display for JoinSigil {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A LIKE wildcard marker in front of the `$` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wildcard {
    /// `%`
    Percent,
    /// `_`
    Underscore,
    /// `?`
    Question,
}

impl Wildcard {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '%' => Some(Wildcard::Percent),
            '_' => Some(Wildcard::Underscore),
            '?' => Some(Wildcard::Question),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Wildcard::Percent => '%',
            Wildcard::Underscore => '_',
            Wildcard::Question => '?',
        }
    }
}

/// Markers of a `Like` relation, as written before `$`.
///
/// With one marker only `trailing` is set. `key_%$` has `_` leading and `%` trailing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LikeMarkers {
    pub leading: Option<Wildcard>,
    pub trailing: Option<Wildcard>,
}

impl LikeMarkers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn single(marker: Wildcard) -> Self {
        Self {
            leading: None,
            trailing: Some(marker),
        }
    }

    pub fn pair(leading: Wildcard, trailing: Wildcard) -> Self {
        Self {
            leading: Some(leading),
            trailing: Some(trailing),
        }
    }
}

/// How the on-clause key relates to the referenced key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationType {
    /// no suffix
    Exact,
    /// `{}`
    OneToMany,
    /// `<>`
    ManyToOne,
    /// `[%_?]{0,2}$`
    Like(LikeMarkers),
    /// `~` is case sensitive, `*~` is not
    Regex { case_sensitive: bool },
    /// `>=`
    GreaterEqual,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `<`
    Less,
}

impl RelationType {
    /// The suffix this relation is written with, `""` for [`RelationType::Exact`].
    pub fn suffix(&self) -> String {
        match self {
            RelationType::Exact => String::new(),
            RelationType::OneToMany => "{}".to_string(),
            RelationType::ManyToOne => "<>".to_string(),
            RelationType::Like(markers) => {
                let mut s = String::with_capacity(3);
                if let Some(m) = markers.leading {
                    s.push(m.as_char());
                }
                if let Some(m) = markers.trailing {
                    s.push(m.as_char());
                }
                s.push('$');
                s
            }
            RelationType::Regex { case_sensitive: true } => "~".to_string(),
            RelationType::Regex { case_sensitive: false } => "*~".to_string(),
            RelationType::GreaterEqual => ">=".to_string(),
            RelationType::LessEqual => "<=".to_string(),
            RelationType::Greater => ">".to_string(),
            RelationType::Less => "<".to_string(),
        }
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.suffix())
    }
}
