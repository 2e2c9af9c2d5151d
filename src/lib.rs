//! # sigil: key micro-syntax for JSON-driven queries
//!
//! Request documents describe joins with compact, sigil-annotated keys.
//! sigil compiles those keys into join descriptors and rewrites the keys
//! of whole JSON trees into plain identifiers.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use sigil::prelude::*;
//!
//! // "@/User": { "contactIdList<>@": "/Moment/contactIdList" }
//! let on = sigil::parse_on_key(JoinSigil::App, "Moment", "contactIdList<>@")?;
//! assert_eq!(on.relation, RelationType::ManyToOne);
//!
//! let tree = serde_json::json!({ "Comment[]": [{ "@id": 1 }] });
//! let out = sigil::normalize(&tree, &FormatToggles::default());
//! // => { "CommentList": [{ "id": 1 }] }
//! ```
//!
//! ## Join Sigils
//!
//! | Sigil | Join    | Sigil | Join    |
//! |-------|---------|-------|---------|
//! | `@`   | App     | `!`   | Outer   |
//! | `<`   | Left    | `^`   | Side    |
//! | `>`   | Right   | `(`   | Anti    |
//! | `*`   | Cross   | `)`   | Foreign |
//! | `&`   | Inner   | `~`   | Asof    |
//! | `\|`  | Full    |       |         |
//!
//! ## Relation Suffixes
//!
//! | Suffix         | Relation          |
//! |----------------|-------------------|
//! | `{}`           | one to many       |
//! | `<>`           | many to one       |
//! | `%$` `_%$` ... | LIKE              |
//! | `~` / `*~`     | regex / no case   |
//! | `>=` `<=` `>` `<` | comparison     |

pub mod ast;
pub mod config;
pub mod error;
pub mod fmt;
pub mod normalize;
pub mod parser;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::config::FormatToggles;
    pub use crate::error::*;
    pub use crate::fmt::{format_array_key, format_object_key, format_other_key};
    pub use crate::normalize::KeyNormalizer;
    pub use crate::parser::{Logic, LogicParser, PrefixLogic};
}

/// Parse a join reference key into an on-clause.
///
/// # Example
///
/// ```
/// use sigil::ast::{JoinSigil, RelationType};
///
/// let on = sigil::parse_on_key(JoinSigil::App, "Moment", "userId@").unwrap();
/// assert_eq!(on.key, "userId");
/// assert_eq!(on.relation, RelationType::Exact);
/// ```
pub fn parse_on_key(
    join_type: ast::JoinSigil,
    table: &str,
    raw_key: &str,
) -> Result<ast::OnClause, error::KeyError> {
    parser::parse_on_key(join_type, table, raw_key)
}

/// Normalize every key of a JSON tree.
pub fn normalize(tree: &serde_json::Value, toggles: &config::FormatToggles) -> serde_json::Value {
    normalize::normalize(tree, toggles)
}
