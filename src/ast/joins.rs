use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ast::{JoinSigil, RelationType};
use crate::error::{KeyError, KeyResult};
use crate::parser::{self, LogicParser, tokens};

/// One condition linking a field of the joined table to the parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnClause {
    pub negated: bool,
    pub relation: RelationType,
    pub key: String,
}

impl OnClause {
    /// See [`parser::parse_on_key`].
    pub fn parse(join_type: JoinSigil, table: &str, raw_key: &str) -> KeyResult<Self> {
        parser::parse_on_key(join_type, table, raw_key)
    }
}

/// The other side of an on-clause, e.g. `/Moment:main/userId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRef {
    pub table: String,
    pub alias: Option<String>,
    pub key: String,
}

impl TargetRef {
    /// Parse a reference path. Only the last two segments are read.
    pub fn parse(path: &str) -> Option<Self> {
        let (table, alias, key) = tokens::split_target_ref(path)?;
        Some(Self {
            table: table.to_string(),
            alias: alias.map(str::to_string),
            key: key.to_string(),
        })
    }

    /// `Table` or `Table:alias`
    pub fn table_key(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{}:{}", self.table, alias),
            None => self.table.clone(),
        }
    }
}

/// An on-clause together with the request entry it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinOn {
    /// `id@`
    pub origin_key: String,
    /// `/Moment/userId`
    pub origin_value: String,
    pub clause: OnClause,
    pub target: TargetRef,
}

/// A join configuration, handed to the SQL builder and the cache layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinConfig {
    /// `/User/id@`
    pub path: String,
    pub join_type: JoinSigil,
    pub table: String,
    pub alias: Option<String>,
    /// Rows to return for an app join, 1 by default.
    pub count: u32,
    pub on_list: Vec<OnClause>,
}

impl JoinConfig {
    /// Create a join config. `join_type` is the textual sigil, `""` meaning full join.
    pub fn new(path: impl Into<String>, join_type: &str, table: impl Into<String>) -> KeyResult<Self> {
        let path = path.into();
        let table = table.into();
        let join_type = JoinSigil::parse(join_type).map_err(|e| e.at(&table, &path))?;

        Ok(Self {
            path,
            join_type,
            table,
            alias: None,
            count: 1,
            on_list: Vec::new(),
        })
    }

    /// Parse a join entry such as `</User:owner/id@` or `/Order[]/id@`.
    ///
    /// The first character is the sigil unless the entry starts with `/`,
    /// which means a full join. The table key is the first path segment.
    pub fn parse(entry: &str) -> KeyResult<Self> {
        let (join_type, path) = match entry.chars().next() {
            Some('/') | None => (JoinSigil::Full, entry),
            Some(c) => (
                JoinSigil::try_from(c).map_err(|e| e.at("", entry))?,
                &entry[c.len_utf8()..],
            ),
        };

        let segment = path
            .trim_start_matches('/')
            .split('/')
            .next()
            .unwrap_or_default();
        let table_key = segment.strip_suffix("[]").unwrap_or(segment);

        let invalid = || KeyError::InvalidIdentifier {
            join_type: join_type.as_str().to_string(),
            table: table_key.to_string(),
            key: entry.to_string(),
            name: table_key.to_string(),
        };

        if table_key.is_empty() {
            return Err(KeyError::malformed(
                join_type.as_str(),
                "",
                entry,
                "join path must start with a table, e.g. \"</User\"",
            ));
        }

        let (rest, (table, alias)) = tokens::parse_table_key(table_key).map_err(|_| invalid())?;
        if !rest.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            path: path.to_string(),
            join_type,
            table: table.to_string(),
            alias: alias.map(str::to_string),
            count: 1,
            on_list: Vec::new(),
        })
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Parse a reference key and append its on-clause.
    pub fn push_on_key(&mut self, raw_key: &str) -> KeyResult<&OnClause> {
        let on = parser::parse_on_key(self.join_type, &self.table, raw_key)?;
        self.on_list.push(on);
        Ok(&self.on_list[self.on_list.len() - 1])
    }

    /// Bind the joined table's request object, e.g. `{ "id@": "/Moment/userId", "name~": "a" }`.
    ///
    /// Every `key@` entry becomes an on-clause and is appended to `on_list`.
    /// Other entries are plain conditions and are left to the SQL builder.
    pub fn bind_request(
        &mut self,
        request: &Map<String, Value>,
        logic: &dyn LogicParser,
    ) -> KeyResult<Vec<JoinOn>> {
        let mut bound = Vec::new();

        for (key, value) in request {
            if !key.ends_with('@') {
                continue;
            }

            let malformed = |reason: &str| {
                KeyError::malformed(self.join_type.as_str(), &self.table, key, reason)
            };

            let Some(path) = value.as_str() else {
                return Err(malformed("ref value must be a path string like \"/Moment/userId\""));
            };
            let target = TargetRef::parse(path)
                .ok_or_else(|| malformed("ref value must end with /Table[:alias]/key"))?;
            let clause = parser::parse_on_key_with(self.join_type, &self.table, key, logic)?;

            bound.push(JoinOn {
                origin_key: key.clone(),
                origin_value: path.to_string(),
                clause,
                target,
            });
        }

        self.on_list.extend(bound.iter().map(|on| on.clause.clone()));
        Ok(bound)
    }

    /// May return more than one row.
    ///
    /// A one-to-one config whose path contains `[]` still reports one-to-many;
    /// callers must not pass such paths for one-to-one joins.
    pub fn is_one_to_many(&self) -> bool {
        self.count != 1 || self.path.contains("[]")
    }

    pub fn is_one_to_one(&self) -> bool {
        !self.is_one_to_many()
    }

    pub fn is_app_join(&self) -> bool {
        self.join_type.is_app_join()
    }

    pub fn is_sql_join(&self) -> bool {
        self.join_type.is_sql_join()
    }

    pub fn is_left_join(&self) -> bool {
        self.join_type.is_left_join()
    }

    pub fn is_right_join(&self) -> bool {
        self.join_type.is_right_join()
    }

    pub fn is_left_or_right_join(&self) -> bool {
        self.join_type.is_left_or_right_join()
    }

    pub fn is_cross_join(&self) -> bool {
        self.join_type.is_cross_join()
    }

    pub fn is_inner_join(&self) -> bool {
        self.join_type.is_inner_join()
    }

    pub fn is_full_join(&self) -> bool {
        self.join_type.is_full_join()
    }

    pub fn is_outer_join(&self) -> bool {
        self.join_type.is_outer_join()
    }

    pub fn is_side_join(&self) -> bool {
        self.join_type.is_side_join()
    }

    pub fn is_anti_join(&self) -> bool {
        self.join_type.is_anti_join()
    }

    pub fn is_foreign_join(&self) -> bool {
        self.join_type.is_foreign_join()
    }

    pub fn is_asof_join(&self) -> bool {
        self.join_type.is_asof_join()
    }

    pub fn can_cache_vice_table(&self) -> bool {
        self.join_type.can_cache_vice_table()
    }
}
