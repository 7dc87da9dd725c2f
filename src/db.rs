use crate::object_id::ObjectId;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection};
use serde_json::{Map, Value};
use std::sync::Mutex;
use thiserror::Error;

const SCHEMA: &str = include_str!("schema.sql");

pub type Document = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("corrupt document {id}: {source}")]
    Corrupt {
        id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("document must be a JSON object")]
    NotAnObject,
    #[error("connection lock poisoned")]
    Poisoned,
}

/// A document as read back from a collection, with its native identifier
/// kept apart from the body.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: ObjectId,
    pub body: Document,
}

impl StoredDocument {
    /// Replaces the native identifier with a plain string `id` field.
    pub fn into_public(self) -> Document {
        let mut body = self.body;
        body.insert("id".into(), Value::String(self.id.to_string()));
        body
    }
}

/// Conjunction of field-equality conditions. An empty filter matches all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions.push((field.to_string(), value.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }
}

/// Sorting and limiting for `find`. By default documents come back in
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    /// Sort by object id, descending.
    pub newest_first: bool,
    pub limit: Option<u32>,
}

impl FindOptions {
    pub fn newest_first(limit: u32) -> Self {
        FindOptions {
            newest_first: true,
            limit: Some(limit),
        }
    }
}

pub trait DocumentStore: Send + Sync {
    fn name(&self) -> &str;

    fn insert_one(&self, collection: &str, doc: Document) -> Result<ObjectId, StoreError>;

    fn insert_many(&self, collection: &str, docs: Vec<Document>) -> Result<Vec<ObjectId>, StoreError>;

    fn find(
        &self,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    fn count_documents(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError>;

    fn list_collection_names(&self) -> Result<Vec<String>, StoreError>;
}

/// SQLite-backed document store. Each document is a JSON body in the
/// `documents` table, keyed by collection and object id.
pub struct Db {
    name: String,
    conn: Mutex<Connection>,
}

impl Db {
    pub fn open(path: &str, name: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA busy_timeout=5000;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Db {
            name: name.to_string(),
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Db {
            name: "memory".to_string(),
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StoreError>,
    {
        let mut conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        f(&mut conn)
    }
}

fn to_sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(*b as i64),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        // compared as their JSON text, which is what json_extract yields
        other => SqlValue::Text(other.to_string()),
    }
}

/// Builds the `WHERE` clause and its bound parameters. Field paths are bound
/// as parameters, never spliced into the SQL.
fn where_clause(collection: &str, filter: &Filter) -> (String, Vec<SqlValue>) {
    let mut sql = String::from("collection = ?");
    let mut values = vec![SqlValue::Text(collection.to_string())];

    for (field, expected) in filter.conditions() {
        let path = SqlValue::Text(format!("$.\"{}\"", field.replace('"', "\\\"")));
        if expected.is_null() {
            sql.push_str(" AND json_extract(body, ?) IS NULL");
            values.push(path);
        } else {
            sql.push_str(" AND json_type(body, ?) = ? AND json_extract(body, ?) = ?");
            values.push(path.clone());
            values.push(SqlValue::Text(json_type_name(expected).to_string()));
            values.push(path);
            values.push(to_sql_value(expected));
        }
    }
    (sql, values)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(true) => "true",
        Value::Bool(false) => "false",
        Value::Number(n) if n.is_f64() => "real",
        Value::Number(_) => "integer",
        Value::String(_) => "text",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn encode_body(doc: &Document) -> Result<String, StoreError> {
    serde_json::to_string(doc).map_err(|_| StoreError::NotAnObject)
}

fn decode_row(id: String, body: String) -> Result<StoredDocument, StoreError> {
    let object_id = ObjectId::parse_str(&id).map_err(|_| StoreError::Corrupt {
        id: id.clone(),
        source: serde::de::Error::custom("malformed object id"),
    })?;
    let value: Value =
        serde_json::from_str(&body).map_err(|source| StoreError::Corrupt { id: id.clone(), source })?;
    match value {
        Value::Object(body) => Ok(StoredDocument {
            id: object_id,
            body,
        }),
        _ => Err(StoreError::NotAnObject),
    }
}

impl DocumentStore for Db {
    fn name(&self) -> &str {
        &self.name
    }

    fn insert_one(&self, collection: &str, mut doc: Document) -> Result<ObjectId, StoreError> {
        doc.remove("_id");
        let id = ObjectId::new();
        let body = encode_body(&doc)?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO documents (id, collection, body) VALUES (?1, ?2, ?3)",
                params![id.to_string(), collection, body],
            )?;
            Ok(id)
        })
    }

    fn insert_many(&self, collection: &str, docs: Vec<Document>) -> Result<Vec<ObjectId>, StoreError> {
        let mut rows = Vec::with_capacity(docs.len());
        for mut doc in docs {
            doc.remove("_id");
            rows.push((ObjectId::new(), encode_body(&doc)?));
        }

        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt =
                    tx.prepare("INSERT INTO documents (id, collection, body) VALUES (?1, ?2, ?3)")?;
                for (id, body) in &rows {
                    stmt.execute(params![id.to_string(), collection, body])?;
                }
            }
            tx.commit()?;
            Ok(rows.into_iter().map(|(id, _)| id).collect())
        })
    }

    fn find(
        &self,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let (clause, mut values) = where_clause(collection, filter);
        let order = if options.newest_first { "id DESC" } else { "rowid ASC" };
        let mut sql = format!("SELECT id, body FROM documents WHERE {} ORDER BY {}", clause, order);
        if let Some(limit) = options.limit {
            sql.push_str(" LIMIT ?");
            values.push(SqlValue::Integer(limit as i64));
        }

        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;

            let mut docs = Vec::new();
            for row in rows {
                let (id, body) = row?;
                docs.push(decode_row(id, body)?);
            }
            Ok(docs)
        })
    }

    fn count_documents(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let (clause, values) = where_clause(collection, filter);
        let sql = format!("SELECT COUNT(*) FROM documents WHERE {}", clause);
        self.with_conn(|conn| {
            let count: i64 = conn.query_row(&sql, params_from_iter(values.iter()), |row| row.get(0))?;
            Ok(count as u64)
        })
    }

    fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT DISTINCT collection FROM documents ORDER BY collection")?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

            let mut names = Vec::new();
            for row in rows {
                names.push(row?);
            }
            Ok(names)
        })
    }
}
