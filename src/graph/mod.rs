//! # Graph Store Module
//!
//! Everything that touches the property graph lives here:
//!
//! - [`GraphStore`] - one parameterised statement per call, i.e. one round trip
//! - [`FalkorStore`] - FalkorDB over the Redis protocol
//! - [`cypher`] - rendering of JSON parameters as Cypher literals
//! - [`PlaylistRepository`] - batched playlist persistence and read-back
//!
//! ## Graph Layout
//!
//! ```text
//! (:Playlist {id, name, description})
//!     -[:CONTAINS {position}]->
//! (:Track {id, title, duration, popularity})
//!     -[:BELONGS_TO]-> (:Album {id, name, release_date, image})
//!     -[:PERFORMED_BY {position}]-> (:Artist {id, name})
//! ```
//!
//! Every write uses `MERGE`, so saving the same playlist twice leaves the
//! same nodes and relationships as saving it once.

pub mod cypher;
mod falkor;
mod repository;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use falkor::{FalkorStore, parse_reply};
pub use repository::{PlaylistBatch, PlaylistRepository, group_songs, statements};

/// A single value from a query result row.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphValue {
    Null,
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Text(String),
    List(Vec<GraphValue>),
}

impl GraphValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            GraphValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view; verbose replies may carry numbers as text.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            GraphValue::Integer(i) => Some(*i),
            GraphValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Text rendering used for display columns; `Null` becomes empty.
    pub fn to_text(&self) -> String {
        match self {
            GraphValue::Null => String::new(),
            GraphValue::Integer(i) => i.to_string(),
            GraphValue::Double(d) => d.to_string(),
            GraphValue::Boolean(b) => b.to_string(),
            GraphValue::Text(s) => s.clone(),
            GraphValue::List(items) => items
                .iter()
                .map(GraphValue::to_text)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Columns, rows and execution statistics of one statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<GraphValue>>,
    pub stats: Vec<String>,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Narrow seam over the graph database.
///
/// `params` is a JSON object whose keys are referenced as `$key` in the
/// statement; `Value::Null` means no parameters.
#[async_trait]
pub trait GraphStore: Send {
    async fn query(&mut self, statement: &str, params: &Value) -> Result<QueryResult>;
}

#[async_trait]
impl<S: GraphStore + ?Sized> GraphStore for Box<S> {
    async fn query(&mut self, statement: &str, params: &Value) -> Result<QueryResult> {
        (**self).query(statement, params).await
    }
}

/// Opens a fresh store connection for one logical phase.
#[async_trait]
pub trait StoreFactory: Send + Sync {
    type Store: GraphStore;

    async fn open(&self) -> Result<Self::Store>;
}
