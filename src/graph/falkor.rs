use async_trait::async_trait;
use redis::{Value as RedisValue, aio::MultiplexedConnection};
use serde_json::Value;

use super::{GraphStore, GraphValue, QueryResult, StoreFactory, cypher};
use crate::{
    config::StoreConfig,
    error::{Error, Result},
    info,
};

/// FalkorDB graph reached over the Redis protocol.
///
/// One connection is opened per logical phase (ingest, read-back) and
/// dropped at the end of it.
pub struct FalkorStore {
    conn: MultiplexedConnection,
    graph: String,
}

impl FalkorStore {
    /// Opens a connection and selects the configured graph.
    ///
    /// # Errors
    ///
    /// [`Error::StoreUnavailable`] when the server cannot be reached or
    /// rejects the credentials; [`Error::Config`] for a malformed address.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        info!(
            "Connecting to FalkorDB at {}:{} as user '{}'...",
            config.host,
            config.port,
            config.username.as_deref().unwrap_or("default")
        );

        let client = redis::Client::open(config.connection_url())
            .map_err(|e| Error::Config(format!("invalid FalkorDB address: {e}")))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;

        Ok(Self {
            conn,
            graph: config.graph.clone(),
        })
    }
}

#[async_trait]
impl GraphStore for FalkorStore {
    async fn query(&mut self, statement: &str, params: &Value) -> Result<QueryResult> {
        let text = cypher::with_params(statement, params)?;
        let reply: RedisValue = redis::cmd("GRAPH.QUERY")
            .arg(self.graph.as_str())
            .arg(text)
            .query_async(&mut self.conn)
            .await?;
        parse_reply(reply)
    }
}

#[async_trait]
impl StoreFactory for StoreConfig {
    type Store = FalkorStore;

    async fn open(&self) -> Result<FalkorStore> {
        FalkorStore::connect(self).await
    }
}

fn convert(value: RedisValue) -> GraphValue {
    match value {
        RedisValue::Nil => GraphValue::Null,
        RedisValue::Int(i) => GraphValue::Integer(i),
        RedisValue::Double(d) => GraphValue::Double(d),
        RedisValue::Boolean(b) => GraphValue::Boolean(b),
        RedisValue::BulkString(bytes) => {
            GraphValue::Text(String::from_utf8_lossy(&bytes).into_owned())
        }
        RedisValue::SimpleString(s) => GraphValue::Text(s),
        RedisValue::Okay => GraphValue::Text("OK".to_string()),
        RedisValue::Array(items) | RedisValue::Set(items) => {
            GraphValue::List(items.into_iter().map(convert).collect())
        }
        other => GraphValue::Text(format!("{other:?}")),
    }
}

fn into_items(value: RedisValue, what: &str) -> Result<Vec<RedisValue>> {
    match value {
        RedisValue::Array(items) => Ok(items),
        other => Err(Error::Store(format!(
            "unexpected {what} in GRAPH.QUERY reply: {other:?}"
        ))),
    }
}

fn column_name(value: RedisValue) -> String {
    match convert(value) {
        // compact header entries are [type, name]
        GraphValue::List(mut parts) => parts.pop().map(|p| p.to_text()).unwrap_or_default(),
        other => other.to_text(),
    }
}

/// Parses a verbose `GRAPH.QUERY` reply.
///
/// Statements with a `RETURN` clause answer `[header, rows, stats]`; pure
/// writes answer `[stats]`.
pub fn parse_reply(reply: RedisValue) -> Result<QueryResult> {
    let mut sections = into_items(reply, "reply")?;
    let stats_section = sections.pop();

    let stats = match stats_section {
        Some(section) => into_items(section, "statistics")?
            .into_iter()
            .map(|s| convert(s).to_text())
            .collect(),
        None => Vec::new(),
    };

    let mut result = QueryResult {
        stats,
        ..QueryResult::default()
    };

    if sections.len() == 2 {
        let rows = sections.pop().map(|r| into_items(r, "rows")).transpose()?;
        let header = sections.pop().map(|h| into_items(h, "header")).transpose()?;

        result.columns = header
            .unwrap_or_default()
            .into_iter()
            .map(column_name)
            .collect();
        result.rows = rows
            .unwrap_or_default()
            .into_iter()
            .map(|row| into_items(row, "row").map(|cells| cells.into_iter().map(convert).collect()))
            .collect::<Result<Vec<_>>>()?;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulk(s: &str) -> RedisValue {
        RedisValue::BulkString(s.as_bytes().to_vec())
    }

    #[test]
    fn parses_write_only_reply() {
        let reply = RedisValue::Array(vec![RedisValue::Array(vec![
            bulk("Nodes created: 1"),
            bulk("Query internal execution time: 0.2 milliseconds"),
        ])]);
        let result = parse_reply(reply).unwrap();
        assert!(result.columns.is_empty());
        assert!(result.is_empty());
        assert_eq!(result.stats.len(), 2);
    }

    #[test]
    fn parses_rows_with_header() {
        let reply = RedisValue::Array(vec![
            RedisValue::Array(vec![bulk("t.title"), bulk("a.name")]),
            RedisValue::Array(vec![
                RedisValue::Array(vec![bulk("Song"), bulk("A")]),
                RedisValue::Array(vec![bulk("Other"), RedisValue::Nil]),
            ]),
            RedisValue::Array(vec![bulk("Cached execution: 0")]),
        ]);
        let result = parse_reply(reply).unwrap();
        assert_eq!(result.columns, vec!["t.title", "a.name"]);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0][1].as_str(), Some("A"));
        assert_eq!(result.rows[1][1], GraphValue::Null);
    }

    #[test]
    fn rejects_non_array_reply() {
        assert!(matches!(parse_reply(RedisValue::Okay), Err(Error::Store(_))));
    }
}
