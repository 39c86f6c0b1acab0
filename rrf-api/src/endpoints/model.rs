//! Object model queries.
//!
//! The controller's object model is a tree of named subtrees (`boards`,
//! `heat`, `state`, `volumes`, ...). A full dump is assembled one key at a
//! time: the controller fails requests when flooded, especially while a web
//! console is polling it too, so consecutive sub-queries are spaced by the
//! client's throttle interval.

use serde_json::{Map, Value};
use tokio::time::sleep;
use tracing::{debug, warn};

use rrf_core::constants::{endpoints, gcode, DEFAULT_MODEL_FLAGS, RESULT_KEY};
use rrf_core::error::{RrfError, RrfResult};

use crate::client::RrfClient;
use crate::reply::Reply;
use crate::transport::Transport;

/// Object model keys mapped to their values.
pub type ModelSnapshot = Map<String, Value>;

/// Extract the top-level key names from an `M409` reply.
///
/// The `result` may be an array of names or an object keyed by them.
pub fn model_keys(reply: &Reply) -> RrfResult<Vec<String>> {
    match reply.get(RESULT_KEY) {
        Some(Value::Array(items)) => Ok(items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()),
        Some(Value::Object(map)) => Ok(map.keys().cloned().collect()),
        _ => Err(RrfError::Protocol(format!(
            "object model key list unavailable, reply was: {reply}"
        ))),
    }
}

/// Value of `result` in a per-key reply, `null` when absent.
fn result_value(key: &str, reply: Reply) -> Value {
    match reply {
        Reply::Structured(Value::Object(mut map)) => map.remove(RESULT_KEY).unwrap_or(Value::Null),
        other => {
            warn!("object model key '{key}' returned a non-JSON reply: {other}");
            Value::Null
        }
    }
}

impl<T: Transport> RrfClient<T> {
    /// Query the object model through `M409`.
    ///
    /// With a key, issues one verbose query for that key. Without, asks for
    /// the top-level keys first and then queries each, spaced by the
    /// throttle interval. A key whose reply timed out maps to `null`.
    pub async fn query_model(&self, key: Option<&str>) -> RrfResult<ModelSnapshot> {
        let keys = match key {
            Some(k) => vec![k.to_string()],
            None => {
                let listing = self.gcode(gcode::MODEL_QUERY).await?;
                model_keys(&listing)?
            }
        };
        debug!("querying object model keys: {keys:?}");

        let mut snapshot = ModelSnapshot::new();
        for (i, k) in keys.iter().enumerate() {
            if i > 0 {
                sleep(self.throttle()).await;
            }
            let reply = self.gcode_expect(&gcode::model_key(k), RESULT_KEY).await?;
            snapshot.insert(k.clone(), result_value(k, reply));
        }

        Ok(snapshot)
    }

    /// Current machine state (`state` subtree of the object model).
    pub async fn status(&self) -> RrfResult<Value> {
        let mut snapshot = self.query_model(Some("state")).await?;
        Ok(snapshot.remove("state").unwrap_or(Value::Null))
    }

    /// Query the object model directly through `/rr_model`.
    ///
    /// `flags` defaults to verbose ("v").
    pub async fn model(&self, key: &str, flags: Option<&str>) -> RrfResult<Reply> {
        let flags = flags.unwrap_or(DEFAULT_MODEL_FLAGS);
        self.get(endpoints::MODEL, &[("key", key), ("flags", flags)])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_keys_from_array() {
        let reply = Reply::Structured(json!({"key": "", "flags": "", "result": ["state", "volumes"]}));
        assert_eq!(model_keys(&reply).unwrap(), vec!["state", "volumes"]);
    }

    #[test]
    fn test_model_keys_from_object() {
        let reply = Reply::Structured(json!({"result": {"boards": [], "heat": {}}}));
        assert_eq!(model_keys(&reply).unwrap(), vec!["boards", "heat"]);
    }

    #[test]
    fn test_model_keys_missing() {
        assert!(matches!(
            model_keys(&Reply::empty()),
            Err(RrfError::Protocol(_))
        ));
        assert!(model_keys(&Reply::Structured(json!({"result": null}))).is_err());
    }

    #[test]
    fn test_result_value() {
        let reply = Reply::Structured(json!({"key": "state", "result": {"status": "idle"}}));
        assert_eq!(result_value("state", reply), json!({"status": "idle"}));
        assert_eq!(result_value("state", Reply::Structured(json!({"result": null}))), Value::Null);
        assert_eq!(result_value("state", Reply::Text("Error".into())), Value::Null);
    }
}
