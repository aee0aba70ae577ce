//! Item id extraction from one-hot encoded instances

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{AppError, Result};

/// Instance field holding the one-hot encoded item
pub const ONE_HOT_FIELD: &str = "input_2";

/// Zero-based index of the hot entry in an instance's one-hot vector
pub type ItemId = usize;

#[derive(Debug, Deserialize)]
struct InstancesRequest {
    instances: Vec<Map<String, Value>>,
}

/// Decode one item id per instance, in instance order
pub fn extract_item_ids(json: &str) -> Result<Vec<ItemId>> {
    let request: InstancesRequest = serde_json::from_str(json)?;

    request
        .instances
        .iter()
        .enumerate()
        .map(|(instance, fields)| item_id_for(instance, fields))
        .collect()
}

fn item_id_for(instance: usize, fields: &Map<String, Value>) -> Result<ItemId> {
    let values = fields
        .get(ONE_HOT_FIELD)
        .ok_or_else(|| {
            AppError::InvalidJson(format!(
                "instance {} is missing field `{}`",
                instance, ONE_HOT_FIELD
            ))
        })?
        .as_array()
        .ok_or_else(|| {
            AppError::InvalidJson(format!(
                "field `{}` of instance {} is not an array",
                ONE_HOT_FIELD, instance
            ))
        })?;

    let item_id = one_hot_index(values).ok_or(AppError::ValueNotFound { instance })?;

    if values.iter().filter(|v| is_hot(v)).count() > 1 {
        warn!(
            instance,
            item_id, "One-hot vector has more than one hot entry, using the first"
        );
    }

    Ok(item_id)
}

/// Index of the first entry equal to 1, if any
pub fn one_hot_index(values: &[Value]) -> Option<usize> {
    values.iter().position(is_hot)
}

fn is_hot(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::Bool(b) => *b,
        _ => false,
    }
}
