//! Re-ranking of model scores by item id

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::item_ids::ItemId;
use crate::error::{AppError, Result};

/// Item id paired with its predicted relevance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPrediction {
    pub item_id: ItemId,
    pub prediction: f64,
}

#[derive(Debug, Deserialize)]
struct PredictionsResponse {
    predictions: Vec<Vec<f64>>,
}

#[derive(Debug, Serialize)]
struct RankedResponse<'a> {
    predictions: &'a [RankedPrediction],
}

/// Parse a model server body of the form `{"predictions": [[score, ...], ...]}`
pub fn parse_predictions(content: &[u8]) -> Result<Vec<Vec<f64>>> {
    let text = std::str::from_utf8(content)
        .map_err(|e| AppError::InvalidModelResponse(e.to_string()))?;
    let response: PredictionsResponse = serde_json::from_str(text)
        .map_err(|e| AppError::InvalidModelResponse(e.to_string()))?;
    Ok(response.predictions)
}

/// Pair each item id with the first score of the prediction at the same position
pub fn pair(item_ids: &[ItemId], predictions: &[Vec<f64>]) -> Result<Vec<RankedPrediction>> {
    if item_ids.len() != predictions.len() {
        return Err(AppError::PredictionCountMismatch {
            instances: item_ids.len(),
            predictions: predictions.len(),
        });
    }

    item_ids
        .iter()
        .zip(predictions)
        .enumerate()
        .map(|(instance, (&item_id, scores))| {
            let prediction = *scores
                .first()
                .ok_or(AppError::EmptyPrediction { instance })?;
            Ok(RankedPrediction {
                item_id,
                prediction,
            })
        })
        .collect()
}

/// Orders predictions from highest to lowest score
pub fn by_prediction_desc(a: &RankedPrediction, b: &RankedPrediction) -> Ordering {
    b.prediction.total_cmp(&a.prediction)
}

/// Pair and sort. Equal scores keep their instance order.
pub fn rank(item_ids: &[ItemId], predictions: &[Vec<f64>]) -> Result<Vec<RankedPrediction>> {
    let mut ranked = pair(item_ids, predictions)?;
    ranked.sort_by(by_prediction_desc);
    Ok(ranked)
}

/// Serialize as `{"predictions": [{"item_id": .., "prediction": ..}, ...]}`
pub fn serialize_ranked(ranked: &[RankedPrediction]) -> Result<String> {
    serde_json::to_string(&RankedResponse { predictions: ranked })
        .map_err(|e| AppError::Internal(e.to_string()))
}
