pub mod input;
pub mod item_ids;
pub mod model_server;
pub mod ranker;

use std::time::Instant;
use tracing::{debug, info};

use crate::context::InvocationContext;
use crate::error::Result;

pub use input::process_input;
pub use item_ids::{extract_item_ids, one_hot_index, ItemId, ONE_HOT_FIELD};
pub use model_server::{HttpModelServer, ModelServer};
pub use ranker::{by_prediction_desc, pair, parse_predictions, rank, serialize_ranked, RankedPrediction};

/// Serialized ranking plus the content type to reply with
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationOutput {
    pub body: String,
    pub content_type: String,
}

/// Handle one inference request.
///
/// normalize -> extract item ids -> call model -> pair -> sort -> serialize.
/// Every failure is returned to the caller; the model server is called at
/// most once and only after the input has been validated.
pub async fn handle(
    data: &[u8],
    ctx: &InvocationContext,
    model_server: &dyn ModelServer,
) -> Result<InvocationOutput> {
    let processed_input = process_input(data, ctx)?;
    let item_ids = extract_item_ids(&processed_input)?;
    debug!(instances = item_ids.len(), "Extracted item ids");

    let start = Instant::now();
    let content = model_server.invoke(&ctx.rest_uri, &processed_input).await?;
    let model_ms = start.elapsed().as_millis() as u64;

    let predictions = parse_predictions(&content)?;
    let ranked = rank(&item_ids, &predictions)?;

    info!(
        instances = ranked.len(),
        model_ms,
        top_item = ranked.first().map(|r| r.item_id),
        "Ranked model predictions"
    );

    Ok(InvocationOutput {
        body: serialize_ranked(&ranked)?,
        content_type: ctx.response_content_type(),
    })
}
