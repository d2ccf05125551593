//! Decoding of Binance-style diff-depth messages into delta batches.
//!
//! Accepts both the raw stream payload
//! (`{"e":"depthUpdate","E":..,"s":..,"U":..,"u":..,"b":[..],"a":[..]}`) and
//! the combined-stream wrapper (`{"stream":..,"data":{..}}`). Prices and
//! quantities may be JSON strings (as Binance sends them) or numbers; numbers
//! are read from their literal digits, never through `f64`.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use crate::{
    common::Side,
    delta::{self, Delta},
    error::FeedError,
    report::Rejection,
};

/// Levels are kept as raw JSON values so that numeric prices reach the
/// decimal parser with their original digits.
type RawLevels = Vec<(Value, Value)>;

#[derive(Debug, Deserialize)]
struct RawDepth {
    #[serde(rename = "e")]
    event_type: Option<String>,
    #[serde(rename = "E")]
    event_time: Option<i64>,
    #[serde(rename = "s")]
    symbol: Option<String>,
    #[serde(rename = "U")]
    first_update_id: Option<u64>,
    #[serde(rename = "u")]
    final_update_id: Option<u64>,
    #[serde(rename = "b")]
    bids: Option<RawLevels>,
    #[serde(rename = "a")]
    asks: Option<RawLevels>,
}

fn level_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Strips the combined-stream wrapper, if present
fn payload(mut message: Value) -> Value {
    if message.get("stream").is_some() {
        if let Some(data) = message.get_mut("data") {
            return data.take();
        }
    }
    message
}

/// One decoded depth message, ready for
/// [`OrderBook::apply_update`](crate::book::OrderBook::apply_update).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DepthBatch {
    pub symbol: Option<String>,
    pub event_time: Option<DateTime<Utc>>,
    pub first_update_id: Option<u64>,
    pub final_update_id: Option<u64>,
    pub bids: Vec<Delta>,
    pub asks: Vec<Delta>,
    /// Levels dropped during decoding; their neighbours are kept
    pub rejected: Vec<Rejection>,
}

fn decode_side(side: Side, raw: RawLevels, rejected: &mut Vec<Rejection>) -> Vec<Delta> {
    raw.iter()
        .enumerate()
        .filter_map(|(index, (price, quantity))| {
            match delta::parse(&level_text(price), &level_text(quantity)) {
                Ok(delta) => Some(delta),
                Err(error) => {
                    rejected.push(Rejection { side, index, error });
                    None
                }
            }
        })
        .collect()
}

/// Decodes one message.
///
/// Returns `Ok(None)` for messages that carry no depth (subscription acks,
/// other event types) and an error only if `text` is not a JSON object of
/// the expected shape.
pub fn decode(text: &str) -> Result<Option<DepthBatch>, FeedError> {
    let message: Value = serde_json::from_str(text)?;
    let raw: RawDepth = serde_json::from_value(payload(message))?;

    if let Some(event_type) = raw.event_type.as_deref() {
        if event_type != "depthUpdate" {
            trace!(event_type, "skipping non-depth message");
            return Ok(None);
        }
    }
    if raw.bids.is_none() && raw.asks.is_none() {
        return Ok(None);
    }

    let mut rejected = Vec::new();
    let bids = decode_side(Side::Bid, raw.bids.unwrap_or_default(), &mut rejected);
    let asks = decode_side(Side::Ask, raw.asks.unwrap_or_default(), &mut rejected);

    Ok(Some(DepthBatch {
        symbol: raw.symbol,
        event_time: raw.event_time.and_then(DateTime::from_timestamp_millis),
        first_update_id: raw.first_update_id,
        final_update_id: raw.final_update_id,
        bids,
        asks,
        rejected,
    }))
}
