//! Decoded point of a delta-time array.

use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::Value;

/// A sensor reading with its resolved absolute timestamp
///
/// Serializes back to the wire shape `[ts, ...payload]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPoint {
    /// Unix timestamp in seconds
    pub ts: i64,
    /// Payload elements, copied verbatim from the encoded point
    pub payload: Vec<Value>,
}

impl DecodedPoint {
    #[must_use]
    pub const fn new(ts: i64, payload: Vec<Value>) -> Self {
        Self { ts, payload }
    }

    /// First payload element, the reading itself for single-value series
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.payload.first()
    }

    /// JSON array `[ts, ...payload]`
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut items = Vec::with_capacity(self.payload.len() + 1);
        items.push(Value::from(self.ts));
        items.extend(self.payload.iter().cloned());
        Value::Array(items)
    }
}

impl From<DecodedPoint> for Value {
    fn from(point: DecodedPoint) -> Self {
        let mut items = Vec::with_capacity(point.payload.len() + 1);
        items.push(Value::from(point.ts));
        items.extend(point.payload);
        Self::Array(items)
    }
}

impl Serialize for DecodedPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.payload.len() + 1))?;
        seq.serialize_element(&self.ts)?;
        for item in &self.payload {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}
