//! Decoding functionality for delta-time arrays.

use serde_json::Value;

use crate::error::DecodeError;
use crate::point::DecodedPoint;
use crate::value::{to_integer, type_name};

/// Output ordering and filtering for [`decode`]
///
/// The default sorts ascending by timestamp and keeps duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Stable-sort points by resolved timestamp
    pub sort: bool,
    /// Sort descending instead of ascending (ignored unless `sort`)
    pub reverse: bool,
    /// Drop points whose timestamp equals the previously emitted one
    pub filter_duplicates: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            sort: true,
            reverse: false,
            filter_duplicates: false,
        }
    }
}

impl DecodeOptions {
    #[must_use]
    pub const fn with_sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub const fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    #[must_use]
    pub const fn with_filter_duplicates(mut self, filter_duplicates: bool) -> Self {
        self.filter_duplicates = filter_duplicates;
        self
    }
}

/// Decode a delta-time array into points with absolute timestamps
///
/// # Arguments
/// * `series` - JSON array of points; each point is an array whose first element is
///   a positive absolute timestamp, a negative delta in seconds, or the zero sentinel
/// * `opts` - sort order and duplicate filtering
///
/// # Returns
/// * `Ok(Vec<DecodedPoint>)` - Decoded points, possibly empty
/// * `Err(DecodeError)` - The series or one of its points is malformed; nothing is returned
///
/// # Example
/// ```
/// use serde_json::json;
/// use zont_api::{decode, DecodeOptions};
///
/// let series = json!([[1030, 1], [-10, 2], [1000, 3]]);
/// let points = decode(&series, DecodeOptions::default().with_sort(false)).unwrap();
/// let stamps: Vec<i64> = points.iter().map(|p| p.ts).collect();
/// assert_eq!(stamps, vec![1030, 1040, 1000]);
/// ```
#[must_use = "decoding returns points that should be used"]
pub fn decode(series: &Value, opts: DecodeOptions) -> Result<Vec<DecodedPoint>, DecodeError> {
    let elements = match series {
        Value::Array(elements) => elements,
        other => {
            return Err(DecodeError::NotAnArray {
                found: type_name(other),
            })
        }
    };

    let mut result: Vec<DecodedPoint> = Vec::with_capacity(elements.len());
    let mut latest_anchor = 0i64;
    let mut running = 0i64;

    for (index, element) in elements.iter().enumerate() {
        let fields = match element {
            Value::Array(fields) => fields,
            other => {
                return Err(DecodeError::ElementNotAnArray {
                    index,
                    found: type_name(other),
                })
            }
        };

        let (head, payload) = fields
            .split_first()
            .ok_or(DecodeError::EmptyElement { index })?;
        let stamp_or_delta = to_integer(head)
            .map_err(|reason| DecodeError::InvalidTimestamp { index, reason })?;

        match stamp_or_delta {
            // Absolute timestamp
            s if s > 0 => {
                latest_anchor = s;
                running = latest_anchor;
            }
            // Delta from the previous point
            d if d < 0 => {
                running = running
                    .checked_add_unsigned(d.unsigned_abs())
                    .ok_or(DecodeError::TimestampOverflow { index })?;
            }
            _ => {
                tracing::trace!(index, "skipping zero sentinel");
                continue;
            }
        }

        if opts.filter_duplicates && result.last().is_some_and(|prev| prev.ts == running) {
            tracing::debug!(
                index,
                ts = running,
                anchor = latest_anchor,
                "dropping duplicate point"
            );
            continue;
        }

        result.push(DecodedPoint::new(running, payload.to_vec()));
    }

    if opts.sort {
        // sort_by_key is stable, ties keep decode order
        if opts.reverse {
            result.sort_by_key(|p| std::cmp::Reverse(p.ts));
        } else {
            result.sort_by_key(|p| p.ts);
        }
    }

    Ok(result)
}

/// Decode a delta-time array and return it in wire shape, `[[ts, ...payload], ...]`
///
/// # Errors
/// Same as [`decode`].
pub fn decode_json(series: &Value, opts: DecodeOptions) -> Result<Value, DecodeError> {
    let points = decode(series, opts)?;
    Ok(Value::Array(points.into_iter().map(Value::from).collect()))
}
