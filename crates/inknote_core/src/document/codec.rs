//! Stroke codec contract and JSON reference implementation.

use crate::model::stroke::{Drawing, Stroke};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CodecResult<T> = Result<T, CodecError>;

/// Codec failure. Decode failures are swallowed by document loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    Encode(String),
    Decode(String),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(message) => write!(f, "failed to encode drawing: {message}"),
            Self::Decode(message) => write!(f, "failed to decode drawing: {message}"),
        }
    }
}

impl Error for CodecError {}

/// Byte encoding of a whole drawing.
///
/// Implementations own the stroke format; core only moves the bytes.
pub trait StrokeCodec {
    fn encode(&self, drawing: &Drawing) -> CodecResult<Vec<u8>>;
    fn decode(&self, bytes: &[u8]) -> CodecResult<Drawing>;
}

const JSON_FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct JsonDrawingRef<'a> {
    version: u32,
    strokes: &'a [Stroke],
}

#[derive(Deserialize)]
struct JsonDrawingOwned {
    version: u32,
    strokes: Vec<Stroke>,
}

/// Versioned JSON envelope: `{"version":1,"strokes":[{"id":..,"payload":[..]}]}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStrokeCodec;

impl StrokeCodec for JsonStrokeCodec {
    fn encode(&self, drawing: &Drawing) -> CodecResult<Vec<u8>> {
        serde_json::to_vec(&JsonDrawingRef {
            version: JSON_FORMAT_VERSION,
            strokes: drawing.strokes(),
        })
        .map_err(|err| CodecError::Encode(err.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Drawing> {
        let parsed: JsonDrawingOwned =
            serde_json::from_slice(bytes).map_err(|err| CodecError::Decode(err.to_string()))?;
        if parsed.version != JSON_FORMAT_VERSION {
            return Err(CodecError::Decode(format!(
                "unsupported drawing format version {}",
                parsed.version
            )));
        }
        Ok(Drawing::from_strokes(parsed.strokes))
    }
}
