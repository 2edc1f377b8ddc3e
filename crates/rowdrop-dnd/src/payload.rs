#![forbid(unsafe_code)]

//! Transferable drag payload and its wire codec.
//!
//! Implements encode/decode for the `RDL1` binary payload format:
//!
//! ```text
//! +---------+-----------+--------------------------------------+
//! | tag (4) | count (4) | (len (4), utf8-bytes (len)) × count  |
//! +---------+-----------+--------------------------------------+
//! ```
//!
//! - **tag**: fixed format identifier, validated before anything else is
//!   read.
//! - **count**: big-endian `u32` number of items.
//! - **items**: each a big-endian `u32` byte length followed by that many
//!   UTF-8 bytes.
//!
//! Only textual identity crosses the wire — never an index. Positions
//! shift between encode and decode, so the drop side re-resolves every
//! identity against the collection's state at decode time.

use core::fmt;

use rowdrop_model::Item;

/// Fixed format identifier opening every payload blob.
pub const PAYLOAD_TAG: [u8; 4] = *b"RDL1";

/// Blob header size: 4-byte tag + 4-byte item count.
pub const HEADER_LEN: usize = 8;

// ---------------------------------------------------------------------------
// Codec errors
// ---------------------------------------------------------------------------

/// Errors produced while encoding or decoding a payload blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The blob is not in the `RDL1` format: the tag is missing or
    /// unrecognized, or an item's bytes are not valid UTF-8.
    FormatMismatch,
    /// The blob ends before the declared count/items are fully read.
    Truncated {
        /// Bytes needed to finish the read in progress.
        expected: usize,
        /// Bytes actually present.
        available: usize,
    },
    /// An item's text does not fit the `u32` length prefix (encode side).
    ItemTooLarge { len: usize },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FormatMismatch => write!(f, "payload format mismatch"),
            Self::Truncated {
                expected,
                available,
            } => {
                write!(
                    f,
                    "truncated payload: expected {expected} bytes, got {available}"
                )
            }
            Self::ItemTooLarge { len } => {
                write!(f, "item too large for length prefix: {len} bytes")
            }
        }
    }
}

impl std::error::Error for CodecError {}

// ---------------------------------------------------------------------------
// DragPayload
// ---------------------------------------------------------------------------

/// The identities captured from the source selection at drag-begin time.
///
/// Items are kept in selection order, which is not necessarily collection
/// order; the relative order of a multi-item drop follows this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    items: Vec<Item>,
}

impl DragPayload {
    /// Capture a payload from the given identities.
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// The captured identities, in selection order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of captured identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the payload carries no identities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Serialize the payload into a transferable blob.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let body_len: usize = self.items.iter().map(|i| 4 + i.len()).sum();
        let mut blob = Vec::with_capacity(HEADER_LEN + body_len);
        blob.extend_from_slice(&PAYLOAD_TAG);
        blob.extend_from_slice(&(self.items.len() as u32).to_be_bytes());
        for item in &self.items {
            let len = item.len();
            let prefix = u32::try_from(len).map_err(|_| CodecError::ItemTooLarge { len })?;
            blob.extend_from_slice(&prefix.to_be_bytes());
            blob.extend_from_slice(item.as_str().as_bytes());
        }
        Ok(blob)
    }

    /// Deserialize a blob produced by [`DragPayload::encode`].
    ///
    /// The tag is validated before the count or any item is read. Fails
    /// with [`CodecError::FormatMismatch`] for an unrecognized blob and
    /// [`CodecError::Truncated`] for one that ends early.
    pub fn decode(blob: &[u8]) -> Result<Self, CodecError> {
        if blob.len() < PAYLOAD_TAG.len() || blob[..PAYLOAD_TAG.len()] != PAYLOAD_TAG {
            return Err(CodecError::FormatMismatch);
        }
        let mut offset = PAYLOAD_TAG.len();
        let count = read_u32(blob, &mut offset)? as usize;

        let mut items = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            let len = read_u32(blob, &mut offset)? as usize;
            let end = offset.saturating_add(len);
            if end > blob.len() {
                return Err(CodecError::Truncated {
                    expected: end,
                    available: blob.len(),
                });
            }
            let text =
                std::str::from_utf8(&blob[offset..end]).map_err(|_| CodecError::FormatMismatch)?;
            items.push(Item::new(text));
            offset = end;
        }
        Ok(Self::new(items))
    }
}

/// Read a big-endian `u32` at `*offset`, advancing it.
fn read_u32(blob: &[u8], offset: &mut usize) -> Result<u32, CodecError> {
    let end = *offset + 4;
    if end > blob.len() {
        return Err(CodecError::Truncated {
            expected: end,
            available: blob.len(),
        });
    }
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&blob[*offset..end]);
    *offset = end;
    Ok(u32::from_be_bytes(raw))
}
