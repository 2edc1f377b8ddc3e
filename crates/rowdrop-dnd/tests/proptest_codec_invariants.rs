//! Property-based invariant tests for the drag-payload codec.
//!
//! These verify the wire-format invariants that must hold for any inputs:
//!
//! 1. decode(encode(items)) == items for any sequence of textual items.
//! 2. Encoded size is exactly header + Σ(4 + item byte length).
//! 3. Corrupting any tag byte makes decode fail with FormatMismatch.
//! 4. Any strict prefix of a non-empty blob fails with Truncated (or
//!    FormatMismatch when the cut lands inside the tag).
//! 5. Decode never panics on arbitrary bytes.

use proptest::prelude::*;
use rowdrop_dnd::{CodecError, DragPayload, PAYLOAD_TAG};
use rowdrop_model::Item;

// ── Helpers ─────────────────────────────────────────────────────────────

fn identity_texts() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(".{0,12}", 0..=8)
}

fn payload(texts: &[String]) -> DragPayload {
    DragPayload::new(texts.iter().map(Item::new).collect())
}

// ── round trip ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn round_trip_is_identity(texts in identity_texts()) {
        let original = payload(&texts);
        let blob = original.encode().unwrap();
        prop_assert_eq!(DragPayload::decode(&blob).unwrap(), original);
    }
}

proptest! {
    #[test]
    fn encoded_size_is_exact(texts in identity_texts()) {
        let blob = payload(&texts).encode().unwrap();
        let body: usize = texts.iter().map(|t| 4 + t.len()).sum();
        prop_assert_eq!(blob.len(), 8 + body);
    }
}

// ── corruption ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn corrupted_tag_is_a_format_mismatch(
        texts in identity_texts(),
        tag_byte in 0usize..4,
        xor in 1u8..=u8::MAX,
    ) {
        let mut blob = payload(&texts).encode().unwrap();
        blob[tag_byte] ^= xor;
        prop_assert_eq!(DragPayload::decode(&blob), Err(CodecError::FormatMismatch));
    }
}

proptest! {
    #[test]
    fn any_strict_prefix_fails(texts in identity_texts(), cut_seed in 0usize..256) {
        let blob = payload(&texts).encode().unwrap();
        let cut = cut_seed % blob.len();
        let result = DragPayload::decode(&blob[..cut]);
        if cut < PAYLOAD_TAG.len() {
            prop_assert_eq!(result, Err(CodecError::FormatMismatch));
        } else {
            let is_truncated = matches!(result, Err(CodecError::Truncated { .. }));
            prop_assert!(is_truncated);
        }
    }
}

// ── robustness ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn decode_never_panics_on_arbitrary_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
        let _ = DragPayload::decode(&bytes);
    }
}
