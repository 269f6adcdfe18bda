//! Property tests for BOS/EOS framing and JSON repair.
//!
//! Invariants tested:
//!   1. With `use_bos`, every encode result starts with the BOS id.
//!   2. Without `use_bos`, exactly one engine-added BOS is stripped and
//!      re-encoding the decoded text gives the same ids.
//!   3. Framed output never exceeds a positive `max_length` and is a prefix of
//!      the untruncated framing.
//!   4. Dropping the commas between entries on separate lines is undone by
//!      `repair`.

use proptest::prelude::*;
use unitok_tokenizers::json_repair::repair;
use unitok_tokenizers::{
    BackendKind, CheckpointDescriptor, MockBackend, SpecialTokenConfig, UnifiedTokenizer,
};

const VOCAB: &[&str] = &["<unk>", "<s>", "</s>", "alpha", "beta", "gamma", "delta"];
const BOS: u32 = 1;
const EOS: u32 = 2;

fn tokenizer(engine_prefix: &[u32], use_bos: bool) -> UnifiedTokenizer {
    UnifiedTokenizer::from_parts(
        CheckpointDescriptor::new("/models/prop", BackendKind::BpeStyle),
        Box::new(MockBackend::new(VOCAB).with_engine_prefix(engine_prefix)),
        SpecialTokenConfig { bos_id: Some(BOS), eos_id: Some(EOS), use_bos },
    )
}

fn words() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(&VOCAB[3..]), 0..24).prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn use_bos_always_leads_with_bos(text in words(), engine_bos in any::<bool>()) {
        let prefix: &[u32] = if engine_bos { &[BOS] } else { &[] };
        let ids = tokenizer(prefix, true).encode(&text).unwrap();
        prop_assert_eq!(ids.first().copied(), Some(BOS));
        prop_assert_eq!(ids.iter().filter(|&&id| id == BOS).count(), 1);
    }

    #[test]
    fn disabled_bos_strips_exactly_one(text in words(), extra_bos in 0usize..3) {
        let mut prefix = vec![BOS];
        prefix.extend(std::iter::repeat_n(BOS, extra_bos));
        let tok = tokenizer(&prefix, false);
        let raw_len = prefix.len() + text.split_whitespace().count();
        let ids = tok.encode(&text).unwrap();
        prop_assert_eq!(ids.len(), raw_len - 1);
        if extra_bos == 0 {
            let again = tok.encode(&tok.decode(&ids).unwrap()).unwrap();
            prop_assert_eq!(again, ids);
        }
    }

    #[test]
    fn framed_output_respects_max_length(
        text in words(),
        bos in prop::option::of(any::<bool>()),
        eos in any::<bool>(),
        max_length in 1usize..16,
    ) {
        let tok = tokenizer(&[], false);
        let full = tok.encode_framed(&text, bos, eos, None).unwrap();
        let framed = tok.encode_framed(&text, bos, eos, Some(max_length)).unwrap();
        prop_assert!(framed.len() <= max_length);
        prop_assert_eq!(&framed[..], &full[..framed.len()]);
        if eos && full.len() <= max_length {
            prop_assert_eq!(framed.last().copied(), Some(EOS));
        }
    }

    #[test]
    fn repair_restores_missing_separators(
        entries in prop::collection::btree_map("[a-z_]{1,12}", 0u32..200_000, 1..8),
    ) {
        let expected = serde_json::to_value(&entries).unwrap();
        let body: Vec<String> =
            entries.iter().map(|(key, value)| format!("  \"{key}\": {value}")).collect();
        let broken = format!("{{\n{}\n}}", body.join("\n"));
        prop_assert_eq!(repair(&broken).unwrap(), expected);
    }
}
