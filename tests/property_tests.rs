//! Property-based tests - pragmatic approach testing core roundtrip guarantees
//!
//! These tests complement the integration suite by verifying the format's
//! algebraic properties across a wide range of generated inputs: escaping
//! idempotence, splitter correctness, header parsing, and fragmentation.

use mson::{
    escape_text, split_top_level, unescape_text, ConverterRegistry, FragmentManager, MsonMessage,
    MsonOptions, MsonValue, ScalarType,
};
use proptest::prelude::*;

proptest! {
    // unescape(escape(s)) == trim(s) for any text, including reserved
    // characters and pre-existing backslashes
    #[test]
    fn prop_escape_unescape_idempotent(s in ".*") {
        prop_assert_eq!(unescape_text(&escape_text(&s)), s.trim());
    }

    // For backslash-free text (the unambiguous case), escaping leaves no
    // reserved character visible to the splitter's escape-aware scan
    #[test]
    fn prop_escape_output_has_no_structural_chars(s in "[^\\\\]*") {
        let escaped = escape_text(&s);
        let mut pending_escape = false;
        for c in escaped.chars() {
            if pending_escape {
                pending_escape = false;
                continue;
            }
            if c == '\\' {
                pending_escape = true;
                continue;
            }
            prop_assert!(
                !['{', '}', '[', ']', ','].contains(&c),
                "structural char escaped scan in {:?}",
                escaped
            );
        }
    }

    // Joining plain items with commas and splitting again is lossless
    #[test]
    fn prop_split_inverts_join(items in prop::collection::vec("[a-zA-Z0-9 ]+", 1..12)) {
        let joined = items.join(",");
        let split: Vec<String> = split_top_level(&joined).iter().map(|s| s.to_string()).collect();
        prop_assert_eq!(split, items);
    }

    // Backslash-free text never splits after escaping, whatever it contains
    #[test]
    fn prop_escaped_text_is_one_item(s in "[^\\\\]+") {
        let escaped = escape_text(&s);
        prop_assume!(!escaped.is_empty());
        let split = split_top_level(&escaped);
        prop_assert_eq!(split.len(), 1);
    }

    // Text scalars survive the registry roundtrip modulo trimming
    #[test]
    fn prop_text_converter_roundtrip(s in ".*") {
        let registry = ConverterRegistry::default();
        let options = MsonOptions::new();

        let wire = registry
            .serialize(&MsonValue::from(s.as_str()), ScalarType::Text, &options)
            .unwrap();
        let back = registry.deserialize(&wire, ScalarType::Text, &options).unwrap();

        let expected = if s.trim().is_empty() {
            MsonValue::Null
        } else {
            MsonValue::from(s.trim())
        };
        prop_assert_eq!(back, expected);
    }

    #[test]
    fn prop_integer_converter_roundtrip(n in any::<i64>()) {
        let registry = ConverterRegistry::default();
        let options = MsonOptions::new();

        let wire = registry
            .serialize(&MsonValue::from(n), ScalarType::Integer, &options)
            .unwrap();
        let back = registry.deserialize(&wire, ScalarType::Integer, &options).unwrap();
        prop_assert_eq!(back.as_i64(), Some(n));
    }

    #[test]
    fn prop_float_converter_roundtrip(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        let registry = ConverterRegistry::default();
        let options = MsonOptions::new();

        let wire = registry
            .serialize(&MsonValue::from(f), ScalarType::Float, &options)
            .unwrap();
        let back = registry.deserialize(&wire, ScalarType::Float, &options).unwrap();
        prop_assert_eq!(back.as_f64(), Some(f));
    }

    // Header parse inverts full_message for any valid header
    #[test]
    fn prop_header_roundtrip(
        version in proptest::sample::select(vec!['0', '7', '9', 'a', 'q', 'z', 'A', 'Z']),
        position in 1usize..10_000,
        extra in 0usize..10_000,
        content in "[a-zA-Z0-9{},/~]*",
    ) {
        let total = position + extra;
        let message = MsonMessage::new(version, position, total, content);
        let parsed = MsonMessage::parse(&message.full_message()).unwrap();
        prop_assert_eq!(parsed, message);
    }

    // reassemble(fragment(C, M)) == "{version}1/1~{C}" whenever M leaves room
    // for content after the header
    #[test]
    fn prop_fragmentation_roundtrip(
        content in "[ -~]{1,2000}",
        max in 50usize..600,
    ) {
        prop_assume!(!content.trim().is_empty());
        let manager = FragmentManager::new(max);

        let fragments = manager.fragment('1', &content).unwrap();
        for fragment in &fragments {
            prop_assert!(fragment.full_message().chars().count() <= max);
        }

        let reassembled = FragmentManager::reassemble(&fragments).unwrap();
        prop_assert_eq!(reassembled, format!("11/1~{}", content));
    }

    // Every fragment agrees on the total, and the total is honest
    #[test]
    fn prop_fragment_headers_self_consistent(
        content in "[a-z]{1,3000}",
        max in 20usize..200,
    ) {
        let manager = FragmentManager::new(max);
        let fragments = manager.fragment('z', &content).unwrap();

        let total = fragments.len();
        for (i, fragment) in fragments.iter().enumerate() {
            prop_assert_eq!(fragment.position(), i + 1);
            prop_assert_eq!(fragment.total(), total);
        }
    }
}
