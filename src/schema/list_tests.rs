//! Tests for list descriptors and suggestion providers.

use std::sync::Arc;

use crate::entry::Suggestion;
use crate::text::{MultilinePolicy, TextLayout};

use super::*;

fn ints(range: Option<ListRange>) -> DataType {
    let builder = ListData::builder(DataType::int());
    match range {
        Some(range) => builder.range(range).build().into(),
        None => builder.build().into(),
    }
}

mod parsing {
    use super::*;

    #[test]
    fn elements_parse_in_order() {
        let value = ints(None).parse("[1, 2, 3]").unwrap();
        let list = value.as_list().unwrap();
        assert_eq!(list.iter().filter_map(StructuredValue::as_int).collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn blank_and_empty_brackets_are_empty_lists() {
        assert_eq!(ints(None).parse("").unwrap(), StructuredValue::List(ParsedList::new()));
        assert_eq!(ints(None).parse("[ ]").unwrap(), StructuredValue::List(ParsedList::new()));
    }

    #[test]
    fn unbracketed_text_is_malformed() {
        assert!(matches!(ints(None).parse("1, 2"), Err(SchemaError::Malformed { .. })));
        assert!(matches!(ints(None).parse("[[1, 2]"), Err(SchemaError::Malformed { .. })));
    }

    #[test]
    fn bad_element_reports_its_position() {
        let err = ints(None).parse("[1, two]").unwrap_err();
        assert!(matches!(err, SchemaError::Element { index: 1, .. }));
    }
}

mod ranges {
    use super::*;

    #[test]
    fn out_of_range_is_reported_not_clamped() {
        let data = ints(Some(ListRange::Int { min: 0, max: 10 }));
        assert_eq!(
            data.parse("[5, 11]"),
            Err(SchemaError::OutOfRange {
                index: 1,
                value: "11".into(),
                range: "0 ~ 10".into(),
            })
        );
        assert!(data.parse("[0, 10]").is_ok());
    }

    #[test]
    fn double_range_accepts_bounds() {
        let data: DataType = ListData::builder(DataType::double())
            .range(ListRange::Double { min: 0.0, max: 1.0 })
            .build()
            .into();
        assert!(data.parse("[0.0, 0.5, 1.0]").is_ok());
        assert!(data.parse("[1.5]").is_err());
    }

    #[test]
    fn enum_range_limits_text() {
        let names: Arc<[String]> = Arc::from(vec!["A".to_string(), "B".to_string()]);
        let data: DataType = ListData::builder(DataType::text())
            .range(ListRange::Enum(names))
            .build()
            .into();
        assert!(data.parse("[A, B, A]").is_ok());
        assert!(matches!(data.parse("[A, C]"), Err(SchemaError::OutOfRange { index: 1, .. })));
    }

    #[test]
    fn validation_applies_the_range() {
        let data = ints(Some(ListRange::Int { min: 0, max: 3 }));
        let value = StructuredValue::List([1_i64, 9].into_iter().collect());
        assert!(matches!(data.validate(&value), Err(SchemaError::OutOfRange { .. })));
    }

    #[test]
    fn example_respects_the_range() {
        let data = ints(Some(ListRange::Int { min: 5, max: 9 }));
        assert_eq!(
            data.serialize(&data.example(), &TextLayout::default(), 0, 0),
            "[5]"
        );
    }
}

mod layout {
    use super::*;

    fn words() -> DataType {
        ListData::builder(DataType::text()).newlined(true).build().into()
    }

    fn many() -> StructuredValue {
        StructuredValue::List((0..20).map(|i| format!("element-{i:02}")).collect())
    }

    #[test]
    fn long_lists_pack_and_round_trip() {
        let text = words().serialize(&many(), &TextLayout::default(), 0, 10);

        assert!(text.starts_with("[\n    element-00, element-01,"));
        assert!(text.ends_with("\n]"));
        assert!(text.lines().all(|line| line.len() <= TextLayout::DEFAULT_LINE_WIDTH));
        assert_eq!(words().parse(&text).unwrap(), many());
    }

    #[test]
    fn always_policy_writes_one_element_per_line() {
        let layout = TextLayout::new(MultilinePolicy::AlwaysMultiline);
        let value = StructuredValue::List(["a", "b"].into_iter().collect());
        assert_eq!(words().serialize(&value, &layout, 0, 0), "[\n    a,\n    b\n]");
    }

    #[test]
    fn nested_layout_indents_per_level() {
        let data = DataType::from(
            ListData::builder(words()).newlined(true).build(),
        );
        let inner: ParsedList = ["a"].into_iter().collect();
        let value = StructuredValue::List(std::iter::once(inner).collect());
        let layout = TextLayout::new(MultilinePolicy::AlwaysMultiline).with_indent(2);

        assert_eq!(data.serialize(&value, &layout, 0, 0), "[\n  [\n    a\n  ]\n]");
    }
}

mod suggestions {
    use super::*;

    #[test]
    fn forced_elements_must_be_suggested() {
        let data: DataType = ListData::builder(DataType::int())
            .suggest(SuggestionProvider::values(["1", "2"]))
            .forced()
            .build()
            .into();
        assert!(data.parse("[1, 2, 1]").is_ok());
        assert!(matches!(data.parse("[1, 3]"), Err(SchemaError::Element { index: 1, .. })));
    }

    #[test]
    fn dynamic_provider_sees_the_filter() {
        let provider = SuggestionProvider::dynamic(|filter| {
            (1..=5)
                .map(|i| Suggestion::value(i.to_string()))
                .filter(|s| filter(s))
                .collect()
        });
        let picked = provider.suggestions(&|s| s.value != "3");
        assert_eq!(picked.len(), 4);
    }

    #[test]
    fn enum_provider_lists_constants() {
        let provider = SuggestionProvider::Enum(Arc::from(vec!["ON".to_string(), "OFF".to_string()]));
        let values: Vec<String> = provider.suggestions(&|_| true).into_iter().map(|s| s.value).collect();
        assert_eq!(values, ["ON", "OFF"]);
    }

    #[test]
    fn list_falls_back_to_element_suggestions() {
        let data = ListData::builder(DataType::enumeration(["X", "Y"])).build();
        assert_eq!(data.suggestions(&|_| true).len(), 2);
    }
}
