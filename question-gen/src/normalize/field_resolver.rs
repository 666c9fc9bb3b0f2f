use serde_json::{Map, Value};

use crate::model::QuestionType;

/// Reads a loosely keyed JSON record by probing candidate keys in order.
///
/// A key counts as present only when its value is not `null`.
pub(super) struct FieldResolver<'a> {
    record: &'a Map<String, Value>,
}

impl<'a> FieldResolver<'a> {
    pub(super) fn new(record: &'a Map<String, Value>) -> Self {
        Self { record }
    }

    /// First non-null value among `keys`.
    pub(super) fn first(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .filter_map(|k| self.record.get(*k))
            .find(|v| !v.is_null())
    }

    /// First present value, stringified; blank strings count as absent.
    pub(super) fn text(&self, keys: &[&str]) -> Option<String> {
        self.first(keys)
            .and_then(stringify)
            .filter(|s| !s.trim().is_empty())
    }

    /// First present value that is an array, elements stringified with nulls
    /// skipped. An empty result is absent.
    pub(super) fn string_list(&self, keys: &[&str]) -> Option<Vec<String>> {
        let items = self.first(keys)?.as_array()?;
        let list: Vec<String> = items.iter().filter_map(stringify).collect();
        (!list.is_empty()).then_some(list)
    }

    /// First present string that names a known question type.
    pub(super) fn question_type(&self, keys: &[&str]) -> Option<QuestionType> {
        self.first(keys)?.as_str().and_then(QuestionType::parse_lenient)
    }
}

/// Strings as-is, scalars via their JSON text, nested values as compact JSON.
pub(super) fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn probes_keys_in_order_skipping_nulls() {
        let rec = map(json!({"question": null, "prompt": "P", "text": "T"}));
        let r = FieldResolver::new(&rec);
        assert_eq!(r.text(&["question", "prompt", "text"]).as_deref(), Some("P"));
        assert_eq!(r.text(&["missing"]), None);
    }

    #[test]
    fn stringifies_scalars_and_lists() {
        let rec = map(json!({"id": 42, "choices": ["a", 1, true, null], "empty": []}));
        let r = FieldResolver::new(&rec);
        assert_eq!(r.text(&["id"]).as_deref(), Some("42"));
        assert_eq!(
            r.string_list(&["options", "choices"]),
            Some(vec!["a".into(), "1".into(), "true".into()])
        );
        assert_eq!(r.string_list(&["empty"]), None);
        assert_eq!(r.string_list(&["id"]), None);
    }

    #[test]
    fn resolves_types_leniently() {
        let rec = map(json!({"question_type": "one-word", "type": 3}));
        let r = FieldResolver::new(&rec);
        // `type` is present but not a string, so no type is resolved.
        assert_eq!(r.question_type(&["type", "question_type"]), None);
        assert_eq!(
            r.question_type(&["question_type"]),
            Some(QuestionType::OneWord)
        );
    }
}
