//! `Node` support for the serde_yaml and serde_json value trees.
//!
//! Either tree can be walked by the engine in place, without converting
//! to [`Value`] first. YAML mappings may carry non-string keys; those are
//! matched against a path segment by their scalar rendering, so `1: one`
//! is reachable as `"1"`.

use std::borrow::Cow;

use super::node::{MapLike, Node, Shape, ShapeMut, Value};

type YamlValue = serde_yaml::Value;
type JsonValue = serde_json::Value;

/// Renders a YAML mapping key as a path segment, if it is a scalar.
fn yaml_key_text(key: &YamlValue) -> Option<Cow<'_, str>> {
    match key {
        YamlValue::String(s) => Some(Cow::Borrowed(s.as_str())),
        YamlValue::Number(n) => Some(Cow::Owned(n.to_string())),
        YamlValue::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

/// Finds the stored key that renders as `key`, for non-string keys.
fn yaml_matching_key(map: &serde_yaml::Mapping, key: &str) -> Option<YamlValue> {
    map.keys()
        .find(|candidate| {
            !candidate.is_string() && yaml_key_text(candidate).is_some_and(|text| text == key)
        })
        .cloned()
}

impl MapLike<YamlValue> for serde_yaml::Mapping {
    fn lookup(&self, key: &str) -> Option<&YamlValue> {
        match self.get(key) {
            Some(value) => Some(value),
            None => self.get(yaml_matching_key(self, key)?),
        }
    }

    fn lookup_mut(&mut self, key: &str) -> Option<&mut YamlValue> {
        if self.contains_key(key) {
            return self.get_mut(key);
        }
        let stored = yaml_matching_key(self, key)?;
        self.get_mut(stored)
    }

    fn assign(&mut self, key: &str, value: YamlValue) {
        match yaml_matching_key(self, key) {
            Some(stored) if !self.contains_key(key) => {
                self.insert(stored, value);
            }
            _ => {
                self.insert(YamlValue::String(key.to_string()), value);
            }
        }
    }

    fn remove_key(&mut self, key: &str) -> Option<YamlValue> {
        if self.contains_key(key) {
            return self.shift_remove(key);
        }
        let stored = yaml_matching_key(self, key)?;
        self.shift_remove(stored)
    }

    fn entry_count(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, &YamlValue)> + '_> {
        Box::new(
            self.iter()
                .filter_map(|(key, value)| yaml_key_text(key).map(|text| (text, value))),
        )
    }
}

impl Node for YamlValue {
    type Map = serde_yaml::Mapping;

    fn shape(&self) -> Shape<'_, Self> {
        match self {
            YamlValue::Mapping(map) => Shape::Map(map),
            YamlValue::Sequence(items) => Shape::Seq(items),
            _ => Shape::Leaf,
        }
    }

    fn shape_mut(&mut self) -> ShapeMut<'_, Self> {
        match self {
            YamlValue::Mapping(map) => ShapeMut::Map(map),
            YamlValue::Sequence(items) => ShapeMut::Seq(items),
            _ => ShapeMut::Leaf,
        }
    }

    fn empty_map() -> Self {
        YamlValue::Mapping(serde_yaml::Mapping::new())
    }

    fn from_seq(items: Vec<Self>) -> Self {
        YamlValue::Sequence(items)
    }

    fn absent() -> Self {
        YamlValue::Null
    }

    fn is_absent(&self) -> bool {
        self.is_null()
    }

    fn kind_name(&self) -> &'static str {
        match self {
            YamlValue::Null => "null",
            YamlValue::Bool(_) => "boolean",
            YamlValue::Number(_) => "number",
            YamlValue::String(_) => "string",
            YamlValue::Sequence(_) => "sequence",
            YamlValue::Mapping(_) => "map",
            YamlValue::Tagged(_) => "tagged value",
        }
    }
}

impl MapLike<JsonValue> for serde_json::Map<String, JsonValue> {
    fn lookup(&self, key: &str) -> Option<&JsonValue> {
        self.get(key)
    }

    fn lookup_mut(&mut self, key: &str) -> Option<&mut JsonValue> {
        self.get_mut(key)
    }

    fn assign(&mut self, key: &str, value: JsonValue) {
        self.insert(key.to_string(), value);
    }

    fn remove_key(&mut self, key: &str) -> Option<JsonValue> {
        self.remove(key)
    }

    fn entry_count(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, &JsonValue)> + '_> {
        Box::new(self.iter().map(|(key, value)| (Cow::Borrowed(key.as_str()), value)))
    }
}

impl Node for JsonValue {
    type Map = serde_json::Map<String, JsonValue>;

    fn shape(&self) -> Shape<'_, Self> {
        match self {
            JsonValue::Object(map) => Shape::Map(map),
            JsonValue::Array(items) => Shape::Seq(items),
            _ => Shape::Leaf,
        }
    }

    fn shape_mut(&mut self) -> ShapeMut<'_, Self> {
        match self {
            JsonValue::Object(map) => ShapeMut::Map(map),
            JsonValue::Array(items) => ShapeMut::Seq(items),
            _ => ShapeMut::Leaf,
        }
    }

    fn empty_map() -> Self {
        JsonValue::Object(serde_json::Map::new())
    }

    fn from_seq(items: Vec<Self>) -> Self {
        JsonValue::Array(items)
    }

    fn absent() -> Self {
        JsonValue::Null
    }

    fn is_absent(&self) -> bool {
        self.is_null()
    }

    fn kind_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "sequence",
            JsonValue::Object(_) => "map",
        }
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::Seq(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<YamlValue> for Value {
    fn from(yaml: YamlValue) -> Self {
        match yaml {
            YamlValue::Null => Value::Null,
            YamlValue::Bool(b) => Value::Bool(b),
            YamlValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            YamlValue::String(s) => Value::String(s),
            YamlValue::Sequence(items) => {
                Value::Seq(items.into_iter().map(Value::from).collect())
            }
            YamlValue::Mapping(map) => Value::Map(
                map.into_iter()
                    .filter_map(|(key, value)| {
                        let key = yaml_key_text(&key)?.into_owned();
                        Some((key, Value::from(value)))
                    })
                    .collect(),
            ),
            YamlValue::Tagged(tagged) => Value::from(tagged.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_shapes() {
        assert!(matches!(json!({"a": 1}).shape(), Shape::Map(_)));
        assert!(matches!(json!([1, 2]).shape(), Shape::Seq(_)));
        assert!(matches!(json!("leaf").shape(), Shape::Leaf));
    }

    #[test]
    fn test_yaml_numeric_keys_match_by_rendering() {
        let mut yaml: YamlValue = serde_yaml::from_str("1: one\nname: two\n").unwrap();
        let YamlValue::Mapping(map) = &mut yaml else {
            panic!("expected mapping");
        };

        assert_eq!(map.lookup("1"), Some(&YamlValue::String("one".to_string())));
        assert_eq!(map.lookup("name"), Some(&YamlValue::String("two".to_string())));

        map.assign("1", YamlValue::String("uno".to_string()));
        assert_eq!(map.len(), 2);
        assert_eq!(map.remove_key("1"), Some(YamlValue::String("uno".to_string())));
        assert!(map.lookup("1").is_none());
    }

    #[test]
    fn test_yaml_entries_render_scalar_keys() {
        let yaml: YamlValue = serde_yaml::from_str("b: 1\n2: 2\ntrue: 3\n").unwrap();
        let YamlValue::Mapping(map) = &yaml else {
            panic!("expected mapping");
        };
        let keys: Vec<String> = map.entries().map(|(key, _)| key.into_owned()).collect();
        assert_eq!(keys, vec!["b", "2", "true"]);
    }

    #[test]
    fn test_value_from_json() {
        let value = Value::from(json!({"n": 1, "f": 0.5, "l": [null, "s"]}));
        let map = value.as_map().unwrap();
        assert_eq!(map["n"], Value::Integer(1));
        assert_eq!(map["f"], Value::Float(0.5));
        assert_eq!(map["l"], Value::Seq(vec![Value::Null, Value::from("s")]));
    }

    #[test]
    fn test_value_from_yaml_drops_tags() {
        let yaml: YamlValue = serde_yaml::from_str("a: !custom 5\n").unwrap();
        let value = Value::from(yaml);
        assert_eq!(value.as_map().unwrap()["a"], Value::Integer(5));
    }
}
