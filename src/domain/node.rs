//! The in-memory representation of a decoded document.
//!
//! A [`Node`] is a closed tagged union with exactly three cases: mapping,
//! sequence, or scalar. All traversal code pattern-matches exhaustively on
//! the variant, so an unexpected shape is unrepresentable. Mappings preserve
//! document key order, which keeps rendering deterministic.

/// The reserved key that declares an entity's identifier.
pub const ID_KEY: &str = "id";

/// One value in a decoded document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Ordered key-value pairs. Keys are unique within a mapping.
    Mapping(Vec<(String, Node)>),
    /// An ordered list of nodes.
    Sequence(Vec<Node>),
    /// A leaf value.
    Scalar(Scalar),
}

/// A leaf value in the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// An explicit null or missing value.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer. Values beyond the `i64` range fall back to [`Self::Float`].
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    String(String),
}

impl Node {
    /// Looks up a key in a mapping node.
    ///
    /// Returns `None` for non-mapping nodes or missing keys.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Mapping(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            Self::Sequence(_) | Self::Scalar(_) => None,
        }
    }

    /// Returns the string value of a string scalar node.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns the identifier declared by this node, if it is a mapping with
    /// a string value under the reserved [`ID_KEY`] key.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.get(ID_KEY).and_then(Self::as_str)
    }
}

impl From<serde_yaml::Value> for Node {
    fn from(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => Self::Scalar(Scalar::Null),
            serde_yaml::Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            serde_yaml::Value::Number(n) => Self::Scalar(Scalar::from_yaml_number(&n)),
            serde_yaml::Value::String(s) => Self::Scalar(Scalar::String(s)),
            serde_yaml::Value::Sequence(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_yaml::Value::Mapping(mapping) => Self::Mapping(
                mapping
                    .into_iter()
                    .map(|(key, value)| (yaml_key(&key), Self::from(value)))
                    .collect(),
            ),
            serde_yaml::Value::Tagged(tagged) => Self::from(tagged.value),
        }
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Scalar(Scalar::Null),
            serde_json::Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            serde_json::Value::Number(n) => Self::Scalar(Scalar::from_json_number(&n)),
            serde_json::Value::String(s) => Self::Scalar(Scalar::String(s)),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(object) => Self::Mapping(
                object
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Scalar {
    fn from_yaml_number(number: &serde_yaml::Number) -> Self {
        number.as_i64().map_or_else(
            || Self::Float(number.as_f64().unwrap_or(f64::NAN)),
            Self::Int,
        )
    }

    fn from_json_number(number: &serde_json::Number) -> Self {
        number.as_i64().map_or_else(
            || Self::Float(number.as_f64().unwrap_or(f64::NAN)),
            Self::Int,
        )
    }
}

/// Stringifies a mapping key. Non-string scalar keys are rare but legal in
/// YAML; anything deeper than a scalar becomes a placeholder.
fn yaml_key(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        _ => String::from("~"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Node {
        serde_yaml::from_str::<serde_yaml::Value>(yaml).unwrap().into()
    }

    #[test]
    fn mapping_preserves_document_order() {
        let node = parse("zebra: 1\nalpha: 2\nmiddle: 3\n");
        let Node::Mapping(fields) = node else {
            panic!("expected mapping");
        };
        let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["zebra", "alpha", "middle"]);
    }

    #[test]
    fn json_object_preserves_document_order() {
        let value: serde_json::Value =
            serde_json::from_str(r#"{"zebra": 1, "alpha": 2}"#).unwrap();
        let Node::Mapping(fields) = Node::from(value) else {
            panic!("expected mapping");
        };
        let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["zebra", "alpha"]);
    }

    #[test]
    fn scalar_variants() {
        let node = parse("null_value: ~\nflag: true\ncount: 42\nratio: 1.5\nname: hello\n");
        assert_eq!(node.get("null_value"), Some(&Node::Scalar(Scalar::Null)));
        assert_eq!(node.get("flag"), Some(&Node::Scalar(Scalar::Bool(true))));
        assert_eq!(node.get("count"), Some(&Node::Scalar(Scalar::Int(42))));
        assert_eq!(node.get("ratio"), Some(&Node::Scalar(Scalar::Float(1.5))));
        assert_eq!(node.get("name").and_then(Node::as_str), Some("hello"));
    }

    #[test]
    fn identifier_requires_string_id() {
        assert_eq!(parse("id: sys_core\nname: Core\n").identifier(), Some("sys_core"));
        assert_eq!(parse("id: 42\n").identifier(), None);
        assert_eq!(parse("name: no id here\n").identifier(), None);
        assert_eq!(parse("- 1\n- 2\n").identifier(), None);
    }

    #[test]
    fn non_string_keys_are_stringified() {
        let node = parse("1: one\ntrue: yes\n");
        assert_eq!(node.get("1").and_then(Node::as_str), Some("one"));
        assert!(node.get("true").is_some());
    }

    #[test]
    fn get_on_non_mapping_is_none() {
        assert_eq!(parse("- a\n- b\n").get("a"), None);
        assert_eq!(Node::Scalar(Scalar::Null).get("a"), None);
    }

    #[test]
    fn large_integers_fall_back_to_float() {
        let node = parse("big: 18446744073709551615\n");
        assert!(matches!(
            node.get("big"),
            Some(Node::Scalar(Scalar::Float(_)))
        ));
    }
}
