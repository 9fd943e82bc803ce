use config::{ConfigError, FileStoredFormat, Format, Map, Source, Value, ValueKind};
use kdl::{KdlDocument, KdlNode, KdlValue};

/// Reads the children of a top-level `options` node as configuration keys.
///
/// ```kdl
/// options {
///     default_host "https://gems.example.com"
///     credentials "/home/me/.config/garnet/credentials.kdl"
/// }
/// ```
#[derive(Clone, Debug)]
pub(crate) struct KdlSource(KdlDocument);

impl Source for KdlSource {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        let mut map = Map::new();
        if let Some(children) = self.0.get("options").and_then(|node| node.children()) {
            for node in children.nodes() {
                map.insert(node.name().value().to_string(), node_value(node));
            }
        }
        Ok(map)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct KdlFormat;

impl Format for KdlFormat {
    fn parse(
        &self,
        _uri: Option<&String>,
        text: &str,
    ) -> Result<Map<String, Value>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(KdlSource(text.parse()?).collect()?)
    }
}

impl FileStoredFormat for KdlFormat {
    fn file_extensions(&self) -> &'static [&'static str] {
        &["kdl"]
    }
}

fn value_kind(value: &KdlValue) -> ValueKind {
    if let Some(str) = value.as_string() {
        ValueKind::String(str.into())
    } else if let Some(num) = value.as_i64() {
        ValueKind::I64(num)
    } else if let Some(float) = value.as_f64() {
        ValueKind::Float(float)
    } else if let Some(boolean) = value.as_bool() {
        ValueKind::Boolean(boolean)
    } else {
        ValueKind::Nil
    }
}

fn node_value(node: &KdlNode) -> Value {
    let mut args = node.entries().iter().filter(|e| e.name().is_none());
    let len = args.clone().count();
    // foo 1 => { foo: 1 }
    if len == 1 {
        Value::new(
            None,
            value_kind(args.next().expect("checked length already").value()),
        )
    // foo 1 2 3 => { foo: [1, 2, 3] }
    } else if len > 1 {
        Value::new(
            None,
            ValueKind::Array(args.map(|e| Value::new(None, value_kind(e.value()))).collect()),
        )
    } else if let Some(children) = node.children() {
        // foo {
        //     bar 1
        // }
        // => { foo: { bar: 1 } }
        Value::new(
            None,
            ValueKind::Table(
                children
                    .nodes()
                    .iter()
                    .map(|node| (node.name().value().to_string(), node_value(node)))
                    .collect(),
            ),
        )
    } else {
        Value::new(None, ValueKind::Nil)
    }
}
