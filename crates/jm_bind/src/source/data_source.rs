use alloc::string::ToString;
use alloc::sync::Arc;

use jm_path::NamePath;
use serde_core::de::Deserializer;
use serde_core::Deserialize;

use crate::BindError;
use crate::source::Node;

/// A read-only, cheaply cloneable view over a data tree.
///
/// # Examples
///
/// ```
/// use jm_bind::source::DataSource;
/// use jm_path::NamePath;
///
/// let mut json = serde_json::Deserializer::from_str(r#"{"server": {"port": 8080}}"#);
/// let source = DataSource::from_deserializer(&mut json).unwrap();
///
/// assert!(source.contains(&NamePath::new("server.port")));
/// assert!(source.get(&NamePath::new("server.missing")).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DataSource {
    root: Arc<Node>,
}

impl DataSource {
    /// Creates a data source over `root`.
    #[inline]
    pub fn new(root: Node) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    /// Materializes a data source from any serde format.
    ///
    /// Fails with [`BindError::UnsupportedDataSource`] if the input has a
    /// shape a [`Node`] cannot hold.
    pub fn from_deserializer<'de, D>(deserializer: D) -> Result<Self, BindError>
    where
        D: Deserializer<'de>,
    {
        Node::deserialize(deserializer)
            .map(Self::new)
            .map_err(|error| BindError::UnsupportedDataSource(error.to_string()))
    }

    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Resolves `path` from the root.
    #[inline]
    pub fn get(&self, path: &NamePath) -> Option<&Node> {
        self.root.get(path)
    }

    /// Returns `true` if a non-null node exists at `path`.
    #[inline]
    pub fn contains(&self, path: &NamePath) -> bool {
        self.get(path).is_some_and(|node| !node.is_null())
    }
}

impl From<Node> for DataSource {
    #[inline]
    fn from(root: Node) -> Self {
        Self::new(root)
    }
}

#[cfg(test)]
mod tests {
    use jm_path::NamePath;

    use super::DataSource;
    use crate::BindError;

    #[test]
    fn unsupported_input_shape() {
        let mut json = serde_json::Deserializer::from_str(r#"{"a": "#);
        let error = DataSource::from_deserializer(&mut json).unwrap_err();
        assert!(matches!(error, BindError::UnsupportedDataSource(_)));
    }

    #[test]
    fn null_is_not_contained() {
        let mut json = serde_json::Deserializer::from_str(r#"{"a": null, "b": 0}"#);
        let source = DataSource::from_deserializer(&mut json).unwrap();

        assert!(!source.contains(&NamePath::new("a")));
        assert!(source.contains(&NamePath::new("b")));
        assert!(source.get(&NamePath::new("a")).is_some());
    }
}
