use alloc::borrow::Cow;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use jm_path::{NamePath, Segment};
use jm_reflect::Typed;
use jm_reflect::info::{ObjectInfo, TypeInfo};

// -----------------------------------------------------------------------------
// NodeKind

/// The three shapes of a data node, plus `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    Scalar,
    List,
    Map,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.pad("null"),
            Self::Scalar => f.pad("scalar"),
            Self::List => f.pad("list"),
            Self::Map => f.pad("map"),
        }
    }
}

// -----------------------------------------------------------------------------
// Node

/// A node of the data tree: a scalar leaf, a list of indexed children or a
/// map of named children.
///
/// # Examples
///
/// ```
/// use jm_bind::source::Node;
/// use jm_path::NamePath;
///
/// let root: Node = serde_json::from_str(r#"{"hosts": [{"name": "a"}, {"name": "b"}]}"#).unwrap();
///
/// let name = root.get(&NamePath::new("hosts[1].name")).unwrap();
/// assert_eq!(name.as_str(), Some("b"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    List(Vec<Node>),
    Map(BTreeMap<String, Node>),
}

impl Node {
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Null => NodeKind::Null,
            Self::Bool(_) | Self::Int(_) | Self::UInt(_) | Self::Float(_) | Self::String(_) => {
                NodeKind::Scalar
            }
            Self::List(_) => NodeKind::List,
            Self::Map(_) => NodeKind::Map,
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn is_scalar(&self) -> bool {
        matches!(self.kind(), NodeKind::Scalar)
    }

    #[inline]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    #[inline]
    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value as `i64` if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::UInt(value) => i64::try_from(*value).ok(),
            _ => None,
        }
    }

    /// Returns the value as `u64` if it is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Int(value) => u64::try_from(*value).ok(),
            Self::UInt(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns any numeric value as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::UInt(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the textual form of a scalar, `None` for other kinds.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::String(value) => Some(Cow::Borrowed(value)),
            Self::Bool(value) => Some(Cow::Owned(value.to_string())),
            Self::Int(value) => Some(Cow::Owned(value.to_string())),
            Self::UInt(value) => Some(Cow::Owned(value.to_string())),
            Self::Float(value) => Some(Cow::Owned(value.to_string())),
            Self::Null | Self::List(_) | Self::Map(_) => None,
        }
    }

    /// Returns the number of children; zero for leaves.
    pub fn len(&self) -> usize {
        match self {
            Self::List(items) => items.len(),
            Self::Map(entries) => entries.len(),
            _ => 0,
        }
    }

    /// Resolves one segment: a key of a map or an index of a list.
    ///
    /// A map is looked up by the raw segment text, so `[a.b]` reaches the
    /// key `a.b`. A list only accepts numeric segments.
    pub fn child(&self, segment: Segment<'_>) -> Option<&Node> {
        match self {
            Self::Map(entries) => entries.get(segment.as_str()),
            Self::List(items) => segment.as_index().and_then(|index| items.get(index)),
            _ => None,
        }
    }

    /// Resolves `path` below this node.
    ///
    /// The empty path resolves to the node itself.
    pub fn get(&self, path: &NamePath) -> Option<&Node> {
        path.iter()
            .filter(|segment| !segment.kind().is_empty())
            .try_fold(self, |node, segment| node.child(segment))
    }
}

impl Typed for Node {
    fn type_info() -> TypeInfo {
        TypeInfo::Object(ObjectInfo::new::<Self>())
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

impl_from!(
    bool => Bool,
    i32 => Int,
    i64 => Int,
    u32 => UInt,
    u64 => UInt,
    f64 => Float,
    String => String,
    &str => String,
    Vec<Node> => List,
    BTreeMap<String, Node> => Map,
);

impl<K: Into<String>, V: Into<Node>> FromIterator<(K, V)> for Node {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Map(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
