//! The conversion service turning leaf nodes into typed values.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::any::{Any, TypeId, type_name};
use core::fmt;
use core::str::FromStr;

use jm_reflect::BoxedValue;
use jm_reflect::hash::HashMap;
use jm_reflect::info::Type;

use crate::ConversionError;
use crate::source::Node;

// -----------------------------------------------------------------------------
// Conversion

/// Converts a data node into a value of a target type.
///
/// Injected into the binder; scalar targets and opaque objects are always
/// produced through it.
pub trait Conversion {
    /// Returns `true` if `target` can be produced at all.
    fn can_convert(&self, target: &Type) -> bool;

    /// Converts `node` into a value of type `target`.
    fn convert(&self, node: &Node, target: &Type) -> Result<BoxedValue, ConversionError>;
}

// -----------------------------------------------------------------------------
// DefaultConversion

type Converter = Arc<dyn Fn(&Node) -> Result<BoxedValue, ConversionError> + Send + Sync>;

/// A [`Conversion`] backed by a table of per-type converters.
///
/// [`DefaultConversion::new`] covers `bool`, `char`, every integer and
/// float type, `String` and [`Node`] itself. Other scalar types, such as
/// unit-like enums, are added with [`register`](Self::register).
///
/// # Examples
///
/// ```
/// use jm_bind::{ConversionError, source::Node};
/// use jm_bind::conversion::{Conversion, DefaultConversion};
/// use jm_reflect::info::Type;
///
/// #[derive(Debug, PartialEq)]
/// enum Mode { Fast, Safe }
///
/// let conversion = DefaultConversion::new().with_converter(|node: &Node| match node.as_str() {
///     Some("fast") => Ok(Mode::Fast),
///     Some("safe") => Ok(Mode::Safe),
///     _ => Err(ConversionError::Invalid { value: format!("{node:?}"), to: "Mode" }),
/// });
///
/// let mode = conversion.convert(&Node::from("safe"), &Type::of::<Mode>()).unwrap();
/// assert_eq!(*mode.downcast::<Mode>().unwrap(), Mode::Safe);
///
/// let port = conversion.convert(&Node::from(" 8080 "), &Type::of::<u16>()).unwrap();
/// assert_eq!(*port.downcast::<u16>().unwrap(), 8080);
/// ```
#[derive(Clone)]
pub struct DefaultConversion {
    converters: HashMap<TypeId, Converter>,
}

impl Default for DefaultConversion {
    /// See [`DefaultConversion::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! register_all {
    ($conversion:ident, $converter:ident: $($ty:ty),* $(,)?) => {
        $( $conversion.register::<$ty>($converter::<$ty>); )*
    };
}

impl DefaultConversion {
    /// Creates a conversion without any converter.
    #[inline]
    pub fn empty() -> Self {
        Self {
            converters: HashMap::default(),
        }
    }

    /// Creates a conversion with the built-in converters.
    pub fn new() -> Self {
        let mut conversion = Self::empty();
        conversion.register::<bool>(convert_bool);
        conversion.register::<char>(convert_char);
        conversion.register::<String>(convert_string);
        conversion.register::<Node>(|node: &Node| Ok(node.clone()));
        register_all!(
            conversion, convert_integer:
            i8, i16, i32, i64, i128, isize,
            u8, u16, u32, u64, u128, usize,
        );
        register_all!(conversion, convert_float: f32, f64);
        conversion
    }

    /// Registers or replaces the converter for `T`.
    pub fn register<T: Any>(
        &mut self,
        converter: impl Fn(&Node) -> Result<T, ConversionError> + Send + Sync + 'static,
    ) {
        let converter: Converter = Arc::new(move |node: &Node| {
            converter(node).map(|value| Box::new(value) as BoxedValue)
        });
        self.converters.insert(TypeId::of::<T>(), converter);
    }

    /// Builder-style [`register`](Self::register).
    #[inline]
    pub fn with_converter<T: Any>(
        mut self,
        converter: impl Fn(&Node) -> Result<T, ConversionError> + Send + Sync + 'static,
    ) -> Self {
        self.register(converter);
        self
    }
}

impl Conversion for DefaultConversion {
    #[inline]
    fn can_convert(&self, target: &Type) -> bool {
        self.converters.contains_key(&target.id())
    }

    fn convert(&self, node: &Node, target: &Type) -> Result<BoxedValue, ConversionError> {
        match self.converters.get(&target.id()) {
            Some(converter) => converter(node),
            None => Err(ConversionError::NoConverter(target.name())),
        }
    }
}

impl fmt::Debug for DefaultConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultConversion")
            .field("converters", &self.converters.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Built-in converters

#[inline]
fn unsupported<T>(node: &Node) -> ConversionError {
    ConversionError::Unsupported {
        from: node.kind(),
        to: type_name::<T>(),
    }
}

#[inline]
fn invalid<T>(value: impl ToString) -> ConversionError {
    ConversionError::Invalid {
        value: value.to_string(),
        to: type_name::<T>(),
    }
}

#[inline]
fn out_of_range<T>(value: impl ToString) -> ConversionError {
    ConversionError::OutOfRange {
        value: value.to_string(),
        to: type_name::<T>(),
    }
}

fn convert_bool(node: &Node) -> Result<bool, ConversionError> {
    match node {
        Node::Bool(value) => Ok(*value),
        Node::Int(0) | Node::UInt(0) => Ok(false),
        Node::Int(1) | Node::UInt(1) => Ok(true),
        Node::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(invalid::<bool>(text)),
        },
        Node::Int(_) | Node::UInt(_) | Node::Float(_) => {
            Err(invalid::<bool>(node.as_text().unwrap_or_default()))
        }
        _ => Err(unsupported::<bool>(node)),
    }
}

fn convert_char(node: &Node) -> Result<char, ConversionError> {
    let Some(text) = node.as_text() else {
        return Err(unsupported::<char>(node));
    };
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(invalid::<char>(text)),
    }
}

fn convert_string(node: &Node) -> Result<String, ConversionError> {
    node.as_text()
        .map(|text| text.into_owned())
        .ok_or_else(|| unsupported::<String>(node))
}

fn convert_integer<T>(node: &Node) -> Result<T, ConversionError>
where
    T: TryFrom<i64> + TryFrom<u64> + FromStr,
{
    match node {
        Node::Int(value) => <T as TryFrom<i64>>::try_from(*value).map_err(|_| out_of_range::<T>(value)),
        Node::UInt(value) => <T as TryFrom<u64>>::try_from(*value).map_err(|_| out_of_range::<T>(value)),
        Node::Float(value) => float_to_integer(*value),
        Node::String(text) => text.trim().parse::<T>().map_err(|_| invalid::<T>(text)),
        _ => Err(unsupported::<T>(node)),
    }
}

/// 2^63, exact in `f64`.
const I64_END: f64 = 9_223_372_036_854_775_808.0;
/// 2^64, exact in `f64`.
const U64_END: f64 = 18_446_744_073_709_551_616.0;

// Range checks run before any cast; `as` would saturate.
fn float_to_integer<T>(value: f64) -> Result<T, ConversionError>
where
    T: TryFrom<i64> + TryFrom<u64>,
{
    if value.is_nan() {
        Err(invalid::<T>(value))
    } else if (-I64_END..I64_END).contains(&value) {
        let truncated = value as i64;
        if truncated as f64 == value {
            <T as TryFrom<i64>>::try_from(truncated).map_err(|_| out_of_range::<T>(value))
        } else {
            Err(invalid::<T>(value))
        }
    } else if (I64_END..U64_END).contains(&value) {
        // Every float this large is whole.
        <T as TryFrom<u64>>::try_from(value as u64).map_err(|_| out_of_range::<T>(value))
    } else {
        Err(out_of_range::<T>(value))
    }
}

macro_rules! float_from_node {
    ($($ty:ty),*) => {
        $(
            impl FloatFromNode for $ty {
                #[inline]
                fn from_node(node: &Node) -> Option<Self> {
                    match node {
                        Node::Int(value) => Some(*value as $ty),
                        Node::UInt(value) => Some(*value as $ty),
                        Node::Float(value) => Some(*value as $ty),
                        _ => None,
                    }
                }
            }
        )*
    };
}

trait FloatFromNode: Sized {
    fn from_node(node: &Node) -> Option<Self>;
}

float_from_node!(f32, f64);

fn convert_float<T>(node: &Node) -> Result<T, ConversionError>
where
    T: FloatFromNode + FromStr,
{
    match node {
        Node::String(text) => text.trim().parse::<T>().map_err(|_| invalid::<T>(text)),
        _ => T::from_node(node).ok_or_else(|| unsupported::<T>(node)),
    }
}
