//! Field values and the literal shapes rows are built from.

use std::fmt;

/// A single field value held by a row, node or value source.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value.
    #[default]
    None,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as a float; integers convert.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Source-literal rendering: strings quoted, `None` spelled out.
    pub(crate) fn literal(&self) -> String {
        match self {
            Value::String(s) => format!("{s:?}"),
            Value::None => "None".to_owned(),
            other => other.to_string(),
        }
    }
}

/// Plain rendering; `None` renders as an empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => Ok(()),
            Value::String(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}

/// The literal shape a row or node is built from.
///
/// - `Mapping`: every key becomes a field, accessor or not.
/// - `Sequence`: values are paired with accessors by position; extra values
///   or extra accessors are ignored.
/// - `Scalar`: the value is assigned to the first accessor only.
#[derive(Debug, Clone, PartialEq)]
pub enum RowData {
    Mapping(Vec<(String, Value)>),
    Sequence(Vec<Value>),
    Scalar(Value),
}

impl RowData {
    /// Build a mapping from key/value pairs, keeping their order.
    pub fn mapping<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        RowData::Mapping(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Build a positional sequence.
    pub fn sequence<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        RowData::Sequence(values.into_iter().map(Into::into).collect())
    }

    /// Resolve to `(field, value)` pairs against `accessors`.
    pub fn fields(&self, accessors: &[String]) -> Vec<(String, Value)> {
        match self {
            RowData::Mapping(pairs) => pairs.clone(),
            RowData::Sequence(values) => accessors
                .iter()
                .cloned()
                .zip(values.iter().cloned())
                .collect(),
            RowData::Scalar(value) => accessors
                .first()
                .map(|accessor| vec![(accessor.clone(), value.clone())])
                .unwrap_or_default(),
        }
    }
}

impl From<Value> for RowData {
    fn from(value: Value) -> Self {
        RowData::Scalar(value)
    }
}

impl From<Vec<Value>> for RowData {
    fn from(values: Vec<Value>) -> Self {
        RowData::Sequence(values)
    }
}

macro_rules! scalar_row_data {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for RowData {
                fn from(value: $ty) -> Self {
                    RowData::Scalar(value.into())
                }
            }
        )+
    };
}

scalar_row_data!(String, &str, i64, i32, usize, f64, f32, bool);

macro_rules! tuple_row_data {
    ($(($($name:ident),+)),+ $(,)?) => {
        $(
            impl<$($name: Into<Value>),+> From<($($name,)+)> for RowData {
                #[allow(non_snake_case)]
                fn from(($($name,)+): ($($name,)+)) -> Self {
                    RowData::Sequence(vec![$($name.into()),+])
                }
            }
        )+
    };
}

tuple_row_data!((A), (A, B), (A, B, C), (A, B, C, D), (A, B, C, D, E));
