use std::borrow::Cow;
use std::fmt;

use serde_json::{Map, Value};

/// Names a type so it can be declared as a selector.
///
/// Tokens compare by name. `TypeToken::of::<f64>()` is named `f64`, so it
/// matches a manifest token only when the manifest spells the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeToken(Cow<'static, str>);

impl TypeToken {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self(Cow::Borrowed(std::any::type_name::<T>()))
    }

    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A value a candidate can be selected by.
///
/// Only `Text` takes part in case folding. `Symbol` is text that is frozen
/// and always compared exactly. Everything else compares by raw equality,
/// including `Json`, which holds manifest values with no closer variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    Text(String),
    Symbol(String),
    Integer(i64),
    Float(f64),
    Type(TypeToken),
    Json(Value),
    List(Vec<Selector>),
}

impl Selector {
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::Type(TypeToken::of::<T>())
    }

    pub fn as_list(&self) -> Option<&[Selector]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn can_fold(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Returns the selector as it is compared, lowercasing text when
    /// `case_fold` is set. The receiver is never modified.
    pub fn folded(&self, case_fold: bool) -> Cow<'_, Selector> {
        match self {
            Self::Text(text) if case_fold => {
                let lower = text.to_lowercase();
                if lower == *text {
                    Cow::Borrowed(self)
                } else {
                    Cow::Owned(Self::Text(lower))
                }
            }
            _ => Cow::Borrowed(self),
        }
    }

    pub fn into_folded(self, case_fold: bool) -> Self {
        match self {
            Self::Text(text) if case_fold => Self::Text(text.to_lowercase()),
            other => other,
        }
    }

    /// Appends the selector to `out`, splicing nested lists in depth first.
    pub fn flatten_into(self, out: &mut Vec<Selector>) {
        match self {
            Self::List(items) => items.into_iter().for_each(|item| item.flatten_into(out)),
            other => out.push(other),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) | Self::Symbol(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Type(token) => write!(f, "{token}"),
            Self::Json(value) => write!(f, "{value}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for Selector {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Selector {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Selector {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Selector {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Selector {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<TypeToken> for Selector {
    fn from(value: TypeToken) -> Self {
        Self::Type(value)
    }
}

impl<T: Into<Selector>> From<Vec<T>> for Selector {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<Value> for Selector {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Number(number) => match (number.as_i64(), number.as_f64()) {
                (Some(int), _) => Self::Integer(int),
                (None, Some(float)) => Self::Float(float),
                (None, None) => Self::Json(Value::Number(number)),
            },
            Value::Array(items) => Self::List(items.into_iter().map(Selector::from).collect()),
            Value::Object(map) => {
                tagged_selector(&map).unwrap_or_else(|| Self::Json(Value::Object(map)))
            }
            other => Self::Json(other),
        }
    }
}

/// `{"type": "Float"}` or `{"symbol": "name"}`.
fn tagged_selector(map: &Map<String, Value>) -> Option<Selector> {
    if map.len() != 1 {
        return None;
    }
    let (tag, name) = map.iter().next()?;
    let name = name.as_str()?.to_string();
    match tag.as_str() {
        "type" => Some(Selector::Type(TypeToken::named(name))),
        "symbol" => Some(Selector::Symbol(name)),
        _ => None,
    }
}
