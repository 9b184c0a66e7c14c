//! [`Reflect`] for parsed configuration documents.
//!
//! Objects and tables are string-keyed maps, arrays are sequences and JSON
//! `null` is an absent optional. Scalars expose the payload stored in the
//! variant, so a JSON string assigns to a `String` field and a TOML integer
//! assigns to an `i64` field.

use std::any::Any;

use super::{KeyError, KeyedMap, Reflect, Shape};

#[cfg(feature = "serde_json")]
mod json {
    use serde_json::{Map, Number, Value};

    use super::{Any, KeyError, KeyedMap, Reflect, Shape};

    fn number_is_zero(number: &Number) -> bool {
        number.as_u64() == Some(0)
            || number.as_i64() == Some(0)
            || number.as_f64().is_some_and(|value| value.to_bits() == 0)
    }

    impl Reflect for Value {
        fn shape(&self) -> Shape<'_> {
            match self {
                Self::Null => Shape::Optional(None),
                Self::Array(items) => Shape::Sequence(items),
                Self::Object(map) => Shape::Map(map),
                Self::Bool(_) | Self::Number(_) | Self::String(_) => Shape::Leaf,
            }
        }

        fn as_any(&self) -> &dyn Any {
            match self {
                Self::Bool(flag) => flag,
                Self::Number(number) => number,
                Self::String(text) => text,
                Self::Array(items) => items,
                Self::Object(map) => map,
                Self::Null => self,
            }
        }

        fn is_zero(&self) -> bool {
            match self {
                Self::Null => true,
                Self::Bool(flag) => !flag,
                Self::Number(number) => number_is_zero(number),
                Self::String(text) => text.is_empty(),
                Self::Array(items) => items.is_empty(),
                Self::Object(map) => map.is_empty(),
            }
        }

        fn as_text(&self) -> Option<&str> {
            self.as_str()
        }

        fn type_name(&self) -> &'static str {
            match self {
                Self::Null => "serde_json::Value (null)",
                Self::Bool(_) => "bool",
                Self::Number(_) => "serde_json::Number",
                Self::String(_) => "alloc::string::String",
                Self::Array(_) => "serde_json::Value (array)",
                Self::Object(_) => "serde_json::Value (object)",
            }
        }
    }

    impl Reflect for Number {
        fn shape(&self) -> Shape<'_> {
            Shape::Leaf
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn is_zero(&self) -> bool {
            number_is_zero(self)
        }
    }

    impl KeyedMap for Map<String, Value> {
        fn lookup(&self, segment: &str) -> Result<Option<&dyn Reflect>, KeyError> {
            Ok(self.get(segment).map(|value| value as &dyn Reflect))
        }

        fn is_empty(&self) -> bool {
            self.is_empty()
        }
    }

    impl Reflect for Map<String, Value> {
        fn shape(&self) -> Shape<'_> {
            Shape::Map(self)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn is_zero(&self) -> bool {
            self.is_empty()
        }
    }
}

#[cfg(feature = "toml")]
mod toml_value {
    use toml::value::{Datetime, Value};
    use toml::Table;

    use super::{Any, KeyError, KeyedMap, Reflect, Shape};

    impl Reflect for Value {
        fn shape(&self) -> Shape<'_> {
            match self {
                Self::Array(items) => Shape::Sequence(items),
                Self::Table(table) => Shape::Map(table),
                Self::String(_)
                | Self::Integer(_)
                | Self::Float(_)
                | Self::Boolean(_)
                | Self::Datetime(_) => Shape::Leaf,
            }
        }

        fn as_any(&self) -> &dyn Any {
            match self {
                Self::String(text) => text,
                Self::Integer(number) => number,
                Self::Float(number) => number,
                Self::Boolean(flag) => flag,
                Self::Datetime(stamp) => stamp,
                Self::Array(items) => items,
                Self::Table(table) => table,
            }
        }

        fn is_zero(&self) -> bool {
            match self {
                Self::String(text) => text.is_empty(),
                Self::Integer(number) => *number == 0,
                Self::Float(number) => number.to_bits() == 0,
                Self::Boolean(flag) => !flag,
                Self::Datetime(_) => false,
                Self::Array(items) => items.is_empty(),
                Self::Table(table) => table.is_empty(),
            }
        }

        fn as_text(&self) -> Option<&str> {
            self.as_str()
        }

        fn type_name(&self) -> &'static str {
            match self {
                Self::String(_) => "alloc::string::String",
                Self::Integer(_) => "i64",
                Self::Float(_) => "f64",
                Self::Boolean(_) => "bool",
                Self::Datetime(_) => "toml::value::Datetime",
                Self::Array(_) => "toml::Value (array)",
                Self::Table(_) => "toml::Value (table)",
            }
        }
    }

    impl Reflect for Datetime {
        fn shape(&self) -> Shape<'_> {
            Shape::Leaf
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn is_zero(&self) -> bool {
            false
        }
    }

    impl KeyedMap for Table {
        fn lookup(&self, segment: &str) -> Result<Option<&dyn Reflect>, KeyError> {
            Ok(self.get(segment).map(|value| value as &dyn Reflect))
        }

        fn is_empty(&self) -> bool {
            self.is_empty()
        }
    }

    impl Reflect for Table {
        fn shape(&self) -> Shape<'_> {
            Shape::Map(self)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn is_zero(&self) -> bool {
            self.is_empty()
        }
    }
}
