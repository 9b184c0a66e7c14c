//! [`Reflect`] implementations for standard library types.

use std::any::Any;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use super::{KeyError, KeyedMap, MapKey, Reflect, Sequence, Shape};

macro_rules! leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Leaf
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn is_zero(&self) -> bool {
                    *self == <$ty>::default()
                }
            }
        )*
    };
}

leaf!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    Duration,
);

macro_rules! float_leaf {
    ($($ty:ty),*) => {
        $(
            impl Reflect for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Leaf
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }

                // Negative zero has a non-zero bit pattern and is not a zero value.
                fn is_zero(&self) -> bool {
                    self.to_bits() == 0
                }
            }
        )*
    };
}

float_leaf!(f32, f64);

impl Reflect for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Leaf
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn as_text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl Reflect for &'static str {
    fn shape(&self) -> Shape<'_> {
        Shape::Leaf
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn as_text(&self) -> Option<&str> {
        Some(*self)
    }
}

impl Reflect for Cow<'static, str> {
    fn shape(&self) -> Shape<'_> {
        Shape::Leaf
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn as_text(&self) -> Option<&str> {
        Some(self.as_ref())
    }
}

impl Reflect for PathBuf {
    fn shape(&self) -> Shape<'_> {
        Shape::Leaf
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn is_zero(&self) -> bool {
        self.as_os_str().is_empty()
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Optional(self.as_ref().map(|inner| inner as &dyn Reflect))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

macro_rules! transparent_pointer {
    ($($ptr:ident),*) => {
        $(
            impl<T: Reflect + ?Sized> Reflect for $ptr<T> {
                fn shape(&self) -> Shape<'_> {
                    (**self).shape()
                }

                fn as_any(&self) -> &dyn Any {
                    (**self).as_any()
                }

                fn is_zero(&self) -> bool {
                    (**self).is_zero()
                }

                fn as_text(&self) -> Option<&str> {
                    (**self).as_text()
                }

                fn type_name(&self) -> &'static str {
                    (**self).type_name()
                }
            }
        )*
    };
}

transparent_pointer!(Box, Rc, Arc);

impl<T: Reflect> Sequence for Vec<T> {
    fn len(&self) -> usize {
        self.len()
    }

    fn element(&self, index: usize) -> Option<&dyn Reflect> {
        self.get(index).map(|item| item as &dyn Reflect)
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Reflect> Sequence for VecDeque<T> {
    fn len(&self) -> usize {
        self.len()
    }

    fn element(&self, index: usize) -> Option<&dyn Reflect> {
        self.get(index).map(|item| item as &dyn Reflect)
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Reflect, const N: usize> Sequence for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn element(&self, index: usize) -> Option<&dyn Reflect> {
        self.get(index).map(|item| item as &dyn Reflect)
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn is_zero(&self) -> bool {
        self.iter().all(Reflect::is_zero)
    }
}

impl MapKey for String {
    fn from_segment(segment: &str) -> Result<Self, KeyError> {
        Ok(segment.to_owned())
    }
}

impl MapKey for Box<str> {
    fn from_segment(segment: &str) -> Result<Self, KeyError> {
        Ok(segment.into())
    }
}

macro_rules! parsed_key {
    ($($ty:ty),*) => {
        $(
            impl MapKey for $ty {
                fn from_segment(segment: &str) -> Result<Self, KeyError> {
                    segment
                        .parse::<$ty>()
                        .map_err(|err| KeyError::new::<$ty>(segment, err))
                }
            }
        )*
    };
}

parsed_key!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);

impl<K, V, S> KeyedMap for HashMap<K, V, S>
where
    K: MapKey + Eq + Hash,
    V: Reflect,
    S: BuildHasher,
{
    fn lookup(&self, segment: &str) -> Result<Option<&dyn Reflect>, KeyError> {
        let key = K::from_segment(segment)?;
        Ok(self.get(&key).map(|value| value as &dyn Reflect))
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> Reflect for HashMap<K, V, S>
where
    K: MapKey + Eq + Hash + 'static,
    V: Reflect,
    S: BuildHasher + 'static,
{
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

impl<K, V> KeyedMap for BTreeMap<K, V>
where
    K: MapKey + Ord,
    V: Reflect,
{
    fn lookup(&self, segment: &str) -> Result<Option<&dyn Reflect>, KeyError> {
        let key = K::from_segment(segment)?;
        Ok(self.get(&key).map(|value| value as &dyn Reflect))
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Reflect for BTreeMap<K, V>
where
    K: MapKey + Ord + 'static,
    V: Reflect,
{
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
