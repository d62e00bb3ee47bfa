//! `Reflect` implementations for standard library types
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use super::{Reflect, Scalar, Shape};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

macro_rules! reflect_scalar {
    ($variant:ident as $target:ty: $($ty:ty),+) => {
        $(
            impl Reflect for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar(Scalar::$variant(*self as $target))
                }
            }
        )+
    };
}

reflect_scalar!(Int as i64: i8, i16, i32, i64, isize);
reflect_scalar!(Uint as u64: u8, u16, u32, u64, usize);
reflect_scalar!(Float as f64: f32, f64);

impl Reflect for bool {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Bool(*self))
    }
}

impl Reflect for str {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Str(self))
    }
}

impl Reflect for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Str(self))
    }
}

impl Reflect for Cow<'_, str> {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Str(self))
    }
}

impl Reflect for () {
    fn shape(&self) -> Shape<'_> {
        Shape::Opaque
    }
}

// Indirection is transparent.
macro_rules! reflect_pointer {
    ($($ptr:ident),+) => {
        $(
            impl<T: Reflect + ?Sized> Reflect for $ptr<T> {
                fn shape(&self) -> Shape<'_> {
                    (**self).shape()
                }
            }
        )+
    };
}

reflect_pointer!(Box, Rc, Arc);

impl<T: Reflect + ?Sized> Reflect for &T {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Nullable(self.as_ref().map(|value| value as &dyn Reflect))
    }
}

fn sequence<'a, T: Reflect + 'a>(items: impl Iterator<Item = &'a T>) -> Shape<'a> {
    Shape::Sequence(items.map(|item| item as &dyn Reflect).collect())
}

impl<T: Reflect> Reflect for [T] {
    fn shape(&self) -> Shape<'_> {
        sequence(self.iter())
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn shape(&self) -> Shape<'_> {
        sequence(self.iter())
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        sequence(self.iter())
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn shape(&self) -> Shape<'_> {
        sequence(self.iter())
    }
}

impl<T: Reflect> Reflect for BTreeSet<T> {
    fn shape(&self) -> Shape<'_> {
        sequence(self.iter())
    }
}

// Hash containers are sorted so error order is stable between runs.
impl<T: Reflect + Ord, S> Reflect for HashSet<T, S> {
    fn shape(&self) -> Shape<'_> {
        let mut items: Vec<&T> = self.iter().collect();
        items.sort();
        sequence(items.into_iter())
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        Shape::Mapping(
            self.iter()
                .map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect))
                .collect(),
        )
    }
}

impl<K: Reflect + Ord, V: Reflect, S> Reflect for HashMap<K, V, S> {
    fn shape(&self) -> Shape<'_> {
        let mut entries: Vec<(&K, &V)> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        Shape::Mapping(
            entries
                .into_iter()
                .map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect))
                .collect(),
        )
    }
}
