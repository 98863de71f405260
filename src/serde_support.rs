//! Serde integration (feature `serde`).
//!
//! A tree serializes as the in-order sequence of its *newest* version's
//! values; deserialization bulk-builds a fresh single-version tree. History
//! is deliberately not part of the format — this is value-level interchange,
//! not durable persistence, which the engine does not promise.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::compare::Comparator;
use crate::tree::PersistentTree;

impl<T, C> Serialize for PersistentTree<T, C>
where
    T: Serialize,
    C: Comparator<T>,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T, C> Deserialize<'de> for PersistentTree<T, C>
where
    T: Deserialize<'de>,
    C: Comparator<T> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TreeVisitor<T, C>(PhantomData<fn() -> (T, C)>);

        impl<'de, T, C> Visitor<'de> for TreeVisitor<T, C>
        where
            T: Deserialize<'de>,
            C: Comparator<T> + Default,
        {
            type Value = PersistentTree<T, C>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a sequence of tree values")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(value) = seq.next_element()? {
                    values.push(value);
                }
                Ok(PersistentTree::from_values_with(C::default(), values))
            }
        }

        deserializer.deserialize_seq(TreeVisitor(PhantomData))
    }
}
