//! Serde support, behind the `serde` feature.
//!
//! Vectors and masks serialize as fixed-length tuples of their `N` elements,
//! so a `LogicalVector<f32, 4>` has the same representation as `[f32; 4]`.

use core::fmt;
use core::marker::PhantomData;

use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeTuple, Serializer};

use crate::common::scalar::Scalar;

use super::mask::LogicalMask;
use super::shape::{Lanes, Shape};
use super::vector::LogicalVector;

fn serialize_elements<S, E, const N: usize>(elements: &[E; N], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    E: Serialize,
{
    let mut tuple = serializer.serialize_tuple(N)?;
    for e in elements {
        tuple.serialize_element(e)?;
    }
    tuple.end()
}

struct ElementsVisitor<E, const N: usize>(PhantomData<E>);

impl<'de, E, const N: usize> Visitor<'de> for ElementsVisitor<E, N>
where
    E: Deserialize<'de> + Copy + Default,
{
    type Value = [E; N];

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a sequence of {N} elements")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<[E; N], A::Error> {
        let mut out = [E::default(); N];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(i, &self))?;
        }
        if seq.next_element::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(N + 1, &self));
        }
        Ok(out)
    }
}

fn deserialize_elements<'de, D, E, const N: usize>(deserializer: D) -> Result<[E; N], D::Error>
where
    D: Deserializer<'de>,
    E: Deserialize<'de> + Copy + Default,
{
    deserializer.deserialize_tuple(N, ElementsVisitor::<E, N>(PhantomData))
}

impl<T, const N: usize> Serialize for LogicalVector<T, N>
where
    T: Scalar + Serialize,
    Lanes<N>: Shape<T>,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_elements(&self.to_array(), serializer)
    }
}

impl<'de, T, const N: usize> Deserialize<'de> for LogicalVector<T, N>
where
    T: Scalar + Deserialize<'de>,
    Lanes<N>: Shape<T>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_elements(deserializer).map(Self::from_array)
    }
}

impl<T: Scalar, const N: usize> Serialize for LogicalMask<T, N>
where
    Lanes<N>: Shape<T>,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_elements(&self.to_array(), serializer)
    }
}

impl<'de, T: Scalar, const N: usize> Deserialize<'de> for LogicalMask<T, N>
where
    Lanes<N>: Shape<T>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_elements(deserializer).map(Self::from_array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_json() {
        let v = LogicalVector::<i32, 4>::from_array([1, -2, 3, -4]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[1,-2,3,-4]");

        let back: LogicalVector<i32, 4> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_array(), v.to_array());
    }

    #[test]
    fn test_partial_register_serializes_n_elements() {
        let v = LogicalVector::<f64, 1>::broadcast(0.5);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[0.5]");
    }

    #[test]
    fn test_mask_json() {
        let m = LogicalMask::<u16, 4>::from_array([true, false, false, true]);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[true,false,false,true]");
        assert_eq!(serde_json::from_str::<LogicalMask<u16, 4>>(&json).unwrap(), m);
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(serde_json::from_str::<LogicalVector<f32, 4>>("[1.0,2.0,3.0]").is_err());
        assert!(serde_json::from_str::<LogicalVector<f32, 4>>("[1.0,2.0,3.0,4.0,5.0]").is_err());
    }
}
