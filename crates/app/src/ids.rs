//! Typed Ids

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
    num::ParseIntError,
    str::FromStr,
};

/// Marker for ids handed to the core by the identity context.
#[derive(Debug)]
pub enum Owner {}

/// Buyer the cart and orders belong to.
pub type OwnerId = TypedId<Owner>;

/// Integer row id tagged with the kind of entity it identifies.
pub struct TypedId<T>(i64, PhantomData<T>);

impl<T> TypedId<T> {
    /// Wrap a raw row id.
    pub const fn new(id: i64) -> Self {
        Self(id, PhantomData)
    }

    /// The raw row id.
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl<T> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedId<T> {}

impl<T> Debug for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for TypedId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for TypedId<T> {}

impl<T> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for TypedId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TypedId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> From<i64> for TypedId<T> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<T> From<TypedId<T>> for i64 {
    fn from(value: TypedId<T>) -> Self {
        value.into_inner()
    }
}

impl<T> FromStr for TypedId<T> {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Widget;

    #[derive(Debug)]
    struct Gadget;

    #[test]
    fn ids_of_the_same_kind_compare_by_value() {
        let a = TypedId::<Widget>::new(7);
        let b = TypedId::<Widget>::from(7);

        assert_eq!(a, b);
        assert!(TypedId::<Widget>::new(1) < TypedId::<Widget>::new(2));
    }

    #[test]
    fn parse_accepts_surrounding_whitespace() {
        let id: TypedId<Gadget> = " 42 ".parse().expect("id should parse");

        assert_eq!(id.into_inner(), 42);
    }

    #[test]
    fn parse_rejects_non_numeric_input() {
        assert!("abc".parse::<TypedId<Gadget>>().is_err());
    }

    #[test]
    fn display_prints_the_raw_id() {
        assert_eq!(TypedId::<Widget>::new(12).to_string(), "12");
    }
}
