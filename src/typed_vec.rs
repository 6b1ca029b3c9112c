//! Index newtypes paired with a `Vec` that can only be indexed by them.
//!
//! Traversal bookkeeping is stored per node in dense vectors. Using a
//! dedicated index type keeps node positions from being mixed up with
//! counters and timestamps, which are plain `usize` as well.

macro_rules! define_indexed_vec {
    (
        $(#[$idx_meta:meta])*
        $idx_vis:vis struct $Idx:ident ;

        $(#[$vec_meta:meta])*
        $vec_vis:vis struct $Vec:ident ;
    ) => {
        // index newtype

        $(#[$idx_meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
            ::derive_more::From, ::derive_more::Into, ::derive_more::Display,
        )]
        #[display(fmt = "{}", _0)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $idx_vis struct $Idx(pub usize);

        // vector newtype

        $(#[$vec_meta])*
        #[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vec_vis struct $Vec<T>(::std::vec::Vec<T>);

        impl<T> ::std::ops::Index<$Idx> for $Vec<T> {
            type Output = T;
            #[inline] fn index(&self, i: $Idx) -> &Self::Output { &self.0[i.0] }
        }
        impl<T> ::std::ops::IndexMut<$Idx> for $Vec<T> {
            #[inline] fn index_mut(&mut self, i: $Idx) -> &mut Self::Output { &mut self.0[i.0] }
        }

        impl<T> $Vec<T> {
            /// A vector holding `len` copies of `value`.
            pub fn filled(len: usize, value: T) -> Self
            where
                T: Clone,
            {
                Self(::std::vec![value; len])
            }

            #[inline] pub fn new() -> Self { Self(::std::vec::Vec::new()) }
            #[inline] pub fn with_capacity(c: usize) -> Self { Self(::std::vec::Vec::with_capacity(c)) }

            #[inline] pub fn len(&self) -> usize { self.0.len() }
            #[inline] pub fn is_empty(&self) -> bool { self.0.is_empty() }

            #[inline] pub fn push(&mut self, value: T) -> $Idx {
                self.0.push(value);
                $Idx(self.0.len() - 1)
            }

            #[inline] pub fn get(&self, idx: $Idx) -> Option<&T> { self.0.get(idx.0) }
            #[inline] pub fn get_mut(&mut self, idx: $Idx) -> Option<&mut T> { self.0.get_mut(idx.0) }

            #[inline] pub fn iter<'a>(&'a self) -> ::std::iter::Map<
                ::std::iter::Enumerate<::std::slice::Iter<'a, T>>,
                fn((usize, &T)) -> ($Idx, &T),
            > {
                self.0.iter().enumerate().map(|(u, t)| ($Idx(u), t))
            }

            #[inline] pub fn raw(&self) -> &[T] { &self.0 }
        }

        impl<T> ::std::iter::FromIterator<T> for $Vec<T> {
            #[inline] fn from_iter<I: ::std::iter::IntoIterator<Item = T>>(it: I) -> Self {
                Self(::std::vec::Vec::from_iter(it))
            }
        }

        impl<T> ::std::convert::From<::std::vec::Vec<T>> for $Vec<T> {
            #[inline] fn from(v: ::std::vec::Vec<T>) -> Self { Self(v) }
        }

        impl<'a, T> ::std::iter::IntoIterator for &'a $Vec<T> {
            type Item = ($Idx, &'a T);
            type IntoIter = ::std::iter::Map<
                ::std::iter::Enumerate<::std::slice::Iter<'a, T>>,
                fn((usize, &T)) -> ($Idx, &T),
            >;
            fn into_iter(self) -> Self::IntoIter {
                self.iter()
            }
        }
    };
}

pub(crate) use define_indexed_vec;

#[cfg(test)]
mod test {
    define_indexed_vec!(
        struct Slot;

        struct SlotVec;
    );

    #[test]
    fn push_returns_typed_position() {
        let mut v = SlotVec::new();
        assert_eq!(v.push('a'), Slot(0));
        assert_eq!(v.push('b'), Slot(1));
        assert_eq!(v[Slot(1)], 'b');
        assert_eq!(v.get(Slot(2)), None);
    }

    #[test]
    fn filled_and_iter() {
        let mut v = SlotVec::filled(3, 0usize);
        v[Slot(2)] = 7;
        let collected: Vec<_> = v.iter().map(|(i, x)| (usize::from(i), *x)).collect();
        assert_eq!(collected, vec![(0, 0), (1, 0), (2, 7)]);
        assert_eq!(format!("{}", Slot(4)), "4");
    }
}
