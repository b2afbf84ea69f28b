//! Iterators which run in parallel if the `rayon` feature is enabled.

#[cfg(feature = "rayon")]
pub use rayon::prelude::*;

#[cfg(feature = "rayon")]
pub trait MaybeParallelRefIterator<'a, T: Sync + 'a> {
    fn maybe_par_iter(&'a self) -> rayon::slice::Iter<'a, T>;
}

#[cfg(feature = "rayon")]
impl<'a, T: Sync + 'a> MaybeParallelRefIterator<'a, T> for [T] {
    fn maybe_par_iter(&'a self) -> rayon::slice::Iter<'a, T> {
        self.par_iter()
    }
}

#[cfg(not(feature = "rayon"))]
pub trait MaybeParallelRefIterator<'a, T: 'a> {
    fn maybe_par_iter(&'a self) -> std::slice::Iter<'a, T>;
}

#[cfg(not(feature = "rayon"))]
impl<'a, T: 'a> MaybeParallelRefIterator<'a, T> for [T] {
    fn maybe_par_iter(&'a self) -> std::slice::Iter<'a, T> {
        self.iter()
    }
}
