pub mod ordered;

pub use ordered::{End, Iter, OrderedStore};
