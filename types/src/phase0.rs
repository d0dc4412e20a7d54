pub mod consts;
pub mod containers;
pub mod primitives;
