pub mod assets;
pub mod collect;
