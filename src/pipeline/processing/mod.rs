// Column detection and row flattening stages

pub mod categories;
pub mod columns;
pub mod normalize;
