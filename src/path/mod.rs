mod generic_path;
pub use generic_path::*;

/// a Type to represent the Cost of traversing a Path
pub type Cost = f64;
