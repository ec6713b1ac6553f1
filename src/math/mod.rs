//! Numerical kernels: the shared smooth step, grids, quadrature and root finding.

pub mod grid;
pub mod quad;
pub mod roots;
pub mod special;

pub use grid::*;
pub use quad::*;
pub use roots::*;
pub use special::*;
