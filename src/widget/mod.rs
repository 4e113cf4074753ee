//! Widget system: the trait custom elements implement.

pub mod traits;

pub use traits::Widget;
