//! Numeric element types and promotion rules

pub mod complex;
pub mod element;
pub mod promotion;

pub use complex::Complex64;
pub use element::Element;
