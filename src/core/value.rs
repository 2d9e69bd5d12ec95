//! Type-erased values passed between pipeline steps.

use std::any::{type_name, Any};
use std::fmt;

/// A boxed value whose concrete type is recovered with a checked downcast.
///
/// The original type name is kept next to the payload so that a failed
/// downcast can report what was actually produced.
pub struct ErasedValue {
    inner: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl ErasedValue {
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self {
            inner: Box::new(value),
            type_name: type_name::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Recovers the concrete value, or hands the container back unchanged.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        let type_name = self.type_name;
        match self.inner.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(inner) => Err(Self { inner, type_name }),
        }
    }
}

impl fmt::Debug for ErasedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
