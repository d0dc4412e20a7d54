use std::sync::Arc;

use easy_ext::ext;

#[ext(ArcExt)]
pub impl<T: ?Sized> Arc<T> {
    #[must_use]
    fn clone_arc(&self) -> Self {
        Self::clone(self)
    }
}

#[ext(DefaultExt)]
pub impl<T: PartialEq + Default> T {
    fn is_default(&self) -> bool {
        *self == T::default()
    }
}
