pub(crate) mod face;
pub(crate) mod fit;
