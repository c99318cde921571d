pub(crate) mod fields;
pub(crate) mod icons;
pub(crate) mod pass;
pub(crate) mod qr;
pub(crate) mod rating;
