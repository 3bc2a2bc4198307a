pub(crate) mod frames;
pub(crate) mod kernel;
pub(crate) mod morph;
