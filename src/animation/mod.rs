pub(crate) mod ease;
pub(crate) mod envelope;
pub(crate) mod signal;
