pub(crate) mod grower;
