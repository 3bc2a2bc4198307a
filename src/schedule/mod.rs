pub(crate) mod dilation;
pub(crate) mod lexer;
pub(crate) mod parser;
pub(crate) mod timing;
pub(crate) mod weights;
