pub(crate) mod compiler;
pub(crate) mod cover;
pub(crate) mod plan;
