pub(crate) mod bounds;
pub(crate) mod frustum;
pub(crate) mod store;
