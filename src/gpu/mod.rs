pub(crate) mod backend;
pub(crate) mod batch;
pub(crate) mod recording;
