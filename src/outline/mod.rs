pub(crate) mod config;
pub(crate) mod debug;
pub(crate) mod effect;
pub(crate) mod items;
pub(crate) mod job;
pub(crate) mod mask;
pub(crate) mod params;
pub(crate) mod plumber;
pub(crate) mod resources;
pub(crate) mod shaders;
pub(crate) mod task;
