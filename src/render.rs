pub(crate) mod composite;
pub(crate) mod holo;
pub(crate) mod output;
pub(crate) mod pipeline;
