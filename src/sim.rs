pub(crate) mod agent;
pub(crate) mod mote;
pub(crate) mod node;
pub(crate) mod particle;
pub(crate) mod world;
