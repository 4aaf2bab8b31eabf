pub mod flags;
pub mod history;
pub mod resolver;
pub mod sampler;
pub mod sequencer;
pub mod session;
pub mod surface;
