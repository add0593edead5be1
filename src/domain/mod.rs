pub mod error;
pub mod fingerprint;
pub mod parameters;
pub mod run;
pub mod sampler;
pub mod sampler_factory;
pub mod samplers;
pub mod solver;
pub mod validate;
