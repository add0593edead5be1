pub mod classical_sampler;
pub mod hybrid_sampler;

pub use classical_sampler::ClassicalSampler;
pub use hybrid_sampler::HybridSampler;
