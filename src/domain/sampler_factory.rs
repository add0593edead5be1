use crate::domain::parameters::SamplerType;
use crate::domain::sampler::Sampler;
use crate::domain::samplers::{ClassicalSampler, HybridSampler};

/// Create a sampler instance based on the specified type
pub fn create_sampler(sampler_type: SamplerType) -> Box<dyn Sampler> {
    match sampler_type {
        SamplerType::Hybrid => Box::new(HybridSampler::new()),
        SamplerType::Classical => Box::new(ClassicalSampler::new()),
    }
}
