use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Solver families the dashboard can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "EnumRepr")]
pub enum SamplerType {
    Hybrid,
    Classical,
}

impl SamplerType {
    pub const ALL: [SamplerType; 2] = [SamplerType::Hybrid, SamplerType::Classical];

    /// Parse sampler type from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hybrid" | "quantum" => Some(SamplerType::Hybrid),
            "classical" => Some(SamplerType::Classical),
            _ => None,
        }
    }

    /// Dropdown index used by the dashboard controls
    pub fn from_index(index: u64) -> Option<Self> {
        match index {
            0 => Some(SamplerType::Hybrid),
            1 => Some(SamplerType::Classical),
            _ => None,
        }
    }

    pub fn index(self) -> u64 {
        match self {
            SamplerType::Hybrid => 0,
            SamplerType::Classical => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SamplerType::Hybrid => "Quantum Hybrid",
            SamplerType::Classical => "Classical",
        }
    }

    /// Key under which results of this family are reported
    pub fn result_key(self) -> &'static str {
        match self {
            SamplerType::Hybrid => "quantum",
            SamplerType::Classical => "classical",
        }
    }
}

impl fmt::Display for SamplerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "EnumRepr")]
pub enum VehicleType {
    Trucks,
    DeliveryDrones,
}

impl VehicleType {
    pub const ALL: [VehicleType; 2] = [VehicleType::Trucks, VehicleType::DeliveryDrones];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "trucks" => Some(VehicleType::Trucks),
            "delivery_drones" => Some(VehicleType::DeliveryDrones),
            _ => None,
        }
    }

    pub fn from_index(index: u64) -> Option<Self> {
        match index {
            0 => Some(VehicleType::Trucks),
            1 => Some(VehicleType::DeliveryDrones),
            _ => None,
        }
    }

    pub fn index(self) -> u64 {
        match self {
            VehicleType::Trucks => 0,
            VehicleType::DeliveryDrones => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VehicleType::Trucks => "Trucks",
            VehicleType::DeliveryDrones => "Delivery Drones",
        }
    }
}

// The dashboard posts dropdown values as integers; API clients may use names.
#[derive(Deserialize)]
#[serde(untagged)]
enum EnumRepr {
    Index(u64),
    Name(String),
}

impl TryFrom<EnumRepr> for SamplerType {
    type Error = String;

    fn try_from(repr: EnumRepr) -> Result<Self, Self::Error> {
        match repr {
            EnumRepr::Index(i) => {
                SamplerType::from_index(i).ok_or_else(|| format!("unknown sampler type index {}", i))
            }
            EnumRepr::Name(name) => {
                SamplerType::from_str(&name).ok_or_else(|| format!("unknown sampler type '{}'", name))
            }
        }
    }
}

impl TryFrom<EnumRepr> for VehicleType {
    type Error = String;

    fn try_from(repr: EnumRepr) -> Result<Self, Self::Error> {
        match repr {
            EnumRepr::Index(i) => {
                VehicleType::from_index(i).ok_or_else(|| format!("unknown vehicle type index {}", i))
            }
            EnumRepr::Name(name) => {
                VehicleType::from_str(&name).ok_or_else(|| format!("unknown vehicle type '{}'", name))
            }
        }
    }
}

/// Everything the solver needs to know about a single run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProblemParameters {
    pub sampler_type: SamplerType,
    /// Seconds the backend may spend optimizing
    pub time_limit: f64,
}

impl ProblemParameters {
    pub fn new(sampler_type: SamplerType, time_limit: f64) -> Self {
        ProblemParameters {
            sampler_type,
            time_limit,
        }
    }
}

/// Snapshot of the dashboard controls at the moment a run was requested.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunConfiguration {
    pub sampler_type: SamplerType,
    pub vehicle_type: VehicleType,
    pub num_vehicles: u32,
    pub num_clients: u32,
    pub time_limit: f64,
}

impl RunConfiguration {
    pub fn problem_parameters(&self) -> ProblemParameters {
        ProblemParameters::new(self.sampler_type, self.time_limit)
    }

    /// Values that reset the results tables when changed, in fingerprint order.
    pub fn fingerprint_values(&self) -> [Value; 4] {
        [
            Value::from(self.vehicle_type.index()),
            Value::from(self.num_vehicles),
            Value::from(self.num_clients),
            Value::from(self.time_limit),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sampler_type_from_str() {
        assert_eq!(SamplerType::from_str("hybrid"), Some(SamplerType::Hybrid));
        assert_eq!(SamplerType::from_str("Quantum"), Some(SamplerType::Hybrid));
        assert_eq!(SamplerType::from_str("CLASSICAL"), Some(SamplerType::Classical));
        assert_eq!(SamplerType::from_str("kmeans"), None);
    }

    #[test]
    fn test_sampler_type_deserializes_from_index_or_name() {
        let from_index: SamplerType = serde_json::from_value(json!(1)).unwrap();
        assert_eq!(from_index, SamplerType::Classical);

        let from_name: SamplerType = serde_json::from_value(json!("hybrid")).unwrap();
        assert_eq!(from_name, SamplerType::Hybrid);

        assert!(serde_json::from_value::<SamplerType>(json!(7)).is_err());
    }

    #[test]
    fn test_vehicle_type_accepts_dashboard_spellings() {
        assert_eq!(VehicleType::from_str("Delivery Drones"), Some(VehicleType::DeliveryDrones));
        assert_eq!(VehicleType::from_str("delivery-drones"), Some(VehicleType::DeliveryDrones));
        let parsed: VehicleType = serde_json::from_value(json!(0)).unwrap();
        assert_eq!(parsed, VehicleType::Trucks);
    }

    #[test]
    fn test_index_round_trips_for_every_variant() {
        for sampler in SamplerType::ALL {
            assert_eq!(SamplerType::from_index(sampler.index()), Some(sampler));
        }
        for vehicle in VehicleType::ALL {
            assert_eq!(VehicleType::from_index(vehicle.index()), Some(vehicle));
        }
    }

    #[test]
    fn test_result_keys() {
        assert_eq!(SamplerType::Classical.result_key(), "classical");
        assert_eq!(SamplerType::Hybrid.result_key(), "quantum");
    }

    #[test]
    fn test_problem_parameters_from_configuration() {
        let configuration = RunConfiguration {
            sampler_type: SamplerType::Classical,
            vehicle_type: VehicleType::Trucks,
            num_vehicles: 3,
            num_clients: 4,
            time_limit: 12.5,
        };
        let parameters = configuration.problem_parameters();
        assert_eq!(parameters.sampler_type, SamplerType::Classical);
        assert_eq!(parameters.time_limit, 12.5);
    }
}
