use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyDemandDto {
    pub hour: u32,
    #[serde(default)]
    pub required_register: u32,
    #[serde(default)]
    pub required_product: u32,
    #[serde(default)]
    pub required_parking_helm: u32,
}

/// Required crew counts for register/product/parking-helm in a single
/// hour of the day.
#[derive(Debug, Clone)]
pub struct HourlyDemand {
    pub hour: u32,
    pub required_register: u32,
    pub required_product: u32,
    pub required_parking_helm: u32,
}

impl From<&HourlyDemandDto> for HourlyDemand {
    fn from(dto: &HourlyDemandDto) -> Self {
        HourlyDemand {
            hour: dto.hour,
            required_register: dto.required_register,
            required_product: dto.required_product,
            required_parking_helm: dto.required_parking_helm,
        }
    }
}

impl HourlyDemand {
    /// (role, required-count) pairs with a positive requirement, joined
    /// against the role registry's canonical role codes.
    pub fn nonzero_requirements(&self) -> Vec<(&'static str, u32)> {
        use crate::role_registry::{PARKING_HELM, PRODUCT, REGISTER};
        let mut out = Vec::new();
        if self.required_register > 0 {
            out.push((REGISTER, self.required_register));
        }
        if self.required_product > 0 {
            out.push((PRODUCT, self.required_product));
        }
        if self.required_parking_helm > 0 {
            out.push((PARKING_HELM, self.required_parking_helm));
        }
        out
    }
}
