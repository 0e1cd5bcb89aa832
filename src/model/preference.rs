use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceDto {
    pub crew_id: String,
    pub preference_type: String,
    pub role: Option<String>,
    pub base_weight: f64,
    pub crew_weight: Option<f64>,
    pub adaptive_boost: Option<f64>,
    pub int_value: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKind {
    FirstHour,
    Favorite,
    Consecutive,
    Timing,
}

impl PreferenceKind {
    fn parse(raw: &str) -> Result<Self> {
        match raw {
            "FIRST_HOUR" => Ok(PreferenceKind::FirstHour),
            "FAVORITE" => Ok(PreferenceKind::Favorite),
            "CONSECUTIVE" => Ok(PreferenceKind::Consecutive),
            "TIMING" => Ok(PreferenceKind::Timing),
            other => Err(Error::Construction(format!("unknown preference type '{}'", other))),
        }
    }
}

/// A single weighted soft preference (spec §4.5). `effective_weight`
/// folds base/crew/adaptive into the single multiplier the objective
/// terms are built from, or `None` when the term should be dropped
/// entirely.
#[derive(Debug, Clone)]
pub struct Preference {
    pub crew_id: String,
    pub kind: PreferenceKind,
    pub role: Option<String>,
    pub base_weight: f64,
    pub crew_weight: Option<f64>,
    pub adaptive_boost: Option<f64>,
    pub int_value: Option<i64>,
}

impl Preference {
    pub fn from_dto(dto: &PreferenceDto) -> Result<Self> {
        Ok(Preference {
            crew_id: dto.crew_id.clone(),
            kind: PreferenceKind::parse(&dto.preference_type)?,
            role: dto.role.clone(),
            base_weight: dto.base_weight,
            crew_weight: dto.crew_weight,
            adaptive_boost: dto.adaptive_boost,
            int_value: dto.int_value,
        })
    }

    /// w = base * crew * adaptive, with the null/non-positive rules from
    /// spec §4.5:
    /// - crew-weight absent -> default multiplier 1
    /// - crew-weight <= 0 -> term dropped (`None`)
    /// - base <= 0 but an explicit crew-weight present -> crew * adaptive
    /// - otherwise -> full product
    pub fn effective_weight(&self) -> Option<f64> {
        let adaptive = self.adaptive_boost.unwrap_or(1.0);

        match self.crew_weight {
            Some(crew_weight) if crew_weight <= 0.0 => None,
            Some(crew_weight) => {
                if self.base_weight <= 0.0 {
                    Some(crew_weight * adaptive)
                } else {
                    Some(self.base_weight * crew_weight * adaptive)
                }
            }
            None => Some(self.base_weight * adaptive),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pref(base: f64, crew: Option<f64>, adaptive: Option<f64>) -> Preference {
        Preference { crew_id: "c1".to_string(), kind: PreferenceKind::Favorite, role: None, base_weight: base, crew_weight: crew, adaptive_boost: adaptive, int_value: None }
    }

    #[test]
    fn default_crew_weight_is_one() {
        assert_eq!(pref(10.0, None, None).effective_weight(), Some(10.0));
    }

    #[test]
    fn non_positive_crew_weight_drops_term() {
        assert_eq!(pref(10.0, Some(0.0), None).effective_weight(), None);
        assert_eq!(pref(10.0, Some(-1.0), None).effective_weight(), None);
    }

    #[test]
    fn non_positive_base_with_explicit_crew_weight_uses_crew_times_adaptive() {
        assert_eq!(pref(0.0, Some(3.0), Some(2.0)).effective_weight(), Some(6.0));
    }

    #[test]
    fn full_product_when_all_present_and_positive() {
        assert_eq!(pref(10.0, Some(2.0), Some(1.5)).effective_weight(), Some(30.0));
    }
}
