use super::{
    cache::ProjectionCache,
    models::{
        RiskLevel,
        HIGH_RISK_THRESHOLD,
        HORIZON_YEARS,
    },
};

/// Years-ahead selection and the risk shown for it.
///
/// The displayed value is re-derived every time the offset or the cache
/// changes. When the offset does not index into the cached projection the
/// previous value is kept.
#[derive(Debug, Clone)]
pub struct ScrubController {
    offset: u32,
    horizon: u32,
    displayed: f64,
}

impl Default for ScrubController {
    fn default() -> Self {
        Self::new(HORIZON_YEARS)
    }
}

impl ScrubController {
    pub fn new(horizon: u32) -> Self {
        Self { offset: 0, horizon, displayed: 0.0 }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    /// Out-of-range offsets are clamped into `0..=horizon`.
    pub fn set_offset(&mut self, offset: i64, cache: &ProjectionCache) -> u32 {
        self.offset = offset.clamp(0, self.horizon as i64) as u32;
        self.rederive(cache);
        self.offset
    }

    pub fn rederive(&mut self, cache: &ProjectionCache) {
        if let Some(point) = cache.current().and_then(|p| p.get(self.offset as usize)) {
            self.displayed = point.probability;
        }
    }

    pub fn derived_risk(&self) -> f64 {
        self.displayed
    }

    pub fn is_high_risk(&self) -> bool {
        self.displayed > HIGH_RISK_THRESHOLD
    }

    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_probability(self.displayed)
    }

    /// Patient age at the selected year.
    pub fn selected_age(&self, base_age: f64, cache: &ProjectionCache) -> i64 {
        cache
            .current()
            .and_then(|p| p.get(self.offset as usize))
            .map(|point| point.age)
            .unwrap_or_else(|| (base_age.trunc() as i64).saturating_add(self.offset as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{
        Generation,
        ParameterSet,
        Projection,
        ProjectionPoint,
    };

    fn projection(len: usize) -> Projection {
        Projection::new(
            (0..len)
                .map(|i| ProjectionPoint {
                    year_offset: i as u32,
                    age: 45 + i as i64,
                    probability: 0.1 + i as f64 * 0.03,
                })
                .collect(),
        )
    }

    fn cache_with(len: usize) -> ProjectionCache {
        let mut cache = ProjectionCache::new();
        cache.replace(Generation(1), ParameterSet::default(), projection(len));
        cache
    }

    #[test]
    fn test_every_offset_in_full_horizon() {
        let cache = cache_with(21);
        let mut scrub = ScrubController::default();

        for offset in 0..=20 {
            scrub.set_offset(offset, &cache);
            let expected = cache.current().unwrap().get(offset as usize).unwrap().probability;
            assert_eq!(scrub.derived_risk(), expected);
        }
    }

    #[test]
    fn test_offset_is_clamped() {
        let cache = cache_with(21);
        let mut scrub = ScrubController::default();

        assert_eq!(scrub.set_offset(35, &cache), 20);
        assert_eq!(scrub.derived_risk(), cache.current().unwrap().get(20).unwrap().probability);
        assert_eq!(scrub.set_offset(-4, &cache), 0);
        assert_eq!(scrub.derived_risk(), 0.1);
    }

    #[test]
    fn test_short_projection_keeps_previous_value() {
        let full = cache_with(21);
        let mut scrub = ScrubController::default();
        scrub.set_offset(2, &full);
        let previous = scrub.derived_risk();

        let short = cache_with(3);
        scrub.set_offset(5, &short);

        assert_eq!(scrub.offset(), 5);
        assert_eq!(scrub.derived_risk(), previous);
    }

    #[test]
    fn test_empty_cache_degrades_to_zero() {
        let mut scrub = ScrubController::default();
        scrub.set_offset(7, &ProjectionCache::new());

        assert_eq!(scrub.derived_risk(), 0.0);
        assert!(!scrub.is_high_risk());
        assert_eq!(scrub.selected_age(45.9, &ProjectionCache::new()), 52);
    }

    #[test]
    fn test_huge_age_without_projection_saturates() {
        let mut scrub = ScrubController::default();
        let empty = ProjectionCache::new();
        scrub.set_offset(5, &empty);

        assert_eq!(scrub.selected_age(1e300, &empty), i64::MAX);
        assert_eq!(scrub.selected_age(f64::NAN, &empty), 5);

        let short = cache_with(3);
        scrub.set_offset(10, &short);
        assert_eq!(scrub.selected_age(1e300, &short), i64::MAX);
    }

    #[test]
    fn test_high_risk_flag_follows_derivation() {
        let mut cache = ProjectionCache::new();
        cache.replace(
            Generation(1),
            ParameterSet::default(),
            Projection::new(vec![
                ProjectionPoint { year_offset: 0, age: 60, probability: 0.4 },
                ProjectionPoint { year_offset: 1, age: 61, probability: 0.7 },
            ]),
        );
        let mut scrub = ScrubController::default();

        scrub.set_offset(0, &cache);
        assert!(!scrub.is_high_risk());
        scrub.set_offset(1, &cache);
        assert!(scrub.is_high_risk());
        assert_eq!(scrub.risk_level(), RiskLevel::High);
        assert_eq!(scrub.selected_age(45.0, &cache), 61);
    }
}
