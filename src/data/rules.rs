//! Farm rules loading (RON).

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use crate::shared::FarmRules;

impl FarmRules {
    /// Parse rules from RON. Missing fields keep their defaults.
    pub fn from_ron(text: &str) -> Result<Self, String> {
        let rules: FarmRules =
            ron::from_str(text).map_err(|e| format!("Rules parse failed: {}", e))?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Read failed for {}: {}", path.display(), e))?;
        Self::from_ron(&text)
    }

    /// Load from `path`, falling back to defaults when it is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(rules) => {
                info!("[Rules] Loaded farm rules from {}", path.display());
                rules
            }
            Err(e) => {
                warn!("[Rules] {}. Using default rules.", e);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.max_energy <= 0 {
            return Err(format!("max_energy must be positive, got {}", self.max_energy));
        }
        if !(0.0..=1.0).contains(&self.soil_decay_chance) {
            return Err(format!(
                "soil_decay_chance must be within 0..=1, got {}",
                self.soil_decay_chance
            ));
        }
        if self.notification_secs < 0.0 {
            return Err("notification_secs must not be negative".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_ron_keeps_defaults() {
        let rules = FarmRules::from_ron("(max_water: 20, rng_seed: Some(7))").unwrap();
        assert_eq!(rules.max_water, 20);
        assert_eq!(rules.rng_seed, Some(7));
        assert_eq!(rules.max_energy, 50);
        assert_eq!(rules.initial_money, 100);
        assert_eq!(rules.wither_after_dry_nights, None);
    }

    #[test]
    fn empty_struct_is_default() {
        assert_eq!(FarmRules::from_ron("()").unwrap(), FarmRules::default());
    }

    #[test]
    fn rejects_out_of_range_decay() {
        let err = FarmRules::from_ron("(soil_decay_chance: 1.5)").unwrap_err();
        assert!(err.contains("soil_decay_chance"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(FarmRules::from_ron("not ron at all {").is_err());
    }

    #[test]
    fn missing_file_falls_back() {
        let rules = FarmRules::load_or_default(Path::new("/definitely/not/here.ron"));
        assert_eq!(rules, FarmRules::default());
    }
}
