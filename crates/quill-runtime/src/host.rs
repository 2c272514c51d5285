//! Host-side predictor orchestration.
//!
//! [`PredictionHost`] owns the discovery registry and the currently active
//! predictor. The active choice is a descriptor id from configuration; an
//! absent, malformed, or unknown id falls back to the null predictor, so the
//! host always has a predictor to drive: "no prediction" is a predictor,
//! not a special case.

use std::path::PathBuf;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use quill_predict::NullPredictor;

use crate::config::QuillConfig;
use crate::error::{RuntimeError, RuntimeResult};
use crate::registry::{ActivePredictor, PredictorRegistry};

/// Owns the predictor registry and the active predictor instance.
pub struct PredictionHost {
    registry: PredictorRegistry,
    settings_dir: PathBuf,
    word_count: usize,
    active: RwLock<ActivePredictor>,
}

impl PredictionHost {
    /// Builds a host from configuration loaded from the default locations.
    pub fn from_default_config() -> RuntimeResult<Self> {
        let config = crate::config::load_config()?;
        Self::from_config(&config)
    }

    /// Builds a host from configuration.
    ///
    /// Discovers registered predictors, activates the configured one (or the
    /// null predictor when the configured id is absent, malformed, or
    /// unknown), pushes the configured word count through the instance's
    /// invocation bridge, and loads the instance's settings.
    pub fn from_config(config: &QuillConfig) -> RuntimeResult<Self> {
        let registry = PredictorRegistry::discover();

        let fallback = Uuid::try_parse(NullPredictor::ID).unwrap_or(Uuid::nil());
        let id = match &config.predictor.active {
            None => fallback,
            Some(raw) => match Uuid::try_parse(raw) {
                Ok(id) if registry.contains(id) => id,
                Ok(id) => {
                    warn!(%id, "Configured predictor is not registered, using null predictor");
                    fallback
                }
                Err(_) => {
                    warn!(
                        configured = %raw,
                        "Configured predictor id is malformed, using null predictor"
                    );
                    fallback
                }
            },
        };

        let active = registry
            .create(id)
            .ok_or(RuntimeError::PredictorNotFound(id))?;

        let host = Self {
            registry,
            settings_dir: config.predictor.settings_dir.clone(),
            word_count: config.predictor.prediction_word_count,
            active: RwLock::new(active),
        };
        host.configure_active();
        info!(predictor = %host.active.read().descriptor, "Prediction host ready");
        Ok(host)
    }

    /// The discovery registry.
    pub fn registry(&self) -> &PredictorRegistry {
        &self.registry
    }

    /// The currently active predictor.
    pub fn active(&self) -> ActivePredictor {
        self.active.read().clone()
    }

    /// Switches the active predictor to `id`.
    ///
    /// The outgoing instance's settings are saved first; the incoming
    /// instance gets the configured word count and its own saved settings.
    pub fn switch_to(&self, id: Uuid) -> RuntimeResult<()> {
        let incoming = self
            .registry
            .create(id)
            .ok_or(RuntimeError::PredictorNotFound(id))?;

        let outgoing = self.active.read().clone();
        if !outgoing.predictor.save_settings(&self.settings_dir) {
            warn!(predictor = %outgoing.descriptor, "Failed to save outgoing predictor settings");
        }

        *self.active.write() = incoming;
        self.configure_active();
        info!(
            from = %outgoing.descriptor,
            to = %self.active.read().descriptor,
            "Switched active predictor"
        );
        Ok(())
    }

    /// Saves the active predictor's settings into the settings directory.
    pub fn save(&self) -> bool {
        let active = self.active.read().clone();
        active.predictor.save_settings(&self.settings_dir)
    }

    /// Applies host configuration to the active instance and loads its
    /// settings.
    fn configure_active(&self) {
        let active = self.active.read().clone();

        if !active.predictor.load_settings(&self.settings_dir) {
            warn!(predictor = %active.descriptor, "Failed to load predictor settings");
        }

        // The word count is pushed through the bridge by name; a predictor
        // without that member is simply left alone.
        match active
            .invoker()
            .set_value("prediction_word_count", Value::from(self.word_count))
        {
            Ok(()) => {}
            Err(e) if e.is_not_supported() => {
                debug!(predictor = %active.descriptor, "Predictor has no word count option");
            }
            Err(e) => {
                warn!(predictor = %active.descriptor, error = %e, "Failed to set word count");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use quill_predict::FrequencyPredictor;

    use super::*;

    fn test_config(active: Option<&str>) -> QuillConfig {
        let mut config = QuillConfig::default();
        config.predictor.active = active.map(String::from);
        config.predictor.settings_dir =
            std::env::temp_dir().join(format!("quill-host-{}", std::process::id()));
        config.predictor.prediction_word_count = 7;
        config
    }

    fn frequency_id() -> Uuid {
        Uuid::try_parse(FrequencyPredictor::ID).unwrap()
    }

    #[test]
    fn test_defaults_to_null_predictor() {
        let host = PredictionHost::from_config(&test_config(None)).unwrap();
        assert_eq!(
            host.active().descriptor.id(),
            Uuid::try_parse(NullPredictor::ID).unwrap()
        );
    }

    #[test]
    fn test_malformed_or_unknown_id_falls_back() {
        let host = PredictionHost::from_config(&test_config(Some("not-a-uuid"))).unwrap();
        assert_eq!(host.active().descriptor.name(), "Null Word Predictor");

        let host = PredictionHost::from_config(&test_config(Some(
            "11111111-2222-3333-4444-555555555555",
        )))
        .unwrap();
        assert_eq!(host.active().descriptor.name(), "Null Word Predictor");
    }

    #[test]
    fn test_configured_predictor_gets_word_count() {
        let host =
            PredictionHost::from_config(&test_config(Some(FrequencyPredictor::ID))).unwrap();
        let active = host.active();
        assert_eq!(active.descriptor.id(), frequency_id());
        assert_eq!(
            active
                .invoker()
                .get_value("prediction_word_count")
                .unwrap(),
            Value::from(7)
        );
    }

    #[test]
    fn test_switch_to_unknown_id_keeps_active() {
        let host = PredictionHost::from_config(&test_config(None)).unwrap();
        let unknown = Uuid::try_parse("99999999-8888-7777-6666-555555555555").unwrap();

        assert!(matches!(
            host.switch_to(unknown),
            Err(RuntimeError::PredictorNotFound(_))
        ));
        assert_eq!(host.active().descriptor.name(), "Null Word Predictor");
    }

    #[test]
    fn test_switch_to_frequency_predictor() {
        let config = test_config(None);
        let host = PredictionHost::from_config(&config).unwrap();

        host.switch_to(frequency_id()).unwrap();
        assert_eq!(host.active().descriptor.id(), frequency_id());
        assert!(host.save());
        assert!(
            config
                .predictor
                .settings_dir
                .join("frequency_predictor.json")
                .exists()
        );

        let _ = std::fs::remove_dir_all(&config.predictor.settings_dir);
    }
}
