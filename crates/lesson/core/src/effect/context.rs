use crate::config::LessonConfig;
use crate::env::{IdGenerator, LessonEnv, RngOracle};

/// Host-provided collaborators for one transition.
///
/// Static data is read through `env`. Randomness and id generation are called
/// in a fixed order, so replaying with the same sequences reproduces the same
/// update log.
pub struct EffectContext<'a> {
    pub env: LessonEnv<'a>,
    pub config: &'a LessonConfig,
    pub rng: &'a mut dyn RngOracle,
    pub ids: &'a mut dyn IdGenerator,
}

impl<'a> EffectContext<'a> {
    pub fn new(
        env: LessonEnv<'a>,
        config: &'a LessonConfig,
        rng: &'a mut dyn RngOracle,
        ids: &'a mut dyn IdGenerator,
    ) -> Self {
        Self {
            env,
            config,
            rng,
            ids,
        }
    }
}

impl std::fmt::Debug for EffectContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectContext")
            .field("env", &self.env)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
