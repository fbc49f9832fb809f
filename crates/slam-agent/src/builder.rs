//! Fluent builder for constructing a [`Sim`].

use slam_core::{Pose, SimConfig};
use slam_world::Environment;

use crate::{Agent, AgentConfig, Sim, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, seed, rebuild and output intervals
/// - [`Environment`]: bounds, walls and obstacles
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                    |
/// |----------------------|--------------------------------------------|
/// | `.agent_config(c)`   | `AgentConfig::default()`                   |
/// | `.spawn(pose)`       | environment centre, heading 0              |
///
/// # Example
///
/// ```rust,ignore
/// let env = Environment::new(100.0, 100.0)?;
/// let mut sim = SimBuilder::new(config, env)
///     .spawn(Pose::new(50.0, 50.0, 90.0))
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder {
    config:       SimConfig,
    environment:  Environment,
    agent_config: Option<AgentConfig>,
    spawn:        Option<Pose>,
}

impl SimBuilder {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, environment: Environment) -> Self {
        Self {
            config,
            environment,
            agent_config: None,
            spawn:        None,
        }
    }

    pub fn agent_config(mut self, config: AgentConfig) -> Self {
        self.agent_config = Some(config);
        self
    }

    /// Requested spawn pose.  A position inside an obstacle is relocated to a
    /// random free point when the agent is built.
    pub fn spawn(mut self, pose: Pose) -> Self {
        self.spawn = Some(pose);
        self
    }

    /// Validate inputs, place the agent and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let agent_config = self.agent_config.unwrap_or_default();
        let spawn = self.spawn.unwrap_or_else(|| {
            Pose::new(self.environment.width() / 2.0, self.environment.height() / 2.0, 0.0)
        });

        let agent = Agent::new(&self.environment, spawn, agent_config, &self.config)?;

        Ok(Sim {
            config:      self.config,
            environment: self.environment,
            agent,
        })
    }
}
