//! The simulated agent: true pose, sensor fan, active routine and the map and
//! planner it builds from its own odometry.

use slam_behavior::{
    Backtrack, BehaviorPolicy, Command, MotionRoutine, NavigateToNode, Proximity, Routine,
    RoutineKind, SenseContext, SpinScan, Transition,
};
use slam_core::{Point, Pose, RayId, SimConfig, SimRng, Tick, Vector};
use slam_map::{BuildStats, Map};
use slam_planner::Planner;
use slam_world::{ray_fan, Environment, Ray};
use tracing::{debug, trace, warn};

use crate::{AgentConfig, AgentPatch, SimResult};

// ── Per-tick report ───────────────────────────────────────────────────────────

/// Map and planner rebuild counters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RebuildStats {
    pub map:   BuildStats,
    /// Navigation graph node count after the rebuild.
    pub nodes: usize,
}

/// What happened during one [`Agent::tick`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TickReport {
    pub tick:    Tick,
    /// Motion actually executed, after any blocking.
    pub command: Command,
    /// `true` when an obstacle cut the routine's command short.
    pub blocked: bool,
    /// Routine that produced `command`.
    pub routine: RoutineKind,
    /// `(from, to)` when routine selection switched routines this tick.
    pub switched: Option<(RoutineKind, RoutineKind)>,
    /// Set on every tick that rebuilt the map and graph.
    pub rebuild:  Option<RebuildStats>,
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// Render-ready geometry of one ray.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RaySnapshot {
    pub id:      RayId,
    pub offset:  f64,
    pub start:   Point,
    pub end:     Point,
    pub contact: Option<Point>,
}

/// Render-ready view of the agent at the end of a tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSnapshot {
    pub tick:           Tick,
    pub pose:           Pose,
    pub estimated_pose: Pose,
    /// Body rectangle corners, counter-clockwise from rear right.
    pub body:           [Point; 4],
    pub sensor:         Point,
    pub rays:           Vec<RaySnapshot>,
    pub routine:        RoutineKind,
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// One simulated agent.
///
/// The agent is the sole timekeeper: [`tick`](Agent::tick) runs exactly one
/// cycle of routine selection, command, integration, scan and map recording.
/// Obstacles are solid: a step that would carry the body centre or the sensor
/// into one is reduced to its turn, or cancelled.  The map receives the
/// executed motion, never the true pose.
pub struct Agent {
    config:           AgentConfig,
    rebuild_interval: u64,
    tick:             Tick,
    pose:             Pose,
    trajectory:       Vec<Pose>,
    rays:             Vec<Ray>,
    proximity:        Proximity,
    routine:          Routine,
    policy:           BehaviorPolicy,
    map:              Map,
    planner:          Planner,
    rng:              SimRng,
}

impl Agent {
    /// Place an agent in `env` and take its first scan.
    ///
    /// A spawn point inside an obstacle is replaced by a random free point,
    /// keeping the requested heading.  The first scan is recorded as a
    /// zero-motion entry so the map starts with what the agent sees in place.
    pub fn new(env: &Environment, spawn: Pose, config: AgentConfig, sim: &SimConfig) -> SimResult<Self> {
        config.validate()?;
        sim.validate()?;

        let mut rng = SimRng::new(sim.seed);
        let pose = if env.is_point_in_obstacle(spawn.position()) {
            let p = env.random_point(&mut rng)?;
            warn!(requested = %spawn, x = p.x, y = p.y, "spawn point inside an obstacle, relocated");
            Pose::new(p.x, p.y, spawn.heading)
        } else {
            spawn
        };

        let rays = ray_fan(&config.ray_offsets, config.ray_length);
        let map = Map::new(pose, config.sensor_offset, config.map.clone());
        let planner = Planner::new(config.planner.clone());
        let policy = BehaviorPolicy::new(config.behavior.clone());

        let mut agent = Self {
            proximity: Proximity { touching: vec![false; rays.len()], distance: config.collision_distance * 2.0 },
            rebuild_interval: sim.rebuild_interval_ticks,
            tick: Tick::ZERO,
            pose,
            trajectory: vec![pose],
            rays,
            routine: Routine::default(),
            policy,
            map,
            planner,
            rng,
            config,
        };
        agent.scan(env);
        let sensor = agent.sensor_pose();
        agent.map.record(0.0, 0.0, &agent.rays, sensor);
        Ok(agent)
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Run one full cycle against `env`.
    pub fn tick(&mut self, env: &Environment) -> TickReport {
        let now = self.tick;
        let (switched, mut rebuild) = self.select_routine(now);

        let ctx = SenseContext {
            tick:               now,
            proximity:          &self.proximity,
            estimated_pose:     self.map.estimated_pose(),
            planner:            &self.planner,
            speed:              self.config.speed,
            collision_distance: self.config.collision_distance,
        };
        let requested = self.routine.get_commands(&ctx, &mut self.rng);
        let routine = self.routine.kind();
        let command = self.executable(requested, env);
        let blocked = command != requested;
        if blocked {
            debug!(tick = now.0, speed = requested.speed, omega = requested.omega, pose = %self.pose, "step blocked by an obstacle");
        }

        self.pose = self.pose.integrate(command.speed, command.omega);
        self.trajectory.push(self.pose);
        self.scan(env);
        let sensor = self.sensor_pose();
        self.map.record(command.speed, command.omega, &self.rays, sensor);

        self.tick = now + 1;
        if self.tick.is_multiple_of(self.rebuild_interval) {
            rebuild = Some(self.rebuild());
        }

        trace!(tick = now.0, routine = %routine, speed = command.speed, omega = command.omega, pose = %self.pose, "tick");
        TickReport { tick: now, command, blocked, routine, switched, rebuild }
    }

    /// The part of `command` the environment lets through: all of it, else
    /// the turn alone, else nothing.
    fn executable(&self, command: Command, env: &Environment) -> Command {
        if !self.step_blocked(command, env) {
            return command;
        }
        let turn = Command::turn(command.omega);
        if command.speed != 0.0 && !self.step_blocked(turn, env) {
            return turn;
        }
        Command::stop()
    }

    /// Would `command` move the body centre or the sensor into an obstacle?
    fn step_blocked(&self, command: Command, env: &Environment) -> bool {
        let next = self.pose.integrate(command.speed, command.omega);
        let offset = self.config.sensor_offset;
        env.blocks_motion(self.pose.position(), next.position())
            || env.blocks_motion(self.pose.forward(offset), next.forward(offset))
    }

    /// Return to `Explore` from a completed routine, or let the policy pick a
    /// new routine while exploring.  A routine that just completed hands back
    /// to `Explore` without a policy evaluation on the same tick.
    fn select_routine(&mut self, now: Tick) -> (Option<(RoutineKind, RoutineKind)>, Option<RebuildStats>) {
        let from = self.routine.kind();
        let mut rebuild = None;

        if !self.routine.is_explore() {
            if self.routine.completed() {
                self.routine = Routine::default();
            }
        } else {
            let behavior = self.policy.config();
            match self.policy.decide(now, &self.proximity, self.config.speed, &mut self.rng) {
                Transition::Stay => {}
                Transition::Backtrack => {
                    self.routine = Routine::Backtrack(Backtrack::new(behavior.backtrack_steps));
                }
                Transition::SpinScan => {
                    self.routine = Routine::SpinScan(SpinScan::new(behavior.spin_steps));
                }
                Transition::Navigate => {
                    let target_config = behavior.clone();
                    rebuild = Some(self.rebuild());
                    let target = self
                        .planner
                        .get_uncertain_node(&mut self.rng)
                        .and_then(|id| self.planner.node(id))
                        .map(|node| node.key);
                    if let Some(key) = target {
                        self.routine = Routine::NavigateToNode(NavigateToNode::new(key, &target_config));
                    }
                }
            }
        }

        let to = self.routine.kind();
        if from == to {
            return (None, rebuild);
        }
        debug!(tick = now.0, %from, %to, "routine switched");
        (Some((from, to)), rebuild)
    }

    /// Replay the map and rebuild the planner's graph from it.
    pub fn rebuild(&mut self) -> RebuildStats {
        let map = self.map.build();
        let nodes = self.planner.build(&self.map.grid_points());
        RebuildStats { map, nodes }
    }

    fn scan(&mut self, env: &Environment) {
        let sensor = self.sensor_pose();
        for ray in &mut self.rays {
            ray.scan(sensor, env.obstacles());
        }
        self.proximity = Proximity::from_rays(&self.rays, self.config.collision_distance);
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Apply an explicit field update.  A pose change rescans `env` so
    /// proximity reflects the new position before the next tick.
    pub fn apply_patch(&mut self, patch: AgentPatch, env: &Environment) {
        if let Some(x) = patch.x {
            self.pose.x = x;
        }
        if let Some(y) = patch.y {
            self.pose.y = y;
        }
        if let Some(heading) = patch.heading {
            self.pose.heading = heading;
        }
        if let Some(speed) = patch.speed {
            self.config.speed = speed;
        }
        if let Some(d) = patch.collision_distance {
            self.config.collision_distance = d;
        }
        if patch.touches_pose() {
            self.scan(env);
        } else if patch.collision_distance.is_some() {
            self.proximity = Proximity::from_rays(&self.rays, self.config.collision_distance);
        }
    }

    /// Replace the active routine.
    pub fn set_routine(&mut self, routine: Routine) {
        self.routine = routine;
    }

    // ── Views ─────────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> AgentSnapshot {
        let sensor = self.sensor_pose();
        let rays = self
            .rays
            .iter()
            .map(|ray| {
                let (start, end) = ray.endpoints(sensor);
                RaySnapshot {
                    id: ray.id(),
                    offset: ray.offset(),
                    start,
                    end,
                    contact: ray.contact().map(|c| c.point),
                }
            })
            .collect();

        AgentSnapshot {
            tick: self.tick,
            pose: self.pose,
            estimated_pose: self.map.estimated_pose(),
            body: self.body(),
            sensor: sensor.position(),
            rays,
            routine: self.routine.kind(),
        }
    }

    /// Body rectangle corners: rear right, front right, front left, rear left.
    pub fn body(&self) -> [Point; 4] {
        let half_l = self.config.body_length / 2.0;
        let half_w = self.config.body_width / 2.0;
        let centre = self.pose.position();
        [(-half_l, -half_w), (half_l, -half_w), (half_l, half_w), (-half_l, half_w)]
            .map(|(dx, dy)| centre + Vector::new(dx, dy).rotate(self.pose.heading))
    }

    /// Sensor origin and orientation.
    #[inline]
    pub fn sensor_pose(&self) -> Pose {
        let p = self.pose.forward(self.config.sensor_offset);
        Pose::new(p.x, p.y, self.pose.heading)
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Ticks completed so far.
    #[inline]
    pub fn tick_count(&self) -> Tick {
        self.tick
    }

    /// True poses, spawn first, one entry per completed tick after that.
    pub fn trajectory(&self) -> &[Pose] {
        &self.trajectory
    }

    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    pub fn proximity(&self) -> &Proximity {
        &self.proximity
    }

    pub fn routine(&self) -> &Routine {
        &self.routine
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }
}
