/// Tick clock for the host loop
///
/// Implements a fixed timestep accumulator with a variable-rate frame tick.
/// Physics and the controller's fixed pass run at a consistent rate while the
/// frame pass runs once per host frame. Frame durations are passed in rather
/// than read from the system clock so a host (or a test) controls time.
use std::time::Duration;

/// Target physics/update rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of physics steps per frame to prevent spiral of death
const MAX_PHYSICS_STEPS: u32 = 5;

/// Result of feeding one host frame into the clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTicks {
    /// Number of fixed-rate passes to run this frame
    pub fixed_steps: u32,
    /// Delta time for the variable-rate pass (seconds)
    pub frame_dt: f32,
}

/// Tick timing state
#[derive(Debug)]
pub struct TickClock {
    /// Accumulated time for fixed timestep updates
    accumulator: Duration,

    /// Whether the simulation is paused
    paused: bool,

    /// Current frame number
    frame_count: u64,

    /// Total fixed updates executed
    update_count: u64,

    /// Total simulated time
    elapsed: Duration,
}

impl TickClock {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            paused: false,
            frame_count: 0,
            update_count: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Begin a new frame of the given length
    pub fn begin_frame(&mut self, frame_time: Duration) -> FrameTicks {
        self.frame_count += 1;

        // If paused, neither pass advances
        if self.paused {
            return FrameTicks {
                fixed_steps: 0,
                frame_dt: 0.0,
            };
        }

        self.elapsed += frame_time;
        self.accumulator += frame_time;

        let mut updates = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && updates < MAX_PHYSICS_STEPS {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            updates += 1;
        }

        // Drop the backlog once capped so a long hitch doesn't snowball
        if updates == MAX_PHYSICS_STEPS {
            self.accumulator = Duration::ZERO;
        }

        self.update_count += updates as u64;
        FrameTicks {
            fixed_steps: updates,
            frame_dt: frame_time.as_secs_f32(),
        }
    }

    /// Fixed timestep for physics updates (in seconds)
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Interpolation alpha between physics steps
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / FIXED_TIMESTEP
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Simulation resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_creation() {
        let clock = TickClock::new();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.update_count(), 0);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_fixed_timestep() {
        let clock = TickClock::new();
        assert!((clock.fixed_timestep() - 1.0 / 60.0).abs() < 0.0001);
    }

    #[test]
    fn test_one_step_per_fixed_duration() {
        let mut clock = TickClock::new();
        let ticks = clock.begin_frame(FIXED_TIMESTEP_DURATION);
        assert_eq!(ticks.fixed_steps, 1);
        assert!((ticks.frame_dt - FIXED_TIMESTEP).abs() < 0.0001);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut clock = TickClock::new();
        let half = FIXED_TIMESTEP_DURATION / 2;

        assert_eq!(clock.begin_frame(half).fixed_steps, 0);
        assert_eq!(clock.begin_frame(half).fixed_steps, 1);
        assert_eq!(clock.update_count(), 1);
    }

    #[test]
    fn test_max_physics_steps_limit() {
        let mut clock = TickClock::new();
        let ticks = clock.begin_frame(Duration::from_millis(300));
        assert_eq!(ticks.fixed_steps, MAX_PHYSICS_STEPS);
        assert!(clock.alpha() <= 1.0);
    }

    #[test]
    fn test_paused_no_updates() {
        let mut clock = TickClock::new();
        clock.pause();

        let ticks = clock.begin_frame(Duration::from_millis(50));
        assert_eq!(ticks.fixed_steps, 0);
        assert_eq!(ticks.frame_dt, 0.0);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn test_toggle_pause() {
        let mut clock = TickClock::new();
        clock.toggle_pause();
        assert!(clock.is_paused());
        clock.toggle_pause();
        assert!(!clock.is_paused());
    }
}
