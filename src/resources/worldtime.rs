use bevy_ecs::prelude::Resource;

/// Scaled game time shared by every system.
#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldTime {
    /// Scaled duration of the current tick in seconds.
    pub delta: f32,
    /// Sum of every scaled delta so far.
    pub elapsed: f32,
    /// Multiplier applied to the raw frame delta. 1 is real time, 0 freezes
    /// the simulation without stopping the render loop.
    pub time_scale: f32,
    /// Ticks advanced since startup.
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        Self {
            delta: 0.0,
            elapsed: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    /// Apply one frame's raw delta, scaled by `time_scale`.
    pub fn advance(&mut self, dt: f32) {
        self.delta = dt * self.time_scale;
        self.elapsed += self.delta;
        self.frame_count += 1;
    }
}
