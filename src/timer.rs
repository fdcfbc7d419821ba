/// DELVE Project
/// `File` timer.rs
/// `Description` Frame timer implementation module
/// `Author` TioT2
/// `Last changed` 14.10.2026

/// Animation clock rate, in frames per second
pub const ANIMATION_RATE: f32 = 4.0;

/// Animation clock frame count
pub const ANIMATION_FRAMES: u32 = 8;

/// Animation frame getting function
/// * `time` - elapsed time, in seconds
/// * Returns frame index in [0, ANIMATION_FRAMES)
pub fn animation_frame(time: f32) -> u32 {
    ((time.max(0.0) * ANIMATION_RATE).floor() as u32) % ANIMATION_FRAMES
} // fn animation_frame

/// Timer representation structure
pub struct Timer {
    start_time_point: std::time::Instant,
    time_point: std::time::Instant,
    fps_time_point: std::time::Instant,
    time: f32,
    delta_time: f32,
    fps: f32,
    fps_counter: u32,
    fps_duration: f32,
} // struct Timer

impl Timer {
    /// Timer constructor.
    /// * Returns newly created timer with count, starting from creation moment
    pub fn new() -> Self {
        let now = std::time::Instant::now();
        Self {
            start_time_point: now,
            time_point: now,
            fps_time_point: now,
            time: 0.0,
            delta_time: 0.01,
            fps: 30.0,
            fps_counter: 0,
            fps_duration: 1.0,
        }
    } // fn new

    /// Timer duration update function.
    pub fn response(&mut self) {
        let now = std::time::Instant::now();

        self.time = (now - self.start_time_point).as_secs_f32();
        self.delta_time = (now - self.time_point).as_secs_f32();

        self.fps_counter += 1;

        let fps_duration = (now - self.fps_time_point).as_secs_f32();
        if fps_duration >= self.fps_duration {
            self.fps = self.fps_counter as f32 / fps_duration;
            self.fps_time_point = now;
            self.fps_counter = 0;
        }

        self.time_point = now;
    } // fn response

    /// Time getting function
    /// * Returns current time
    pub fn get_time(&self) -> f32 {
        self.time
    } // fn get_time

    /// Time between neighbour updates getting function
    /// * Returns delta time
    pub fn get_delta_time(&self) -> f32 {
        self.delta_time
    } // fn get_delta_time

    /// FPS getting function
    /// * Returns FPS
    pub fn get_fps(&self) -> f32 {
        self.fps
    } // fn get_fps

    /// Current animation frame getting function
    pub fn get_animation_frame(&self) -> u32 {
        animation_frame(self.time)
    } // fn get_animation_frame
} // impl Timer

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_clock_wraps() {
        let frames = [0.0, 0.24, 0.25, 1.0, 1.99, 2.0, 2.3].map(animation_frame);

        assert_eq!(frames, [0, 0, 1, 4, 7, 0, 1]);
    }
}

// file timer.rs