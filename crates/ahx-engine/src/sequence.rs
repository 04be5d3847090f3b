//! Frame-driven step sequencer.
//!
//! The sequence only tracks timing. Entries live with their owner (an
//! instrument's performance list) and `update` hands back the index of
//! the entry to run.

/// Step cursor over an externally owned list of entries.
#[derive(Clone, Debug, Default)]
pub struct TrackerSequence {
    /// Frames per step
    speed: i32,
    length: i32,
    current: i32,
    /// Frames until the next step
    wait: i32,
    active: bool,
}

impl TrackerSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a list of `length` entries. Leaves the sequence stopped.
    pub fn set_data(&mut self, length: usize, speed: i32) {
        self.length = length.min(i32::MAX as usize) as i32;
        self.speed = speed;
        self.current = 0;
        self.wait = speed;
        self.active = false;
    }

    /// Detach the entries.
    pub fn clear(&mut self) {
        self.length = 0;
        self.current = 0;
    }

    pub fn start(&mut self) {
        self.active = true;
        self.current = 0;
        self.wait = self.speed;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Move to `step`. Out-of-range steps are ignored.
    pub fn jump(&mut self, step: i32) {
        if step >= 0 && step < self.length {
            self.current = step;
            self.wait = self.speed;
        }
    }

    pub fn set_speed(&mut self, speed: i32) {
        self.speed = speed;
        self.wait = speed;
    }

    /// Advance one frame. Returns the index of the entry due this frame.
    ///
    /// A wait of 128 fires immediately, as the Amiga replayer's
    /// signed 8-bit counter wraps.
    pub fn update(&mut self) -> Option<usize> {
        if !self.active || self.length == 0 {
            return None;
        }

        if self.current >= self.length {
            if self.wait > 0 {
                self.wait -= 1;
            }
            return None;
        }

        let signed_overflow = self.wait == 128;
        self.wait -= 1;
        if signed_overflow || self.wait <= 0 {
            let index = self.current as usize;
            self.current += 1;
            self.wait = self.speed;
            return Some(index);
        }
        None
    }

    /// Index of the entry the cursor points at, if any.
    pub fn current(&self) -> Option<usize> {
        if self.active && self.current >= 0 && self.current < self.length {
            Some(self.current as usize)
        } else {
            None
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True once an active sequence has run past its last entry.
    pub fn is_finished(&self) -> bool {
        self.active && self.current >= self.length
    }

    /// True once the cursor has run past the last entry, active or not.
    pub fn is_exhausted(&self) -> bool {
        self.current >= self.length
    }

    pub fn len(&self) -> usize {
        self.length as usize
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn wait(&self) -> i32 {
        self.wait
    }
}
