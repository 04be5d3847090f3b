//! Bouncing ramp used for filter and pulse-width sweeps.

/// Frame-rate ramp that walks between two limits and reverses at each one.
///
/// After activation the first limit reached is passed through once without
/// reversing if the ramp started outside the range ("slide-in").
#[derive(Clone, Debug)]
pub struct TrackerModulator {
    position: i32,
    /// +1 or -1
    sign: i32,
    speed: i32,
    lower_limit: i32,
    upper_limit: i32,
    active: bool,
    init_pending: bool,
    sliding_in: bool,
}

impl Default for TrackerModulator {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerModulator {
    pub fn new() -> Self {
        Self {
            position: 0,
            sign: 1,
            speed: 0,
            lower_limit: 0,
            upper_limit: 0,
            active: false,
            init_pending: false,
            sliding_in: false,
        }
    }

    /// Set the limits, swapping them if given in the wrong order.
    pub fn set_limits(&mut self, lower: i32, upper: i32) {
        if lower > upper {
            self.lower_limit = upper;
            self.upper_limit = lower;
        } else {
            self.lower_limit = lower;
            self.upper_limit = upper;
        }
    }

    pub fn limits(&self) -> (i32, i32) {
        (self.lower_limit, self.upper_limit)
    }

    pub fn set_speed(&mut self, speed: i32) {
        self.speed = speed;
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn set_position(&mut self, position: i32) {
        self.position = position;
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    /// Arm or disarm the ramp. Arming defers the slide-in decision to the next update.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if active {
            self.init_pending = true;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_direction(&mut self, sign: i32) {
        self.sign = if sign >= 0 { 1 } else { -1 };
    }

    pub fn direction(&self) -> i32 {
        self.sign
    }

    pub fn is_sliding_in(&self) -> bool {
        self.sliding_in
    }

    /// Advance one step. Returns true if the position moved.
    pub fn update(&mut self) -> bool {
        if !self.active {
            return false;
        }

        if self.init_pending {
            self.init_pending = false;
            if self.position <= self.lower_limit {
                self.sliding_in = true;
                self.sign = 1;
            } else if self.position >= self.upper_limit {
                self.sliding_in = true;
                self.sign = -1;
            }
        }

        if self.position == self.lower_limit || self.position == self.upper_limit {
            if self.sliding_in {
                self.sliding_in = false;
            } else {
                self.sign = -self.sign;
            }
        }

        let old = self.position;
        self.position += self.sign;
        self.position != old
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed(lower: i32, upper: i32, start: i32) -> TrackerModulator {
        let mut m = TrackerModulator::new();
        m.set_limits(lower, upper);
        m.set_position(start);
        m.set_active(true);
        m
    }

    #[test]
    fn inactive_does_nothing() {
        let mut m = TrackerModulator::new();
        m.set_position(5);
        assert!(!m.update());
        assert_eq!(m.position(), 5);
    }

    #[test]
    fn limits_are_swapped() {
        let mut m = TrackerModulator::new();
        m.set_limits(40, 10);
        assert_eq!(m.limits(), (10, 40));
    }

    #[test]
    fn slide_in_passes_first_limit() {
        let mut m = armed(10, 20, 10);
        assert!(m.update());
        assert_eq!(m.position(), 11);
        assert_eq!(m.direction(), 1);
        assert!(!m.is_sliding_in());
    }

    #[test]
    fn stays_within_limits_and_bounces_regularly() {
        let (lower, upper) = (10, 17);
        let mut m = armed(lower, upper, lower);
        let mut last_sign = m.direction();
        let mut bounces = Vec::new();
        for call in 0..200 {
            m.update();
            assert!(m.position() >= lower && m.position() <= upper);
            if m.direction() != last_sign {
                bounces.push(call);
                last_sign = m.direction();
            }
        }
        assert!(bounces.len() > 3);
        for pair in bounces.windows(2) {
            assert_eq!(pair[1] - pair[0], upper - lower);
        }
    }

    #[test]
    fn starting_above_range_slides_down() {
        let mut m = armed(0, 8, 30);
        m.update();
        assert_eq!(m.direction(), -1);
        assert_eq!(m.position(), 29);
    }

    #[test]
    fn interior_start_keeps_direction() {
        let mut m = armed(0, 8, 4);
        m.set_direction(-1);
        m.update();
        assert_eq!(m.position(), 3);
        assert!(!m.is_sliding_in());
    }
}
