// StateBeacon — System Events & Data Types

// ---------------------------------------------------------------------------
// Magnetic-Field Sample
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm, used as the field deviation magnitude.
    pub fn norm(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl std::ops::Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

// ---------------------------------------------------------------------------
// Device Events — consumed one at a time by the dispatch loop
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Raw button edge with its delivery timestamp (debounce happens in
    /// ButtonInputManager, not at the source).
    ButtonEdge { pressed: bool, at_ms: u64 },
    /// One magnetic-field sample at the sensor's native rate.
    MagSample(Vector3),
    /// The press-hold timer expired before a release was seen.
    HoldTimerElapsed,
    /// Unconditional periodic beacon refresh.
    BroadcastTick,
    /// Calibration indicator square-wave edge.
    BlinkTick,
}

// ---------------------------------------------------------------------------
// Timer Commands — returned by the controller to the dispatch loop
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Start the one-shot press-hold timer.
    ArmHold,
    /// Drop the pending press-hold timer (release won the race).
    CancelHold,
}
