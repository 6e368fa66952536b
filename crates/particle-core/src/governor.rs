/// Frame admission governor.
///
/// The display refresh callback fires at whatever rate the browser chooses;
/// `admit` decides whether a given callback does work. A callback arriving
/// less than `interval_ms` after the last admitted one is skipped. The first
/// callback is always admitted.
#[derive(Clone, Debug)]
pub struct FrameGovernor {
    interval_ms: f64,
    last_frame_ms: Option<f64>,
    admitted: u64,
    skipped: u64,
}

impl FrameGovernor {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(0.0),
            last_frame_ms: None,
            admitted: 0,
            skipped: 0,
        }
    }

    pub fn admit(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_frame_ms {
            if now_ms - last < self.interval_ms {
                self.skipped += 1;
                return false;
            }
        }
        self.last_frame_ms = Some(now_ms);
        self.admitted += 1;
        true
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn admitted(&self) -> u64 {
        self.admitted
    }

    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}
