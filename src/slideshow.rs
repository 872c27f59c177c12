use crate::constants::SLIDE_DURATION;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Direction {
    Forward,  // new slide enters from the right, old one exits left
    Backward, // mirrored
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum PanelPhase {
    Entering, // sliding into view
    Active,   // fully in view
    Exiting,  // sliding out of view
    Removed,  // out of the visible set
}

/// Transition bookkeeping for one panel. The timer runs while the panel
/// is entering or exiting and flips the phase once SLIDE_DURATION passes.
pub struct Panel {
    phase: PanelPhase,
    transition_timer: f32,
}

impl Panel {
    fn new(phase: PanelPhase) -> Self {
        Self { phase, transition_timer: 0.0 }
    }

    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        self.phase != PanelPhase::Removed
    }

    /// Transition progress in [0, 1]. Settled panels report 1.
    pub fn progress(&self) -> f32 {
        match self.phase {
            PanelPhase::Entering | PanelPhase::Exiting => {
                (self.transition_timer / SLIDE_DURATION).min(1.0)
            }
            PanelPhase::Active | PanelPhase::Removed => 1.0,
        }
    }

    fn begin(&mut self, phase: PanelPhase) {
        self.phase = phase;
        self.transition_timer = 0.0;
    }

    fn update(&mut self, dt: f32) {
        match self.phase {
            PanelPhase::Entering | PanelPhase::Exiting => {
                self.transition_timer += dt;
                if self.transition_timer >= SLIDE_DURATION {
                    self.phase = match self.phase {
                        PanelPhase::Entering => PanelPhase::Active,
                        _ => PanelPhase::Removed,
                    };
                }
            }
            PanelPhase::Active | PanelPhase::Removed => {}
        }
    }
}

/// Shows one panel at a time, animating between them when the current
/// index changes. The index is supplied from outside; the direction of
/// each transition is derived by comparing it against the index that was
/// active just before the change.
pub struct Slideshow {
    current: usize,
    last_slide: usize,
    panels: Vec<Panel>,
}

impl Slideshow {
    pub fn new(panel_count: usize, current: usize) -> Self {
        let panels = (0..panel_count)
            .map(|i| Panel::new(if i == current { PanelPhase::Active } else { PanelPhase::Removed }))
            .collect();
        Self { current, last_slide: current, panels }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Get the direction to animate the transition along
    pub fn direction(&self) -> Direction {
        if self.current >= self.last_slide {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// The panel the show considers active, or None while the external
    /// index points outside the panel list.
    pub fn active_slide(&self) -> Option<usize> {
        if self.current < self.panels.len() {
            Some(self.current)
        } else {
            None
        }
    }

    pub fn panels(&self) -> impl Iterator<Item = (usize, &Panel)> {
        self.panels.iter().enumerate()
    }

    /// Adopts a new external index. An unchanged value is a no-op; a
    /// changed one records the pre-change index for direction resolution
    /// and starts the exit/enter transitions. A panel caught mid-exit by
    /// a change back to it simply restarts as entering, so the stale
    /// removal moment of the superseded transition never fires.
    pub fn set_current(&mut self, new_current: usize) {
        if new_current == self.current {
            return;
        }

        // Direction is resolved against the index that was active just
        // before this change, so record it before adopting the new one.
        self.last_slide = self.current;
        let outgoing = self.current;
        self.current = new_current;

        if let Some(panel) = self.panels.get_mut(outgoing) {
            panel.begin(PanelPhase::Exiting);
        }
        if let Some(panel) = self.panels.get_mut(new_current) {
            panel.begin(PanelPhase::Entering);
        }
    }

    /// Drives all in-flight transitions forward by one frame.
    pub fn update(&mut self, dt: f32) {
        for panel in self.panels.iter_mut() {
            panel.update(dt);
        }
    }
}
