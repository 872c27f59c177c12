pub type StepCallback = Box<dyn FnMut()>;

/// One step of the wizard sequence. The renderable content for a step lives
/// in the render layer, keyed by the step index; here a step only carries
/// its optional lifecycle callbacks.
pub struct WizardStep {
    pub on_enter: Option<StepCallback>,
    pub on_exit: Option<StepCallback>,
}

impl WizardStep {
    pub fn new() -> Self {
        Self { on_enter: None, on_exit: None }
    }

    pub fn with_on_enter(mut self, callback: StepCallback) -> Self {
        self.on_enter = Some(callback);
        self
    }

    pub fn with_on_exit(mut self, callback: StepCallback) -> Self {
        self.on_exit = Some(callback);
        self
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::new()
    }
}

pub struct WizardConfig {
    pub initial_step: usize,
    pub include_wrapping_steps: bool,
    pub start_label: String,
    pub finish_label: String,
    pub on_start: Option<StepCallback>,
    pub on_finish: Option<StepCallback>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            initial_step: 0,
            include_wrapping_steps: false,
            start_label: "Start".to_string(),
            finish_label: "Finish".to_string(),
            on_start: None,
            on_finish: None,
        }
    }
}

/// Controls the flow of a wizard: holds the authoritative step index,
/// moves it through advance/retreat/jump, and resolves the label shown
/// on the advance control.
///
/// Index policy is clamp: every mutation keeps the index in
/// `[0, step_count - 1]`, so the render layer never sees an
/// out-of-range lookup from internally driven changes.
pub struct Wizard {
    steps: Vec<WizardStep>,
    current_step: usize,

    // Last index value adopted from outside, kept separate from the
    // internal index so an externally echoed-back value does not loop.
    last_external: usize,

    include_wrapping_steps: bool,
    start_label: String,
    finish_label: String,

    on_start: Option<StepCallback>,
    on_finish: Option<StepCallback>,
}

impl Wizard {
    pub fn new(steps: Vec<WizardStep>, config: WizardConfig) -> Self {
        let mut wizard = Self {
            steps,
            current_step: 0,
            last_external: config.initial_step,
            include_wrapping_steps: config.include_wrapping_steps,
            start_label: config.start_label,
            finish_label: config.finish_label,
            on_start: config.on_start,
            on_finish: config.on_finish,
        };
        wizard.current_step = wizard.clamp_index(config.initial_step);
        wizard
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn include_wrapping_steps(&self) -> bool {
        self.include_wrapping_steps
    }

    /// Is the current step the first one
    pub fn is_first_step(&self) -> bool {
        self.current_step == 0
    }

    /// Is the current step the last one
    pub fn is_last_step(&self) -> bool {
        self.current_step >= self.steps.len().saturating_sub(1)
    }

    /// The text of the advance control for the given boundary flags:
    /// the start label on the first step (unless wrapping steps count as
    /// progress), the finish label on the last step, "Next" in between.
    pub fn next_label(&self, is_first_step: bool, is_last_step: bool) -> &str {
        if is_first_step && !self.include_wrapping_steps {
            &self.start_label
        } else if is_last_step {
            &self.finish_label
        } else {
            "Next"
        }
    }

    /// The advance control renders as a prominent button on the wrapping
    /// steps and as a plain inline link in between. Presentational only.
    pub fn next_is_button(&self) -> bool {
        self.is_first_step() || self.is_last_step()
    }

    /// Handles the advance control. On the last step the index stays put
    /// and only the finish callback fires.
    pub fn advance(&mut self) {
        if self.is_last_step() {
            if let Some(on_finish) = self.on_finish.as_mut() {
                on_finish();
            }
            return;
        }

        // Leaving the introduction step counts as starting the wizard when
        // the wrapping steps are excluded from progress.
        if self.is_first_step() && !self.include_wrapping_steps {
            if let Some(on_start) = self.on_start.as_mut() {
                on_start();
            }
        }

        self.set_current_step(self.current_step + 1);
    }

    pub fn retreat(&mut self) {
        self.set_current_step(self.current_step.saturating_sub(1));
    }

    pub fn jump_to(&mut self, step_index: usize) {
        self.set_current_step(step_index);
    }

    /// Adopts an externally supplied index. It is taken only when it
    /// differs from both the internal index and the previous external
    /// value, so internally driven changes echoed back in do not loop.
    pub fn sync_external(&mut self, step_index: usize) {
        if step_index != self.current_step && step_index != self.last_external {
            self.set_current_step(step_index);
        }
        self.last_external = step_index;
    }

    fn clamp_index(&self, step_index: usize) -> usize {
        step_index.min(self.steps.len().saturating_sub(1))
    }

    /// Sets the new current step, firing the outgoing step's on_exit and
    /// the incoming step's on_enter when the index actually moves.
    fn set_current_step(&mut self, step_index: usize) {
        let next = self.clamp_index(step_index);
        if next == self.current_step {
            return;
        }

        if let Some(step) = self.steps.get_mut(self.current_step) {
            if let Some(on_exit) = step.on_exit.as_mut() {
                on_exit();
            }
        }
        self.current_step = next;
        if let Some(step) = self.steps.get_mut(self.current_step) {
            if let Some(on_enter) = step.on_enter.as_mut() {
                on_enter();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<u32>>, StepCallback) {
        let count = Rc::new(Cell::new(0));
        let hook = Rc::clone(&count);
        let callback: StepCallback = Box::new(move || hook.set(hook.get() + 1));
        (count, callback)
    }

    fn plain_steps(n: usize) -> Vec<WizardStep> {
        (0..n).map(|_| WizardStep::new()).collect()
    }

    fn wizard(n: usize) -> Wizard {
        Wizard::new(plain_steps(n), WizardConfig::default())
    }

    #[test]
    fn boundary_flags_match_index() {
        for n in 1..=5 {
            for initial in 0..n {
                let w = Wizard::new(
                    plain_steps(n),
                    WizardConfig { initial_step: initial, ..Default::default() },
                );
                assert_eq!(w.is_first_step(), initial == 0, "n={n} initial={initial}");
                assert_eq!(w.is_last_step(), initial == n - 1, "n={n} initial={initial}");
            }
        }
    }

    #[test]
    fn advance_below_last_increments_without_finish() {
        let (finishes, on_finish) = counter();
        let mut w = Wizard::new(
            plain_steps(4),
            WizardConfig { initial_step: 1, on_finish: Some(on_finish), ..Default::default() },
        );
        w.advance();
        assert_eq!(w.current_step(), 2);
        assert_eq!(finishes.get(), 0);
    }

    #[test]
    fn advance_at_last_fires_finish_and_stays() {
        let (finishes, on_finish) = counter();
        let mut w = Wizard::new(
            plain_steps(3),
            WizardConfig { initial_step: 2, on_finish: Some(on_finish), ..Default::default() },
        );
        w.advance();
        assert_eq!(w.current_step(), 2);
        assert_eq!(finishes.get(), 1);
    }

    #[test]
    fn advance_at_first_fires_start_then_moves() {
        let (starts, on_start) = counter();
        let mut w = Wizard::new(
            plain_steps(3),
            WizardConfig { on_start: Some(on_start), ..Default::default() },
        );
        w.advance();
        assert_eq!(starts.get(), 1);
        assert_eq!(w.current_step(), 1);

        // Not the first step anymore, so no second start.
        w.advance();
        assert_eq!(starts.get(), 1);
    }

    #[test]
    fn advance_skips_start_when_wrapping_steps_included() {
        let (starts, on_start) = counter();
        let mut w = Wizard::new(
            plain_steps(3),
            WizardConfig {
                include_wrapping_steps: true,
                on_start: Some(on_start),
                ..Default::default()
            },
        );
        w.advance();
        assert_eq!(starts.get(), 0);
        assert_eq!(w.current_step(), 1);
    }

    #[test]
    fn single_step_wizard_only_finishes() {
        let (starts, on_start) = counter();
        let (finishes, on_finish) = counter();
        let mut w = Wizard::new(
            plain_steps(1),
            WizardConfig {
                on_start: Some(on_start),
                on_finish: Some(on_finish),
                ..Default::default()
            },
        );
        w.advance();
        assert_eq!(w.current_step(), 0);
        assert_eq!(starts.get(), 0);
        assert_eq!(finishes.get(), 1);
    }

    #[test]
    fn next_label_sequence_over_six_steps() {
        let mut w = wizard(6);
        let mut labels = Vec::new();
        for _ in 0..6 {
            labels.push(w.next_label(w.is_first_step(), w.is_last_step()).to_string());
            w.jump_to(w.current_step() + 1);
        }
        assert_eq!(labels, ["Start", "Next", "Next", "Next", "Next", "Finish"]);
    }

    #[test]
    fn next_label_with_wrapping_steps_included() {
        let w = Wizard::new(
            plain_steps(3),
            WizardConfig { include_wrapping_steps: true, ..Default::default() },
        );
        assert_eq!(w.next_label(true, false), "Next");
        assert_eq!(w.next_label(false, false), "Next");
        assert_eq!(w.next_label(false, true), "Finish");
        // The last step wins over the first only when wrapping is included.
        assert_eq!(w.next_label(true, true), "Finish");
    }

    #[test]
    fn advance_control_is_button_only_on_wrapping_steps() {
        let mut w = wizard(3);
        assert!(w.next_is_button());
        w.advance();
        assert!(!w.next_is_button());
        w.advance();
        assert!(w.next_is_button());
    }

    #[test]
    fn retreat_clamps_at_zero() {
        let mut w = wizard(3);
        w.retreat();
        assert_eq!(w.current_step(), 0);
    }

    #[test]
    fn jump_and_construction_clamp_to_bounds() {
        let w = Wizard::new(
            plain_steps(3),
            WizardConfig { initial_step: 17, ..Default::default() },
        );
        assert_eq!(w.current_step(), 2);

        let mut w = wizard(3);
        w.jump_to(99);
        assert_eq!(w.current_step(), 2);
    }

    #[test]
    fn round_trip_returns_to_first_step() {
        let n = 5;
        let mut w = wizard(n);
        for _ in 0..n - 1 {
            w.advance();
        }
        assert_eq!(w.current_step(), n - 1);
        for _ in 0..n - 1 {
            w.retreat();
        }
        assert_eq!(w.current_step(), 0);
    }

    #[test]
    fn sync_external_adopts_only_fresh_values() {
        let mut w = wizard(5);
        w.sync_external(3);
        assert_eq!(w.current_step(), 3);

        // Internal move, then the same external value echoed back:
        // it matches last_external, so it must not undo the move.
        w.retreat();
        assert_eq!(w.current_step(), 2);
        w.sync_external(3);
        assert_eq!(w.current_step(), 2);

        // A genuinely new external value is adopted again.
        w.sync_external(4);
        assert_eq!(w.current_step(), 4);
    }

    #[test]
    fn step_callbacks_fire_in_exit_then_enter_order() {
        let order = Rc::new(std::cell::RefCell::new(Vec::new()));
        let log = |tag: &'static str| {
            let order = Rc::clone(&order);
            Box::new(move || order.borrow_mut().push(tag)) as StepCallback
        };
        let steps = vec![
            WizardStep::new().with_on_exit(log("exit 0")),
            WizardStep::new().with_on_enter(log("enter 1")).with_on_exit(log("exit 1")),
            WizardStep::new().with_on_enter(log("enter 2")),
        ];
        let mut w = Wizard::new(steps, WizardConfig::default());
        w.advance();
        w.advance();
        w.retreat(); // step 2 has no on_exit, so only the re-entry logs
        assert_eq!(
            *order.borrow(),
            ["exit 0", "enter 1", "exit 1", "enter 2", "enter 1"]
        );
    }
}
