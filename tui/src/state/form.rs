use std::sync::Arc;

use log::{info, warn};
use model::ModelService;
use pricing::{Field, FieldSpec, FormConfig, Pipeline};

use super::model::Outcome;

/// The shared model handle, loaded once at startup.
pub type SharedModel = Arc<dyn ModelService>;

/// Drives the single form page: control values, the focused control and the last outcome.
pub struct FormState {
    pipeline: Pipeline<SharedModel>,
    form: FormConfig,
    values: [f64; 5],
    selected: usize,
    outcome: Outcome,
}

impl FormState {
    /// Creates a new `FormState` showing the form defaults.
    ///
    /// # Args
    /// * `pipeline` - The prediction pipeline wrapping the loaded model.
    /// * `form` - Bounds and defaults of the controls.
    pub fn new(pipeline: Pipeline<SharedModel>, form: FormConfig) -> Self {
        let values = form.default_values();
        Self {
            pipeline,
            form,
            values,
            selected: 0,
            outcome: Outcome::Idle,
        }
    }

    pub fn selected(&self) -> Field {
        Field::ALL[self.selected]
    }

    pub fn value(&self, field: Field) -> f64 {
        self.values[field.index()]
    }

    pub fn spec(&self, field: Field) -> &FieldSpec {
        self.form.spec(field)
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % Field::ALL.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + Field::ALL.len() - 1) % Field::ALL.len();
    }

    /// Moves the focused control by `steps` increments, staying within its bounds.
    pub fn nudge(&mut self, steps: i32) {
        let field = self.selected();
        let spec = self.form.spec(field);
        let next = self.value(field) + spec.step * steps as f64;
        // Snap to the step grid so repeated nudges don't accumulate float drift.
        let snapped = spec.min + ((next - spec.min) / spec.step).round() * spec.step;
        self.set(field, snapped);
    }

    pub fn to_min(&mut self) {
        let field = self.selected();
        self.set(field, self.form.spec(field).min);
    }

    pub fn to_max(&mut self) {
        let field = self.selected();
        self.set(field, self.form.spec(field).max);
    }

    /// Restores every control to its default.
    pub fn reset(&mut self) {
        for field in Field::ALL {
            self.set(field, self.form.spec(field).default);
        }
    }

    fn set(&mut self, field: Field, value: f64) {
        let clamped = self.form.clamp(field, value);
        let slot = &mut self.values[field.index()];

        if *slot != clamped {
            *slot = clamped;
            self.outcome.mark_stale();
        }
    }

    /// Runs the pipeline on the current values and records the outcome.
    pub fn predict(&mut self) {
        let inputs = self.form.inputs(self.values);

        self.outcome = match self.pipeline.estimate(&inputs) {
            Ok(estimate) => {
                info!("estimated {} for {inputs:?}", estimate.display());
                Outcome::Priced {
                    display: estimate.display(),
                    features: estimate.features,
                    stale: false,
                }
            }
            Err(e) => {
                warn!("prediction failed for {inputs:?}: {e}");
                Outcome::Failed {
                    message: e.to_string(),
                }
            }
        };
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use model::ModelErr;
    use ndarray::{Array1, ArrayView2};
    use pricing::OutputScale;

    use super::*;
    use crate::state::model::Outcome;

    pub(crate) struct FixedModel(pub f64);

    impl ModelService for FixedModel {
        fn num_features(&self) -> usize {
            5
        }

        fn predict(&self, rows: ArrayView2<'_, f64>) -> model::Result<Array1<f64>> {
            Ok(Array1::from_elem(rows.nrows(), self.0))
        }
    }

    struct BrokenModel;

    impl ModelService for BrokenModel {
        fn num_features(&self) -> usize {
            5
        }

        fn predict(&self, _rows: ArrayView2<'_, f64>) -> model::Result<Array1<f64>> {
            Err(ModelErr::InvalidModel("artifact corrupted".into()))
        }
    }

    /// Scores like [`FixedModel`] until `fail` is set.
    pub(crate) struct FlakyModel {
        pub score: f64,
        pub fail: AtomicBool,
    }

    impl FlakyModel {
        pub(crate) fn new(score: f64) -> Self {
            Self {
                score,
                fail: AtomicBool::new(false),
            }
        }

        pub(crate) fn break_down(&self) {
            self.fail.store(true, Ordering::SeqCst);
        }
    }

    impl ModelService for FlakyModel {
        fn num_features(&self) -> usize {
            5
        }

        fn predict(&self, rows: ArrayView2<'_, f64>) -> model::Result<Array1<f64>> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(ModelErr::InvalidModel("artifact corrupted".into()));
            }
            Ok(Array1::from_elem(rows.nrows(), self.score))
        }
    }

    pub(crate) fn state_with(model: SharedModel) -> FormState {
        let pipeline = Pipeline::new(model, OutputScale::Linear).unwrap();
        FormState::new(pipeline, FormConfig::default())
    }

    #[test]
    fn starts_on_defaults_without_a_price() {
        let state = state_with(Arc::new(FixedModel(1.0)));

        assert_eq!(state.selected(), Field::MedInc);
        assert_eq!(state.value(Field::MedInc), 50.);
        assert_eq!(state.value(Field::HouseAge), 20.);
        assert_eq!(state.value(Field::Longitude), -118.);
        assert_eq!(state.outcome(), &Outcome::Idle);
    }

    #[test]
    fn selection_wraps_around() {
        let mut state = state_with(Arc::new(FixedModel(1.0)));

        state.select_prev();
        assert_eq!(state.selected(), Field::Longitude);
        state.select_next();
        assert_eq!(state.selected(), Field::MedInc);
    }

    #[test]
    fn nudges_stay_within_bounds() {
        let mut state = state_with(Arc::new(FixedModel(1.0)));

        state.to_max();
        state.nudge(1);
        assert_eq!(state.value(Field::MedInc), 100.);

        state.select_next();
        state.nudge(-100);
        assert_eq!(state.value(Field::HouseAge), 1.);

        state.nudge(3);
        assert_eq!(state.value(Field::HouseAge), 4.);
    }

    #[test]
    fn fractional_steps_stay_on_grid() {
        let mut state = state_with(Arc::new(FixedModel(1.0)));
        state.select_prev();

        for _ in 0..10 {
            state.nudge(1);
        }
        assert!((state.value(Field::Longitude) - -117.).abs() < 1e-9);
    }

    #[test]
    fn predict_shows_formatted_price() {
        let mut state = state_with(Arc::new(FixedModel(1.2345)));

        state.predict();

        match state.outcome() {
            Outcome::Priced {
                display,
                features,
                stale,
            } => {
                assert_eq!(display, "$123,450.00");
                assert_eq!(features.to_row(), [5., 20., 5., 34., -118.]);
                assert!(!stale);
            }
            other => panic!("expected a price, got {other:?}"),
        }
    }

    #[test]
    fn editing_after_predict_marks_price_stale() {
        let mut state = state_with(Arc::new(FixedModel(1.0)));
        state.predict();

        state.nudge(1);
        assert!(matches!(state.outcome(), Outcome::Priced { stale: true, .. }));

        state.predict();
        assert!(matches!(state.outcome(), Outcome::Priced { stale: false, .. }));
    }

    #[test]
    fn clamped_no_op_keeps_price_fresh() {
        let mut state = state_with(Arc::new(FixedModel(1.0)));
        state.to_max();
        state.predict();

        state.nudge(1);
        assert!(matches!(state.outcome(), Outcome::Priced { stale: false, .. }));
    }

    #[test]
    fn failure_without_prior_price() {
        let mut state = state_with(Arc::new(BrokenModel));

        state.predict();

        match state.outcome() {
            Outcome::Failed { message } => assert!(message.contains("artifact corrupted")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn failure_replaces_previous_price() {
        let model = Arc::new(FlakyModel::new(1.2345));
        let mut state = state_with(model.clone());

        state.predict();
        assert!(matches!(
            state.outcome(),
            Outcome::Priced { display, stale: false, .. } if display == "$123,450.00"
        ));

        model.break_down();
        state.predict();

        match state.outcome() {
            Outcome::Failed { message } => assert!(message.contains("artifact corrupted")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = state_with(Arc::new(FixedModel(1.0)));
        state.to_min();
        state.select_next();
        state.to_max();

        state.reset();

        assert_eq!(state.value(Field::MedInc), 50.);
        assert_eq!(state.value(Field::HouseAge), 20.);
    }
}
