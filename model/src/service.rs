use std::sync::Arc;

use ndarray::{Array1, ArrayView2};

use crate::Result;

/// A pretrained regressor that can score batches of feature rows.
///
/// Inference only borrows the model, so a single loaded instance can be shared across any
/// number of callers.
pub trait ModelService: Send + Sync {
    /// Returns the amount of columns every input row must have.
    fn num_features(&self) -> usize;

    /// Returns the column names recorded at training time, empty if the model has none.
    fn feature_names(&self) -> &[String] {
        &[]
    }

    /// Scores every row of the batch.
    ///
    /// # Arguments
    /// * `rows` - The input batch, one sample per row.
    ///
    /// # Returns
    /// One raw score per row or an error if the model could not produce them.
    fn predict(&self, rows: ArrayView2<'_, f64>) -> Result<Array1<f64>>;
}

impl<M: ModelService + ?Sized> ModelService for Arc<M> {
    fn num_features(&self) -> usize {
        (**self).num_features()
    }

    fn feature_names(&self) -> &[String] {
        (**self).feature_names()
    }

    fn predict(&self, rows: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        (**self).predict(rows)
    }
}

impl<M: ModelService + ?Sized> ModelService for &M {
    fn num_features(&self) -> usize {
        (**self).num_features()
    }

    fn feature_names(&self) -> &[String] {
        (**self).feature_names()
    }

    fn predict(&self, rows: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        (**self).predict(rows)
    }
}
