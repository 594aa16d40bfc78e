use pricing::FeatureVector;

/// Shown under every successful estimate.
pub const CAPTION: &str = "(Prices are estimated based on median income and housing features.)";

/// What the result panel currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing predicted yet.
    Idle,
    /// A price for the inputs in `features`.
    Priced {
        display: String,
        features: FeatureVector,
        /// The inputs changed after this price was computed.
        stale: bool,
    },
    /// The last prediction failed, no price is shown.
    Failed { message: String },
}

impl Outcome {
    /// Flags a shown price as no longer matching the inputs.
    pub fn mark_stale(&mut self) {
        if let Outcome::Priced { stale, .. } = self {
            *stale = true;
        }
    }
}
