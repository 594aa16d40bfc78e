/// Column names in the exact order the regressor was trained on.
pub const FEATURE_NAMES: [&str; 5] = ["MedInc", "HouseAge", "AveRooms", "Latitude", "Longitude"];

/// The values collected by the form, still on the user facing scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawInputs {
    /// Median income on the 0 to 100 display scale.
    pub medinc_display: f64,
    pub house_age: u32,
    pub avg_rooms: u32,
    pub latitude: f64,
    pub longitude: f64,
}

/// One row of model input. Field order matters: see [`FeatureVector::to_row`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    /// Median household income in units of $10,000.
    pub med_inc: f64,
    pub house_age: f64,
    pub ave_rooms: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl FeatureVector {
    /// The amount of model columns.
    pub const WIDTH: usize = FEATURE_NAMES.len();

    /// Returns the features laid out as [`FEATURE_NAMES`].
    pub fn to_row(&self) -> [f64; 5] {
        [
            self.med_inc,
            self.house_age,
            self.ave_rooms,
            self.latitude,
            self.longitude,
        ]
    }
}
