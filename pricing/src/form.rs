//! Bounds and defaults of the five form controls.
//!
//! The form host draws its widgets from a [`FormConfig`] and clamps every value through it, so
//! the pipeline only ever sees in-range inputs.

use serde::{Deserialize, Serialize};

use crate::{PricingErr, RawInputs};

/// The five inputs, in model column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    MedInc,
    HouseAge,
    AveRooms,
    Latitude,
    Longitude,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::MedInc,
        Field::HouseAge,
        Field::AveRooms,
        Field::Latitude,
        Field::Longitude,
    ];

    /// The position of the field in the form and in the feature row.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The key identifying the field in a configuration file.
    pub fn key(self) -> &'static str {
        match self {
            Field::MedInc => "medinc",
            Field::HouseAge => "house_age",
            Field::AveRooms => "avg_rooms",
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
        }
    }
}

/// A single bounded control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub key: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
    #[serde(default)]
    pub integer: bool,
}

impl FieldSpec {
    fn new(field: Field, label: &str, (min, max, default): (f64, f64, f64), step: f64) -> Self {
        Self {
            key: field.key().into(),
            label: label.into(),
            min,
            max,
            default,
            step,
            integer: matches!(field, Field::HouseAge | Field::AveRooms),
        }
    }

    /// Brings `value` into `[min, max]`, rounding integer controls to whole numbers.
    pub fn clamp(&self, value: f64) -> f64 {
        let v = if self.integer { value.round() } else { value };
        v.clamp(self.min, self.max)
    }

    /// Where `value` sits between the bounds, from 0 to 1.
    pub fn ratio(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0. {
            return 1.;
        }
        ((value - self.min) / span).clamp(0., 1.)
    }

    /// Renders `value` the way the control displays it.
    pub fn display(&self, value: f64) -> String {
        if self.integer {
            format!("{value:.0}")
        } else {
            format!("{value:.2}")
        }
    }
}

/// `{field: (min, max, default)}` for the whole form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormConfig {
    pub fields: [FieldSpec; 5],
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            fields: [
                FieldSpec::new(Field::MedInc, "Median Income (in $1000s)", (0., 100., 50.), 0.5),
                FieldSpec::new(Field::HouseAge, "House Age (in years)", (1., 60., 20.), 1.),
                FieldSpec::new(Field::AveRooms, "Average Rooms", (1., 10., 5.), 1.),
                FieldSpec::new(Field::Latitude, "Latitude", (32., 42., 34.), 0.1),
                FieldSpec::new(Field::Longitude, "Longitude", (-124., -114., -118.), 0.1),
            ],
        }
    }
}

impl FormConfig {
    pub fn spec(&self, field: Field) -> &FieldSpec {
        &self.fields[field.index()]
    }

    /// The default value of every control.
    pub fn default_values(&self) -> [f64; 5] {
        Field::ALL.map(|f| self.spec(f).default)
    }

    /// The inputs the form shows before the user touches anything.
    pub fn defaults(&self) -> RawInputs {
        self.inputs(self.default_values())
    }

    /// Clamps `value` to the bounds of `field`.
    pub fn clamp(&self, field: Field, value: f64) -> f64 {
        self.spec(field).clamp(value)
    }

    /// Builds pipeline inputs from control values, clamping each one first.
    pub fn inputs(&self, values: [f64; 5]) -> RawInputs {
        let [medinc, age, rooms, lat, lon] = Field::ALL.map(|f| self.clamp(f, values[f.index()]));

        RawInputs {
            medinc_display: medinc,
            house_age: age as u32,
            avg_rooms: rooms as u32,
            latitude: lat,
            longitude: lon,
        }
    }

    /// Checks the configuration is usable by both the form host and the pipeline.
    ///
    /// # Errors
    /// Returns `PricingErr::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<(), PricingErr> {
        for field in Field::ALL {
            let spec = self.spec(field);
            let err = |msg: String| PricingErr::InvalidConfig(format!("field {}: {msg}", field.key()));

            if spec.key != field.key() {
                return Err(err(format!("found key '{}' in its position", spec.key)));
            }

            let bounds = [spec.min, spec.max, spec.default, spec.step];
            if bounds.iter().any(|v| !v.is_finite()) {
                return Err(err("bounds must be finite".into()));
            }
            if spec.min > spec.max {
                return Err(err(format!("min ({}) exceeds max ({})", spec.min, spec.max)));
            }
            if spec.default < spec.min || spec.default > spec.max {
                return Err(err(format!(
                    "default ({}) is outside [{}, {}]",
                    spec.default, spec.min, spec.max
                )));
            }
            if spec.step <= 0. {
                return Err(err("step must be greater than 0".into()));
            }

            let integer_field = matches!(field, Field::HouseAge | Field::AveRooms);
            if integer_field != spec.integer {
                return Err(err(format!("integer must be {integer_field}")));
            }
            if spec.integer && (spec.min < 0. || spec.min.fract() != 0. || spec.max.fract() != 0.) {
                return Err(err("integer bounds must be whole, non-negative numbers".into()));
            }
        }

        Ok(())
    }
}
