use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// A field that failed validation, with the violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {constraint}")]
pub struct ValidationError {
    pub field: &'static str,
    pub constraint: String,
}

impl ValidationError {
    pub fn new(field: &'static str, constraint: impl Into<String>) -> Self {
        Self {
            field,
            constraint: constraint.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Others,
}

/// Weight classification derived from the rounded BMI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Underweight,
    Normal,
    Overweight,
}

impl Verdict {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Verdict::Underweight
        } else if bmi < 30.0 {
            Verdict::Normal
        } else {
            Verdict::Overweight
        }
    }
}

/// `weight / height²` in kg/m², rounded to two decimals, ties to even.
pub fn bmi(height: f64, weight: f64) -> f64 {
    ((weight / (height * height)) * 100.0).round_ties_even() / 100.0
}

/// A stored patient record. The patient id is the store key, not part of
/// the value. `bmi` and `verdict` are derived from `height`/`weight` on
/// every write and are never accepted from input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    /// Height in meters.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
    pub bmi: f64,
    pub verdict: Verdict,
}

/// Request body for creating a patient. Carries the raw fields only;
/// the derived fields are computed server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPatient {
    pub id: String,
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
}

impl NewPatient {
    /// Checks the field constraints, failing on the first violation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::new("name", "must not be empty"));
        }
        if self.city.is_empty() {
            return Err(ValidationError::new("city", "must not be empty"));
        }
        if self.age == 0 || self.age >= 150 {
            return Err(ValidationError::new(
                "age",
                "must be greater than 0 and less than 150",
            ));
        }
        if self.height <= 0.0 {
            return Err(ValidationError::new("height", "must be greater than 0"));
        }
        if self.weight <= 0.0 {
            return Err(ValidationError::new("weight", "must be greater than 0"));
        }
        Ok(())
    }

    /// Validates the input and derives the computed fields, yielding the
    /// store key and the record to file under it.
    pub fn into_record(self) -> Result<(String, Patient), ValidationError> {
        self.validate()?;
        let bmi = bmi(self.height, self.weight);
        let record = Patient {
            name: self.name,
            city: self.city,
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
            bmi,
            verdict: Verdict::from_bmi(bmi),
        };
        Ok((self.id, record))
    }
}

/// Partial update body. Each field is a double `Option`: the outer layer
/// tells whether the field appeared in the request at all, the inner layer
/// holds the value (`Some(None)` is an explicit `null`, which no field
/// accepts). Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientUpdate {
    #[serde(default, deserialize_with = "supplied")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "supplied")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "supplied")]
    pub age: Option<Option<u32>>,
    #[serde(default, deserialize_with = "supplied")]
    pub gender: Option<Option<Gender>>,
    #[serde(default, deserialize_with = "supplied")]
    pub height: Option<Option<f64>>,
    #[serde(default, deserialize_with = "supplied")]
    pub weight: Option<Option<f64>>,
}

/// Marks a field as present in the body, whether its value was `null` or not.
fn supplied<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl PatientUpdate {
    /// Overwrites the supplied fields onto a copy of `current`'s raw fields,
    /// then re-validates and re-derives the whole record. The id is immutable
    /// and always taken from the caller, never from the body.
    pub fn apply(&self, id: &str, current: &Patient) -> Result<Patient, ValidationError> {
        let merged = NewPatient {
            id: id.to_owned(),
            name: merge(&self.name, &current.name, "name")?,
            city: merge(&self.city, &current.city, "city")?,
            age: merge(&self.age, &current.age, "age")?,
            gender: merge(&self.gender, &current.gender, "gender")?,
            height: merge(&self.height, &current.height, "height")?,
            weight: merge(&self.weight, &current.weight, "weight")?,
        };
        let (_, record) = merged.into_record()?;
        Ok(record)
    }
}

fn merge<T: Clone>(
    field: &Option<Option<T>>,
    current: &T,
    name: &'static str,
) -> Result<T, ValidationError> {
    match field {
        None => Ok(current.clone()),
        Some(None) => Err(ValidationError::new(name, "must not be null")),
        Some(Some(value)) => Ok(value.clone()),
    }
}
