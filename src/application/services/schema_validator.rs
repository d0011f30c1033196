use serde_json::{Map, Value};

use crate::domain::{MEDICATION_DETAIL_FIELDS, PrescriptionBatch};

const PRESCRIPTIONS_KEY: &str = "Prescriptions";
const DIAGNOSIS_KEY: &str = "DiagnosisInformation";
const MEDICATION_KEY: &str = "MedicationDetails";
const DESCRIPTION_KEY: &str = "Description";
const DIAGNOSIS_FIELDS: [&str; 2] = ["Diagnosis", "Medicine"];

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("record is not a JSON object")]
    NotAnObject,
    #[error("invalid shape: {0}")]
    InvalidShape(String),
    #[error("schema mismatch: {0}")]
    Schema(#[from] serde_json::Error),
}

/// Fills every missing key with `null` and builds the typed batch.
///
/// A missing `Prescriptions` key yields an empty batch. Keys that are present
/// keep their values, with bare numbers and booleans turned into their text
/// form. Arrays or objects where text is expected fail the whole record.
pub fn validate_prescriptions(record: Value) -> Result<PrescriptionBatch, ValidationError> {
    let Value::Object(mut root) = record else {
        return Err(ValidationError::NotAnObject);
    };

    let entries = root
        .entry(PRESCRIPTIONS_KEY)
        .or_insert_with(|| Value::Array(Vec::new()));
    let Value::Array(entries) = entries else {
        return Err(ValidationError::InvalidShape(format!(
            "{PRESCRIPTIONS_KEY} must be an array"
        )));
    };

    for (index, entry) in entries.iter_mut().enumerate() {
        let Value::Object(entry) = entry else {
            return Err(ValidationError::InvalidShape(format!(
                "{PRESCRIPTIONS_KEY}[{index}] must be an object"
            )));
        };

        fill_section(entry, DIAGNOSIS_KEY, &DIAGNOSIS_FIELDS, index)?;
        fill_section(entry, MEDICATION_KEY, &MEDICATION_DETAIL_FIELDS, index)?;
        stringify_scalar(entry.entry(DESCRIPTION_KEY).or_insert(Value::Null));
    }

    Ok(serde_json::from_value(Value::Object(root))?)
}

fn fill_section(
    entry: &mut Map<String, Value>,
    key: &str,
    fields: &[&str],
    index: usize,
) -> Result<(), ValidationError> {
    let section = entry.entry(key).or_insert_with(|| Value::Object(Map::new()));
    let Value::Object(section) = section else {
        return Err(ValidationError::InvalidShape(format!(
            "{PRESCRIPTIONS_KEY}[{index}].{key} must be an object"
        )));
    };

    for field in fields {
        stringify_scalar(section.entry(*field).or_insert(Value::Null));
    }

    Ok(())
}

fn stringify_scalar(value: &mut Value) {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return,
    };
    *value = Value::String(text);
}
