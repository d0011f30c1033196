use rxscribe::domain::{MEDICATION_DETAIL_FIELDS, Prescription, PrescriptionBatch};

#[test]
fn given_empty_prescription_when_serialized_then_every_key_is_present_as_null() {
    let value = serde_json::to_value(Prescription::default()).unwrap();

    assert!(value["Description"].is_null());
    let diagnosis = value["DiagnosisInformation"].as_object().unwrap();
    assert!(diagnosis["Diagnosis"].is_null());
    assert!(diagnosis["Medicine"].is_null());

    let details = value["MedicationDetails"].as_object().unwrap();
    assert_eq!(details.len(), MEDICATION_DETAIL_FIELDS.len());
    for field in MEDICATION_DETAIL_FIELDS {
        assert!(details.contains_key(field), "missing {field}");
        assert!(details[field].is_null());
    }
}

#[test]
fn given_empty_batch_when_serialized_then_prescriptions_key_is_present() {
    let value = serde_json::to_value(PrescriptionBatch::default()).unwrap();
    assert_eq!(value, serde_json::json!({ "Prescriptions": [] }));
}

#[test]
fn given_populated_prescription_when_serialized_then_uses_pascal_case_keys() {
    let mut prescription = Prescription::default();
    prescription.medication_details.frequency_duration = Some("7".to_string());
    prescription.diagnosis_information.medicine = Some("Amoxicillin".to_string());

    let value = serde_json::to_value(&prescription).unwrap();

    assert_eq!(value["MedicationDetails"]["FrequencyDuration"], "7");
    assert_eq!(value["DiagnosisInformation"]["Medicine"], "Amoxicillin");
}
