use serde::{Deserialize, Serialize};

/// Keys of the `MedicationDetails` mapping, in wire order.
pub const MEDICATION_DETAIL_FIELDS: [&str; 10] = [
    "Dose",
    "DoseUnit",
    "DoseRoute",
    "Frequency",
    "FrequencyDuration",
    "FrequencyUnit",
    "Quantity",
    "QuantityUnit",
    "Refill",
    "Pharmacy",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DiagnosisInformation {
    pub diagnosis: Option<String>,
    pub medicine: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MedicationDetails {
    pub dose: Option<String>,
    pub dose_unit: Option<String>,
    pub dose_route: Option<String>,
    pub frequency: Option<String>,
    pub frequency_duration: Option<String>,
    pub frequency_unit: Option<String>,
    pub quantity: Option<String>,
    pub quantity_unit: Option<String>,
    pub refill: Option<String>,
    pub pharmacy: Option<String>,
}

/// A fully materialized prescription. Every key serializes, absent values as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Prescription {
    pub diagnosis_information: DiagnosisInformation,
    pub medication_details: MedicationDetails,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PrescriptionBatch {
    pub prescriptions: Vec<Prescription>,
}

impl PrescriptionBatch {
    pub fn new(prescriptions: Vec<Prescription>) -> Self {
        Self { prescriptions }
    }

    pub fn is_empty(&self) -> bool {
        self.prescriptions.is_empty()
    }
}

