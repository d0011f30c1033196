mod json_file_repository;

pub use json_file_repository::{JsonFilePrescriptionRepository, resolve_dataset_path};
