use rxscribe::domain::{AudioUploadId, StoragePath};

#[test]
fn given_upload_with_filename_when_creating_path_then_keeps_extension() {
    let upload_id = AudioUploadId::new();
    let path = StoragePath::for_audio(&upload_id, Some("recording.WEBM"));

    assert_eq!(
        path.as_str(),
        format!("audio/{}.webm", upload_id.as_uuid())
    );
}

#[test]
fn given_upload_without_filename_when_creating_path_then_defaults_to_wav() {
    let upload_id = AudioUploadId::new();
    let path = StoragePath::for_audio(&upload_id, None);

    assert!(path.as_str().ends_with(".wav"));
}

#[test]
fn given_suspicious_extension_when_creating_path_then_falls_back_to_wav() {
    let upload_id = AudioUploadId::new();
    let path = StoragePath::for_audio(&upload_id, Some("clip.../../etc"));

    assert_eq!(path.file_name(), format!("{}.wav", upload_id.as_uuid()));
}

#[test]
fn given_two_uploads_with_same_filename_when_creating_paths_then_paths_differ() {
    let path_a = StoragePath::for_audio(&AudioUploadId::new(), Some("recording.wav"));
    let path_b = StoragePath::for_audio(&AudioUploadId::new(), Some("recording.wav"));

    assert_ne!(path_a, path_b);
}

#[test]
fn given_storage_path_when_displayed_then_matches_as_str() {
    let path = StoragePath::for_audio(&AudioUploadId::new(), Some("a.mp3"));

    assert_eq!(format!("{}", path), path.as_str());
}
