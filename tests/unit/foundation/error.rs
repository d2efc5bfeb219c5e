use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LookbookError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        LookbookError::layout("x")
            .to_string()
            .contains("layout error:")
    );
    assert!(
        LookbookError::compose("x")
            .to_string()
            .contains("compose error:")
    );
    assert!(
        LookbookError::audio("x")
            .to_string()
            .contains("audio error:")
    );
    assert!(
        LookbookError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn no_source_images_names_the_directory() {
    let err = LookbookError::NoSourceImages {
        dir: PathBuf::from("shots/spring"),
    };
    let msg = err.to_string();
    assert!(msg.contains("no images found"));
    assert!(msg.contains("shots/spring"));
}

#[test]
fn processing_wraps_once() {
    let err = LookbookError::NoScenes.processing().processing();
    let msg = err.to_string();
    assert!(msg.starts_with("error processing video:"));
    assert_eq!(msg.matches("error processing video").count(), 1);
    assert!(matches!(err, LookbookError::Processing(inner) if matches!(*inner, LookbookError::NoScenes)));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LookbookError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
