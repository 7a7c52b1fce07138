use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PlateError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(PlateError::asset("x").to_string().contains("asset error:"));
    assert!(PlateError::render("x").to_string().contains("render error:"));
    assert!(
        PlateError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        PlateError::UnknownElement(uuid::Uuid::nil())
            .to_string()
            .contains("unknown element:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PlateError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
