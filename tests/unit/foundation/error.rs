use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(MaskError::parse("x").to_string().contains("parse error:"));
    assert!(MaskError::range("x").to_string().contains("range error:"));
    assert!(MaskError::shape("x").to_string().contains("shape mismatch:"));
    assert!(
        MaskError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MaskError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MaskError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
