use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        OutlineError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        OutlineError::precondition("x")
            .to_string()
            .contains("precondition violated:")
    );
    assert!(
        OutlineError::missing_resource("x")
            .to_string()
            .contains("missing resource:")
    );
    assert!(
        OutlineError::shader_template("x")
            .to_string()
            .contains("shader template error:")
    );
    assert!(
        OutlineError::backend("x")
            .to_string()
            .contains("backend error:")
    );
    assert!(
        OutlineError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = OutlineError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
