//! Integration tests for `ResultBox` decomposition.

use monobox::*;

fn parse(input: &str) -> ResultBox<i64, String> {
    match input.trim().parse::<i64>() {
        Ok(value) => ResultBox::new(value),
        Err(error) => Unexpected(format!("{input:?}: {error}")).into(),
    }
}

#[test]
fn test_success_populates_only_value_slot() {
    let boxed = parse("  17 ");
    let (value, error) = boxed.decompose().into_tuple();
    assert_eq!(value.get(), Some(&&17));
    assert!(!error.is_present());
}

#[test]
fn test_error_populates_only_error_slot() {
    let boxed = parse("seventeen");
    let parts = boxed.decompose();
    assert!(!parts.value.is_present());
    let (message, present) = parts.error.decompose().into_tuple();
    assert!(present);
    assert!(message.is_some_and(|m| m.starts_with("\"seventeen\"")));
}

#[test]
fn test_domain_error_surfaces_verbatim() {
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Rejection {
        TooLarge { limit: u32 },
    }

    let boxed: ResultBox<u32, Rejection> = ResultBox::from_error(Rejection::TooLarge { limit: 10 });
    let (_, error) = boxed.into_parts();
    assert_eq!(error.into_option(), Some(Rejection::TooLarge { limit: 10 }));
}

#[test]
fn test_never_both_present() {
    for boxed in [parse("1"), parse("x"), parse("-9"), parse("")] {
        let parts = boxed.decompose();
        assert_ne!(parts.value.is_present(), parts.error.is_present());
    }
}
