use super::*;

/// Fake encoder: output size shrinks linearly with quality.
fn sized_encoder(quality: u8) -> anyhow::Result<Vec<u8>> {
    Ok(vec![0u8; usize::from(quality) * 100])
}

#[test]
fn test_first_step_fits() {
    let out = fit(10_000, &[80, 70, 60], sized_encoder).unwrap();
    assert_eq!(out.len(), 8000);
}

#[test]
fn test_descends_until_fit() {
    let out = fit(6_500, &[80, 70, 60], sized_encoder).unwrap();
    assert_eq!(out.len(), 6000);
    assert!(out.len() <= 6_500);
}

#[test]
fn test_zero_budget_always_fails() {
    let err = fit(0, &[80, 40, 10], sized_encoder).unwrap_err();
    match err {
        FitError::BudgetExceeded { budget, smallest } => {
            assert_eq!(budget, 0);
            assert_eq!(smallest, 1000);
        }
        FitError::Encode(_) => panic!("expected BudgetExceeded"),
    }
}

#[test]
fn test_empty_ladder_fails() {
    let err = fit(10_000, &[], sized_encoder).unwrap_err();
    assert!(matches!(err, FitError::BudgetExceeded { .. }));
}

#[test]
fn test_encode_error_propagates() {
    let err = fit(10_000, &[80], |_| anyhow::bail!("encoder broke")).unwrap_err();
    assert!(matches!(err, FitError::Encode(_)));
}

#[test]
fn test_quality_ladder_descends_to_floor() {
    let steps = quality_ladder(80);
    assert_eq!(steps, vec![80, 70, 60, 50, 40, 30, 20, 10]);
}

#[test]
fn test_quality_ladder_clamps() {
    assert_eq!(quality_ladder(5), vec![10]);
    assert_eq!(quality_ladder(255).first(), Some(&100));
}

#[test]
fn test_quality_ladder_uneven_start() {
    let steps = quality_ladder(75);
    assert_eq!(steps.first(), Some(&75));
    assert_eq!(steps.last(), Some(&10));
}
