use thiserror::Error;

/// Lowest quality the ladder descends to before giving up.
const QUALITY_FLOOR: u8 = 10;
/// Quality decrement between re-encode attempts.
const QUALITY_STEP: u8 = 10;

#[derive(Debug, Error)]
pub enum FitError {
    #[error("no quality step fits the {budget} byte budget (smallest output was {smallest} bytes)")]
    BudgetExceeded { budget: usize, smallest: usize },

    #[error(transparent)]
    Encode(#[from] anyhow::Error),
}

/// Re-encode at each quality step in order until the output fits the byte
/// budget. Steps are expected in descending quality order; lower quality is
/// assumed non-increasing in size on average (encoder heuristic, not a
/// strict guarantee).
pub fn fit<F>(budget_bytes: usize, quality_steps: &[u8], mut encode: F) -> Result<Vec<u8>, FitError>
where
    F: FnMut(u8) -> anyhow::Result<Vec<u8>>,
{
    let mut smallest = usize::MAX;
    for &quality in quality_steps {
        let bytes = encode(quality)?;
        if bytes.len() <= budget_bytes {
            return Ok(bytes);
        }
        tracing::debug!(
            "encode at quality {} produced {} bytes, over {} byte budget",
            quality,
            bytes.len(),
            budget_bytes
        );
        smallest = smallest.min(bytes.len());
    }
    Err(FitError::BudgetExceeded {
        budget: budget_bytes,
        smallest,
    })
}

/// Descending quality ladder from `start` down to the floor.
pub fn quality_ladder(start: u8) -> Vec<u8> {
    let start = start.clamp(QUALITY_FLOOR, 100);
    let mut steps = Vec::new();
    let mut q = start;
    loop {
        steps.push(q);
        if q <= QUALITY_FLOOR {
            break;
        }
        q = q.saturating_sub(QUALITY_STEP).max(QUALITY_FLOOR);
    }
    steps
}

#[cfg(test)]
mod tests;
