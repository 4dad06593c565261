/// Compute effective limit with precedence: global flag -> fallback.
#[must_use]
pub fn effective_limit(global: Option<u32>, fallback: usize) -> usize {
    global.and_then(|limit| usize::try_from(limit).ok()).unwrap_or(fallback)
}
