//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone)]
pub enum Effect {
    /// Fetch current weather for every city, concurrently
    FetchComparison { cities: Vec<String> },
}
