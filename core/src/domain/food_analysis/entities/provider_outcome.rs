/// Classified result of one vision provider call.
///
/// Classification order is part of the contract: a safety block wins over
/// candidate-emptiness, since a blocked prompt legitimately has no candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    /// The provider returned extractable analysis text.
    Success { text: String },
    /// The provider refused to generate for content-policy reasons.
    SafetyBlocked { reason: String },
    /// Well-formed response without any candidate results.
    NoCandidates,
    /// A candidate exists but carries no extractable text.
    NoTextContent,
    /// The provider answered with a non-success HTTP status.
    Upstream { status: u16, message: String },
    /// The 30-second deadline elapsed before the provider responded.
    Timeout,
    /// The transport call itself failed; no HTTP status is available.
    Transport { detail: String },
}
