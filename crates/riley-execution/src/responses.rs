//! Canned reply bodies for each handler.

use riley_core::{ActionKind, ActionOutcome, Mode, ResponseSource, Route, Tone};

const INVENTION_BODY: &str = "Here's an invention concept based on your request:

**Quantum Resonance Fabric (QRF)**

A smart textile material that uses quantum entanglement principles to:
1. Adapt its thermal properties based on body temperature and environmental conditions
2. Generate small amounts of electricity from movement and temperature differentials
3. Change color and pattern based on user preferences or environmental stimuli
4. Provide haptic feedback through microscopic vibrations

This could revolutionize clothing, medical textiles, and smart home furnishings.";

const GITHUB_BODY: &str = "I've analyzed the repository and found:

**Repository Structure:**
- 45 Python files
- 12 JavaScript files
- 3 main directories: src, tests, docs

**Key Patterns:**
1. Factory design pattern used extensively
2. Dependency injection for service components
3. Comprehensive test coverage (87%)

**Learning Opportunities:**
- The error handling approach is particularly elegant
- The project uses an interesting approach to configuration management
- CI/CD pipeline implementation is worth studying

Would you like me to focus on any specific aspect of the codebase?";

const REPAIR_BODY: &str = r#"I've analyzed and repaired the code:

```python
def calculate_average(numbers):
    """Calculate the average of a list of numbers."""
    if not numbers:
        return 0  # Return 0 for empty lists instead of raising an error

    total = sum(numbers)
    return total / len(numbers)
```

Changes made:
1. Added proper docstring
2. Added handling for empty lists
3. Improved variable naming
4. Simplified the calculation logic

The code now handles edge cases properly and follows best practices."#;

fn search_body(query: &str) -> String {
    format!(
        "Here's what I found about \"{query}\":

According to recent sources, this topic has seen significant developments in the past year. The main points are:

1. New research published in Science journal shows promising results
2. Several companies have launched innovative products in this space
3. Experts predict continued growth and evolution in this field

Would you like me to explore any specific aspect in more detail?"
    )
}

fn reasoning_body(mode: Mode) -> String {
    format!(
        "I'm currently in {mode} mode. Based on your question, I think I can help with that.

The approach I would recommend is to start by breaking down the problem into smaller components. This allows us to tackle each part systematically.

Is there a specific aspect you'd like me to elaborate on further?"
    )
}

/// Picks the canned reply for a route.
///
/// Equations have no dedicated engine and get the reasoning reply with a
/// neutral tone; plain conversation takes its tone from the mode.
pub fn canned_response(route: &Route, mode: Mode) -> ActionOutcome {
    let (content, source, tone) = match route.kind {
        Some(ActionKind::Invention) => (
            INVENTION_BODY.to_string(),
            ResponseSource::InventionEngine,
            Tone::Enthusiastic,
        ),
        Some(ActionKind::Search) => (
            search_body(&route.parameter),
            ResponseSource::WikiResearcher,
            Tone::Analytical,
        ),
        Some(ActionKind::Github) => (
            GITHUB_BODY.to_string(),
            ResponseSource::GithubLearning,
            Tone::Analytical,
        ),
        Some(ActionKind::Repair) => (
            REPAIR_BODY.to_string(),
            ResponseSource::AutoRepair,
            Tone::Analytical,
        ),
        Some(ActionKind::Equation) => (
            reasoning_body(mode),
            ResponseSource::ReasoningEngine,
            Tone::Neutral,
        ),
        None => (
            reasoning_body(mode),
            ResponseSource::ReasoningEngine,
            mode.conversational_tone(),
        ),
    };

    ActionOutcome {
        content,
        source,
        tone,
    }
}
