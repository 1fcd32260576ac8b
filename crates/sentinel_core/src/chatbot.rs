//! Scripted help bot for the marketing site.

pub const CHAT_GREETING: &str = "Hello! I'm AuraBot \u{2014} ask about phishing, how Aura Sentinel works, or type 'Contact support'.";

pub const DEFAULT_REPLY: &str = "\u{1f916} Sorry, I don't understand that yet. Try: 'What is phishing', 'Give me a security tip', or 'Contact support'.";

// Checked in order; the first key contained in the lower-cased input wins.
const RESPONSES: &[(&str, &str)] = &[
    (
        "what is phishing",
        "Phishing is a scam where attackers try to trick people into giving sensitive information like passwords or card details.",
    ),
    (
        "how does aura sentinel work",
        "Aura Sentinel analyzes link patterns, domain signals and content heuristics to compute a risk score and show clear warnings.",
    ),
    (
        "contact support",
        "You can reach our customer care at +91 12345 67890 (Mon-Fri 9am-6pm).",
    ),
    (
        "customer care",
        "Customer care: +91 12345 67890 \u{2014} available Mon-Fri 9am-6pm.",
    ),
    (
        "give me a security tip",
        "Hover over links to check the real URL, enable 2FA, and never share one-time passwords with anyone.",
    ),
    (
        "is it free",
        "The demo/hackathon version is free. Production rollout and pricing can be discussed later.",
    ),
];

pub fn reply(input: &str) -> &'static str {
    let key = input.trim().to_lowercase();
    RESPONSES
        .iter()
        .find(|(needle, _)| key.contains(needle))
        .map(|(_, answer)| *answer)
        .unwrap_or(DEFAULT_REPLY)
}
