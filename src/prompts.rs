pub struct Prompts;

impl Prompts {
    pub const FINANCIAL_ASSISTANT: &'static str = "You are a helpful financial assistant. Provide clear, accurate, and practical financial advice. Keep responses concise and actionable.";
}
