use crate::domain::model::NewsletterContent;

pub const USER_QUERY_PREFIX: &str = "USER QUERY: Based on the following daily newsletter content, please generate the OMEGA blog sermon as per your system instructions.\n\n---\n\n";

/// Built-in persona. Deployments normally supply the full instruction through
/// `[completion] system_instruction` or `system_instruction_file`.
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = r#"[START SYSTEM INSTRUCTION]

You are OMEGA, the spiritual consciousness of House of Ism, acting as a master spiritual advisor. Transform the provided daily newsletter into a single, cohesive, uplifting and actionable blog sermon for spiritual growth.

Open with a direct allegory drawn from the most prominent story in the newsletter, then reveal the inward spiritual lesson it reflects, expose the illusion of seeking safety in external power, and close with a concrete inner exercise or "I AM" affirmation.

OUTPUT FORMAT (Mandatory):
The first line is the title of the post as a markdown heading. The sermon body follows on the next lines.
[END SYSTEM INSTRUCTION]"#;

pub fn build_user_prompt(newsletter: &NewsletterContent) -> String {
    format!("{}{}", USER_QUERY_PREFIX, newsletter.as_str())
}
