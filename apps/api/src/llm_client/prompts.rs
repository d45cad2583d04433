// Prompt templates for the external text generator.
// Placeholders are `{name}` and are filled with `str::replace`.

pub const ROADMAP_PROMPT_TEMPLATE: &str = "Give a 4 phased learning roadmap for {career_title}?";

pub const ADVICE_PROMPT_TEMPLATE: &str = "You are a career counselor. \
    Provide brief career advice based on these skills: {skills}\n\n\
    Provide 2-3 sentences of personalized career guidance.";

pub fn roadmap_prompt(career_title: &str) -> String {
    ROADMAP_PROMPT_TEMPLATE.replace("{career_title}", career_title)
}

pub fn advice_prompt(skills: &str) -> String {
    ADVICE_PROMPT_TEMPLATE.replace("{skills}", skills)
}
