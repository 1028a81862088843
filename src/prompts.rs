pub const STORY_PLAN: &str = include_str!("../data/prompts/story_plan.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// The full story-planning prompt for `topic`.
pub fn story_plan(topic: &str) -> String {
    render(STORY_PLAN, &[("topic", topic)])
}
