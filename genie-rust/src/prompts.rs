use crate::{CategoryFilter, Idea};

pub const IDEA_USER_PROMPT: &str = "Generate a random $1 software idea.";

/// System instruction for idea generation. The category constraint and the
/// titles to avoid are only mentioned when they apply.
#[must_use]
pub fn idea_system_prompt(filter: CategoryFilter, history: &[String]) -> String {
    let mut prompt = String::from(
        "You are an EXTREMELY creative and RIDICULOUS software idea generator. Generate a \
         completely absurd yet somehow still useful idea for a small software project that \
         could be built for approximately $1 or less in API fees using AI code generation \
         tools. Be over-the-top, quirky, and unexpected - the more outlandish the better, as \
         long as it's still technically feasible.",
    );

    if let CategoryFilter::Only(category) = filter {
        prompt.push_str(&format!(
            " The ridiculous idea should be in the category: {category}."
        ));
    }
    if !history.is_empty() {
        prompt.push_str(&format!(
            " Avoid these previously generated ideas: {}.",
            history.join(", ")
        ));
    }

    let category_field = match filter {
        CategoryFilter::All => {
            "Choose one: personal, work, productivity, entertainment, utility".to_string()
        }
        CategoryFilter::Only(category) => category.to_string(),
    };

    prompt.push_str(&format!(
        r#"

The idea should be practical, useful, and implementable as a small project. Focus on web apps, utilities, or tools that solve real problems.

Respond with a JSON object with the following structure:
{{
  "title": "Name of the software",
  "description": "A paragraph describing what the software does and why it's useful",
  "features": ["Feature 1", "Feature 2", "Feature 3", ...],
  "techStack": "Brief description of suggested technologies",
  "category": "{category_field}",
  "apiCost": "Brief explanation of why this would cost ~$1 or less in API fees",
  "systemPrompt": "A detailed prompt that could be given to an AI code generator to create this software"
}}

The systemPrompt should be detailed enough that an AI code generator could create a working version of the software from it."#
    ));

    prompt
}

pub const CODE_SYSTEM_PROMPT: &str = r#"You are an expert software developer. Your task is to generate code for the following software idea.

Create a complete, working implementation that can be run directly in a browser. Organize your response as a JSON object with an array of files, where each file has a name and content.

Respond with a JSON object with the following structure:
{
  "files": [
    {
      "name": "filename.ext",
      "content": "// Full file content here"
    },
    ...
  ]
}

Make sure the code is complete, well-commented, and follows best practices. Include all necessary HTML, CSS, and JavaScript files to make the application work."#;

#[must_use]
pub fn code_user_prompt(idea: &Idea) -> String {
    format!(
        "Generate code for the following software idea:

Title: {}
Description: {}
Features: {}
Tech Stack: {}

Prompt: {}",
        idea.title,
        idea.description,
        idea.features.join(", "),
        idea.tech_stack,
        idea.system_prompt
    )
}
