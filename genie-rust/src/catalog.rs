use crate::{Category, CategoryFilter, Idea};
use rand::{seq::SliceRandom, Rng};

/// A built-in idea served when no API key is configured.
#[derive(Debug, Clone, Copy)]
pub struct SampleIdea {
    pub title: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub tech_stack: &'static str,
    pub category: Category,
    pub api_cost: &'static str,
    pub system_prompt: &'static str,
}

impl SampleIdea {
    #[must_use]
    pub fn to_idea(&self) -> Idea {
        Idea {
            title: self.title.to_string(),
            description: self.description.to_string(),
            features: self.features.iter().map(ToString::to_string).collect(),
            tech_stack: self.tech_stack.to_string(),
            category: Some(self.category),
            api_cost: self.api_cost.to_string(),
            system_prompt: self.system_prompt.to_string(),
        }
    }
}

const NO_API_COST: &str = "No API costs - purely frontend implementation";

pub static SAMPLE_IDEAS: &[SampleIdea] = &[
    SampleIdea {
        title: "Weather Mood Tracker",
        description: "A simple web app that correlates local weather with your daily mood entries. It uses a weather API to fetch current conditions and allows users to log their mood and activities. Over time, it shows patterns between weather and mood.",
        features: &[
            "Daily mood and activity logging",
            "Local weather integration",
            "Correlation visualizations",
            "Weekly and monthly mood summaries",
        ],
        tech_stack: "HTML, CSS, JavaScript, OpenWeatherMap API",
        category: Category::Personal,
        api_cost: "Approximately $0.50-$1.00 in API calls for development and testing",
        system_prompt: r#"Create a simple web application called "Weather Mood Tracker" that:
1. Fetches local weather data using the OpenWeatherMap API
2. Allows users to log their daily mood on a 1-5 scale
3. Lets users record activities they did that day
4. Shows visualizations of mood patterns correlated with weather
5. Provides weekly and monthly summaries

The app should use HTML, CSS, and vanilla JavaScript. Store data in localStorage.
Include all necessary code to make this a functional application that can be opened directly in a browser."#,
    },
    SampleIdea {
        title: "Recipe Cost Calculator",
        description: "A utility that helps home cooks calculate the cost of their recipes. Users can input ingredients and their prices, and the app will calculate the total cost and cost per serving.",
        features: &[
            "Ingredient cost database",
            "Recipe cost calculation",
            "Cost per serving breakdown",
            "Recipe saving and sharing",
        ],
        tech_stack: "HTML, CSS, JavaScript, localStorage",
        category: Category::Productivity,
        api_cost: NO_API_COST,
        system_prompt: r#"Create a "Recipe Cost Calculator" web application that:
1. Allows users to create and save recipes
2. Lets users input ingredients with their quantities and prices
3. Calculates the total recipe cost and cost per serving
4. Provides a way to save and share recipes
5. Includes a small database of common ingredient prices

Use HTML, CSS, and vanilla JavaScript. Store data in localStorage.
The application should be fully functional when opened in a browser."#,
    },
    SampleIdea {
        title: "Markdown Note Taker",
        description: "A browser-based markdown editor that saves notes locally. It features live preview, organization by tags, and search functionality.",
        features: &[
            "Live markdown preview",
            "Local storage of notes",
            "Tag-based organization",
            "Full-text search",
            "Export to PDF or HTML",
        ],
        tech_stack: "HTML, CSS, JavaScript, marked.js (for markdown parsing)",
        category: Category::Productivity,
        api_cost: NO_API_COST,
        system_prompt: r#"Create a "Markdown Note Taker" web application that:
1. Provides a markdown editor with live preview
2. Automatically saves notes to localStorage
3. Allows organizing notes with tags
4. Includes full-text search functionality
5. Lets users export notes as PDF or HTML

Use HTML, CSS, and JavaScript. You may use the marked.js library for markdown parsing.
The application should work entirely in the browser with no backend required."#,
    },
    SampleIdea {
        title: "Daily Habit Tracker",
        description: "A simple web app that helps users track their daily habits and build consistency. It provides visual feedback on streaks and progress over time.",
        features: &[
            "Daily habit check-ins",
            "Streak tracking",
            "Progress visualization",
            "Reminder settings",
        ],
        tech_stack: "HTML, CSS, JavaScript, localStorage",
        category: Category::Personal,
        api_cost: NO_API_COST,
        system_prompt: r#"Create a "Daily Habit Tracker" web application that:
1. Allows users to create and track daily habits
2. Shows visual streaks for consistent habit completion
3. Provides progress charts over time
4. Lets users set reminders for their habits

Use HTML, CSS, and JavaScript. Store data in localStorage.
The application should be fully functional when opened in a browser."#,
    },
    SampleIdea {
        title: "Email Template Generator",
        description: "A tool that helps users quickly generate professional email templates for common scenarios like follow-ups, introductions, and meeting requests.",
        features: &[
            "Template categories",
            "Customizable fields",
            "Copy to clipboard",
            "Save favorite templates",
        ],
        tech_stack: "HTML, CSS, JavaScript, localStorage",
        category: Category::Work,
        api_cost: NO_API_COST,
        system_prompt: r#"Create an "Email Template Generator" web application that:
1. Provides templates for common email scenarios
2. Allows customization of key fields (names, dates, etc.)
3. Enables one-click copying to clipboard
4. Lets users save their favorite templates

Use HTML, CSS, and JavaScript. Store data in localStorage.
The application should be fully functional when opened in a browser."#,
    },
    SampleIdea {
        title: "Houseplant Drama Narrator",
        description: "A playful web app that turns your houseplant watering log into a daily soap opera. Each plant gets a personality, and missed waterings escalate into dramatic plot twists.",
        features: &[
            "Plant profiles with personalities",
            "Watering log",
            "Daily generated episode text",
            "Drama level meter",
        ],
        tech_stack: "HTML, CSS, JavaScript, localStorage",
        category: Category::Entertainment,
        api_cost: NO_API_COST,
        system_prompt: r#"Create a "Houseplant Drama Narrator" web application that:
1. Lets users add plants with a name and a personality trait
2. Records when each plant was last watered
3. Generates a short dramatic episode for each plant based on how long it has gone without water
4. Shows a drama level meter that rises as watering is neglected

Use HTML, CSS, and vanilla JavaScript with template-based text generation. Store data in localStorage.
The application should be fully functional when opened in a browser."#,
    },
    SampleIdea {
        title: "Unit Converter Pocketknife",
        description: "A fast single-page converter for everyday units, from cups to grams and miles to kilometers, with a history of recent conversions and keyboard-first input.",
        features: &[
            "Length, weight, volume and temperature conversions",
            "Cooking-specific conversions",
            "Recent conversion history",
            "Keyboard shortcuts",
        ],
        tech_stack: "HTML, CSS, JavaScript",
        category: Category::Utility,
        api_cost: NO_API_COST,
        system_prompt: r#"Create a "Unit Converter Pocketknife" web application that:
1. Converts between common units of length, weight, volume and temperature
2. Includes cooking conversions such as cups to grams for common ingredients
3. Keeps a history of the last 20 conversions
4. Supports typing expressions like "3 cups flour in grams"

Use HTML, CSS, and vanilla JavaScript. Store history in localStorage.
The application should be fully functional when opened in a browser."#,
    },
];

/// Picks a catalog idea matching `filter` that has not been shown yet.
///
/// When every matching idea is already in `history`, the first match that
/// differs from the most recent entry is returned so the same idea is never
/// shown twice in a row unless the filter only has one entry.
pub fn sample_idea<R>(rng: &mut R, filter: CategoryFilter, history: &[String]) -> Idea
where
    R: Rng + ?Sized,
{
    let mut candidates: Vec<&SampleIdea> = SAMPLE_IDEAS
        .iter()
        .filter(|idea| filter.matches(Some(idea.category)))
        .collect();
    if candidates.is_empty() {
        candidates = SAMPLE_IDEAS.iter().collect();
    }

    let available: Vec<&SampleIdea> = candidates
        .iter()
        .copied()
        .filter(|idea| !history.iter().any(|title| title == idea.title))
        .collect();

    let picked = if available.is_empty() {
        let most_recent = history.last().map(String::as_str);
        candidates
            .iter()
            .copied()
            .find(|idea| Some(idea.title) != most_recent)
            .or_else(|| candidates.choose(rng).copied())
    } else {
        available.choose(rng).copied()
    };

    // candidates is never empty, so a pick always exists.
    picked.unwrap_or(&SAMPLE_IDEAS[0]).to_idea()
}
