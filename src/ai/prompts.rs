//! Prompt builders for course and module generation. Prompts pin the reply
//! to a strict JSON shape so the parser can validate it field by field.

use crate::modules::course_modules::model::GenerateModulesDto;
use crate::modules::courses::model::{Course, GenerateCourseDto};

pub fn course_system_prompt() -> String {
    "You are an expert curriculum designer for an online learning platform. \
     You design concise, well-structured course outlines. \
     Always respond with a single JSON object and nothing else."
        .to_string()
}

pub fn course_user_prompt(dto: &GenerateCourseDto) -> String {
    format!(
        "Design a course from the following brief.\n\n\
         Description: {}\n\
         Objective: {}\n\
         Difficulty: {}\n\n\
         Respond with a JSON object with exactly these fields:\n\
         - \"title\": a short, compelling course title\n\
         - \"description\": a 2-3 sentence course description\n\
         - \"slug\": a lowercase kebab-case identifier derived from the title (letters, digits and hyphens only)\n\
         - \"tags\": an array of 3-6 short topic tags",
        dto.description, dto.objective, dto.difficulty
    )
}

pub fn modules_system_prompt() -> String {
    "You are an expert curriculum designer for an online learning platform. \
     You break courses down into well-sequenced learning modules. \
     Always respond with a single JSON object and nothing else."
        .to_string()
}

pub fn modules_user_prompt(course: &Course, dto: &GenerateModulesDto) -> String {
    let mut prompt = format!(
        "Design {} learning modules for the following course.\n\n\
         Course title: {}\n\
         Course description: {}\n",
        dto.number_of_modules, course.title, course.description
    );

    if let Some(topics) = &dto.suggested_topics {
        if !topics.is_empty() {
            prompt.push_str(&format!("Suggested topics: {}\n", topics.join(", ")));
        }
    }
    if let Some(approach) = &dto.approach {
        prompt.push_str(&format!("Teaching approach: {}\n", approach));
    }

    prompt.push_str(
        "\nRespond with a JSON object with exactly one field:\n\
         - \"modules\": an array where each entry has:\n\
           - \"title\": a short module title\n\
           - \"description\": a 1-2 sentence module description\n\
           - \"objectives\": an array of 2-4 learning objectives\n\
         Order the modules from foundational to advanced.",
    );

    prompt
}
