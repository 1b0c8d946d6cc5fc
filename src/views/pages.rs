//! Static content for the pages that need no data store.

use serde_json::{json, Value};

/// Content for `name`, or `None` for pages without static content.
pub fn static_content(name: &str) -> Option<Value> {
    match name.trim().to_lowercase().as_str() {
        "home" => Some(json!({
            "heading": "Hi, I'm Anvi",
            "intro": "Welcome to my digital space where I share my journey through tech, life, and everything in between. This is my digital diary, portfolio, and experiment lab.",
            "actions": [
                { "label": "Read My Blogs", "page": "blogs" },
                { "label": "View Projects", "page": "projects" },
                { "label": "Contact Me", "page": "contact" }
            ],
            "highlights": [
                { "title": "Blogs", "page": "blogs", "text": "Thoughts on tech, life, and personal experiments" },
                { "title": "Projects", "page": "projects", "text": "Showcase of my work and coding experiments" },
                { "title": "Journals", "page": "journals", "text": "Daily thoughts and personal reflections" }
            ]
        })),
        "about" => Some(json!({
            "heading": "About Me",
            "paragraphs": [
                "I'm a passionate developer and lifelong learner who loves exploring the intersection of technology and creativity. This website is my personal space to document my journey, share my thoughts, and showcase the projects I'm working on.",
                "When I'm not coding, you can find me reading, taking photos, or exploring new places.",
                "I created this site as a digital diary and portfolio to track my growth, share my experiences, and connect with like-minded individuals."
            ],
            "timeline": [
                { "year": "2024", "title": "Started My Journey", "description": "Began exploring web development and building projects" },
                { "year": "2023", "title": "Learning & Growing", "description": "Dove deep into programming and technology" }
            ],
            "hobbies": [
                { "name": "Coding", "icon": "💻" },
                { "name": "Reading", "icon": "📚" },
                { "name": "Photography", "icon": "📷" },
                { "name": "Music", "icon": "🎵" },
                { "name": "Travel", "icon": "✈️" },
                { "name": "Art", "icon": "🎨" }
            ]
        })),
        _ => None,
    }
}
