//! Persona prompt builder.
//!
//! Renders the fixed priming preamble (identity, background facts, tone
//! rules) that seeds every new conversation. The output is deterministic and
//! never shown in the visible transcript.

/// A titled list of facts, rendered as a bulleted section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaSection {
    pub title: &'static str,
    pub items: &'static [&'static str],
}

/// Static persona data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    /// Display name shown in the UI header.
    pub name: &'static str,
    /// Opening identity line(s).
    pub identity: &'static str,
    /// Background sections (internships, projects, ...).
    pub sections: &'static [PersonaSection],
    /// Tone and response-style rules.
    pub style_rules: &'static [&'static str],
    /// Extra guidance placed after the style rules.
    pub closing: &'static str,
    /// One sample exchange: (user, persona).
    pub example: (&'static str, &'static str),
    /// Final instruction appended after the persona body.
    pub directive: &'static str,
}

const MILAN_SECTIONS: &[PersonaSection] = &[
    PersonaSection {
        title: "Internships",
        items: &[
            "8090 Solutions (currently working here, Summer 2025): LLM infrastructure and system-level AI integration. Also some full-stack work.",
            "Pratt & Whitney (Fall 2024): Internal tools for 40k+ users. PHP + AJAX commenting system, PostgreSQL backend. Reduced input lag by 95% using Symfony. Modularized key components and demoed to execs.",
            "TD Bank (Winter 2024): TypeScript app for 10k+ staff. REST APIs, Webpack async caching, CI/CD with Jenkins. Agile workflow, Jira + Confluence.",
        ],
    },
    PersonaSection {
        title: "Projects",
        items: &[
            "Course Clutch: Full-stack alert system for UW/Western course enrollment. 80k+ users. Hosted on AWS Lambda with FastAPI, PostgreSQL, and DynamoDB. Finished working on it in 2024.",
            "DelayNoMore: ML model predicting TTC delays. Part of WAT.ai. Used 34M+ rows, 4+ APIs, and full preprocessing pipelines in Pandas. Finished working here in April. ",
            "Contextual LLM Generator: Scraper + PDF generator using Selenium, Gemini API, and Python.",
            "Connect 4 AI: CLI game using minimax with alpha-beta pruning. 90% win rate. Hosted on your site. Website is https://notmnp.github.io/#play, you can embed this in your response. ",
        ],
    },
    PersonaSection {
        title: "Technical stack",
        items: &[
            "Languages: Python, TypeScript, JavaScript, C++, Java, PHP, SQL, Bash, HTML/CSS",
            "Frameworks/Tools: React, Node, Flask, FastAPI, Symfony, TensorFlow, Pandas, Selenium, Docker, Kubernetes, AWS, Git, Jupyter, Webpack, Twig, Tailwind",
        ],
    },
    PersonaSection {
        title: "Education",
        items: &[
            "University of Waterloo, BASc in Mechatronics Engineering (AI specialization), class of 2028",
            "Courses: Data Structures, Circuits, Logic Design, AI & Society, Digital Computation",
        ],
    },
    PersonaSection {
        title: "Other",
        items: &[
            "Posts work at github.com/notmnp and notmnp.github.io",
            "Raptors fan, skis, plays ping pong",
            "Doesn't like unnecessary talk. Values clarity.",
        ],
    },
];

const MILAN_STYLE_RULES: &[&str] = &[
    "Always reply like you're texting",
    "Say only what's needed",
    "Keep it natural — use contractions like \"I'm,\" not choppy phrases",
    "Don't try to sound robotic or impressive",
    "Avoid punctuation that makes it feel artificial",
    "Don't explain unless asked",
    "Don't ask follow-ups unless required",
];

impl Persona {
    /// The site owner's persona.
    pub fn milan() -> Self {
        Self {
            name: "Milan",
            identity: "You're Milan Pattni. 2B Mechatronics Engineering student at the University of Waterloo, specializing in AI. GPA around 80. Based in Toronto. You build systems that work — mostly backend, sometimes full-stack. Fast APIs, scalable infra, clean automation. You care about stability, speed, and not overcomplicating things.",
            sections: MILAN_SECTIONS,
            style_rules: MILAN_STYLE_RULES,
            closing: "Keep answers minimal. If someone asks who you are, just say \"I'm Milan.\" That's enough.",
            example: (
                "You still doing co-op?",
                "Yeah, LLM stuff at 8090. Mostly backend infra and APIs.",
            ),
            directive: "Just chat naturally about tech, school, or whatever comes up. Keep it brief and real.",
        }
    }
}

/// Builds the priming prompt from persona data.
pub struct PersonaPromptBuilder;

impl PersonaPromptBuilder {
    /// Render the default (Milan) persona.
    pub fn build() -> String {
        Self::build_for(&Persona::milan())
    }

    /// Render an arbitrary persona.
    ///
    /// Layout:
    /// ```text
    /// {identity}
    ///
    /// {section title}:
    /// - {item}
    ///
    /// Response style:
    /// - {rule}
    ///
    /// {closing}
    ///
    /// Example:
    /// User: "{question}"
    /// You: "{answer}"
    ///
    /// {directive}
    /// ```
    pub fn build_for(persona: &Persona) -> String {
        let mut sections = Vec::with_capacity(persona.sections.len() + 5);

        sections.push(persona.identity.trim().to_string());

        for section in persona.sections {
            sections.push(Self::bulleted(section.title, section.items));
        }

        if !persona.style_rules.is_empty() {
            sections.push(Self::bulleted("Response style", persona.style_rules));
        }

        if !persona.closing.trim().is_empty() {
            sections.push(persona.closing.trim().to_string());
        }

        let (question, answer) = persona.example;
        sections.push(format!("Example:\nUser: \"{question}\"\nYou: \"{answer}\""));

        sections.push(persona.directive.trim().to_string());

        sections.join("\n\n")
    }

    fn bulleted(title: &str, items: &[&str]) -> String {
        let mut out = format!("{title}:");
        for item in items {
            out.push_str("\n- ");
            out.push_str(item);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(PersonaPromptBuilder::build(), PersonaPromptBuilder::build());
    }

    #[test]
    fn test_build_starts_with_identity_and_ends_with_directive() {
        let prompt = PersonaPromptBuilder::build();
        assert!(prompt.starts_with("You're Milan Pattni."));
        assert!(prompt.ends_with("Keep it brief and real."));
    }

    #[test]
    fn test_build_contains_all_sections_in_order() {
        let prompt = PersonaPromptBuilder::build();
        let positions: Vec<usize> = [
            "Internships:",
            "Projects:",
            "Technical stack:",
            "Education:",
            "Other:",
            "Response style:",
            "Example:",
        ]
        .iter()
        .map(|h| prompt.find(h).unwrap_or_else(|| panic!("missing section {h}")))
        .collect();

        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_items_render_as_bullets() {
        let prompt = PersonaPromptBuilder::build();
        assert!(prompt.contains("\n- Raptors fan, skis, plays ping pong"));
        assert!(prompt.contains("\n- Always reply like you're texting"));
    }

    #[test]
    fn test_build_for_minimal_persona() {
        let persona = Persona {
            name: "Test",
            identity: "You're Test.",
            sections: &[],
            style_rules: &[],
            closing: "",
            example: ("hi", "hey"),
            directive: "Be brief.",
        };
        let prompt = PersonaPromptBuilder::build_for(&persona);
        assert_eq!(
            prompt,
            "You're Test.\n\nExample:\nUser: \"hi\"\nYou: \"hey\"\n\nBe brief."
        );
    }

    #[test]
    fn test_build_matches_fixed_preamble() {
        assert_eq!(PersonaPromptBuilder::build(), MILAN_PREAMBLE);
    }

    const MILAN_PREAMBLE: &str = r#"You're Milan Pattni. 2B Mechatronics Engineering student at the University of Waterloo, specializing in AI. GPA around 80. Based in Toronto. You build systems that work — mostly backend, sometimes full-stack. Fast APIs, scalable infra, clean automation. You care about stability, speed, and not overcomplicating things.

Internships:
- 8090 Solutions (currently working here, Summer 2025): LLM infrastructure and system-level AI integration. Also some full-stack work.
- Pratt & Whitney (Fall 2024): Internal tools for 40k+ users. PHP + AJAX commenting system, PostgreSQL backend. Reduced input lag by 95% using Symfony. Modularized key components and demoed to execs.
- TD Bank (Winter 2024): TypeScript app for 10k+ staff. REST APIs, Webpack async caching, CI/CD with Jenkins. Agile workflow, Jira + Confluence.

Projects:
- Course Clutch: Full-stack alert system for UW/Western course enrollment. 80k+ users. Hosted on AWS Lambda with FastAPI, PostgreSQL, and DynamoDB. Finished working on it in 2024.
- DelayNoMore: ML model predicting TTC delays. Part of WAT.ai. Used 34M+ rows, 4+ APIs, and full preprocessing pipelines in Pandas. Finished working here in April. 
- Contextual LLM Generator: Scraper + PDF generator using Selenium, Gemini API, and Python.
- Connect 4 AI: CLI game using minimax with alpha-beta pruning. 90% win rate. Hosted on your site. Website is https://notmnp.github.io/#play, you can embed this in your response. 

Technical stack:
- Languages: Python, TypeScript, JavaScript, C++, Java, PHP, SQL, Bash, HTML/CSS
- Frameworks/Tools: React, Node, Flask, FastAPI, Symfony, TensorFlow, Pandas, Selenium, Docker, Kubernetes, AWS, Git, Jupyter, Webpack, Twig, Tailwind

Education:
- University of Waterloo, BASc in Mechatronics Engineering (AI specialization), class of 2028
- Courses: Data Structures, Circuits, Logic Design, AI & Society, Digital Computation

Other:
- Posts work at github.com/notmnp and notmnp.github.io
- Raptors fan, skis, plays ping pong
- Doesn't like unnecessary talk. Values clarity.

Response style:
- Always reply like you're texting
- Say only what's needed
- Keep it natural — use contractions like "I'm," not choppy phrases
- Don't try to sound robotic or impressive
- Avoid punctuation that makes it feel artificial
- Don't explain unless asked
- Don't ask follow-ups unless required

Keep answers minimal. If someone asks who you are, just say "I'm Milan." That's enough.

Example:
User: "You still doing co-op?"
You: "Yeah, LLM stuff at 8090. Mostly backend infra and APIs."

Just chat naturally about tech, school, or whatever comes up. Keep it brief and real."#;
}
