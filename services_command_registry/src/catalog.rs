//! The portfolio vocabulary.
//!
//! Output lines carry the site's inline `terminal-*` span classes verbatim.

use crate::{CommandDefinition, CommandRegistry};

const HELP: &[&str] = &[
    r#"<span class="terminal-success">Available Commands:</span>"#,
    " ",
    r#"<span class="terminal-info">about</span>      - Learn about me"#,
    r#"<span class="terminal-info">skills</span>     - View my technical skills"#,
    r#"<span class="terminal-info">experience</span> - See my work history"#,
    r#"<span class="terminal-info">projects</span>   - Browse my projects"#,
    r#"<span class="terminal-info">contact</span>    - Get in touch"#,
    r#"<span class="terminal-info">education</span>  - View educational background"#,
    " ",
    r#"<span class="terminal-info">clear</span>      - Clear terminal"#,
    r#"<span class="terminal-info">whoami</span>     - Display current user"#,
    r#"<span class="terminal-info">ls</span>         - List files"#,
    r#"<span class="terminal-info">pwd</span>        - Print working directory"#,
];

const ABOUT: &[&str] = &[
    r#"<span class="terminal-success">About Me:</span>"#,
    " ",
    "Software Engineer specializing in AI/ML and Data Science",
    "Currently @ BISAG-N (MeitY)",
    "B.Tech in CSE from KIIT (8.66 CGPA)",
    " ",
    r#"<span class="terminal-info">Learn more:</span>"#,
];

const SKILLS: &[&str] = &[
    r#"<span class="terminal-success">Core Skills:</span>"#,
    " ",
    r#"<span class="terminal-info">AI/ML:</span> LLaMA, RAG, LangChain, Hugging Face"#,
    r#"<span class="terminal-info">Backend:</span> Django, PostgreSQL, REST APIs"#,
    r#"<span class="terminal-info">Data:</span> Pandas, Plotly, Power BI"#,
    r#"<span class="terminal-info">Languages:</span> Python, SQL"#,
    " ",
    r#"<span class="terminal-info">View complete skill set:</span>"#,
];

const EXPERIENCE: &[&str] = &[
    r#"<span class="terminal-success">Work Experience:</span>"#,
    " ",
    r#"<span class="terminal-info">Young Professional (Current)</span>"#,
    "BISAG-N (MeitY) | Software Developer",
    "Building LLM-powered AI systems",
    " ",
    r#"<span class="terminal-info">View complete experience timeline:</span>"#,
];

const PROJECTS: &[&str] = &[
    r#"<span class="terminal-success">Featured Projects:</span>"#,
    " ",
    r#"<span class="terminal-info">1. PMIS</span> - Multilingual RAG-based AI Assistant"#,
    r#"<span class="terminal-info">2. JK Samadhan</span> - Grievance Analytics (50K+ records)"#,
    r#"<span class="terminal-info">3. Raksha Yantra</span> - AI SQL Assistant"#,
    r#"<span class="terminal-info">4. Pratibimb</span> - CV-based Person ID"#,
    " ",
    r#"<span class="terminal-info">Explore all projects:</span>"#,
];

const CONTACT: &[&str] = &[
    r#"<span class="terminal-success">Contact Information:</span>"#,
    " ",
    r#"<span class="terminal-info">Email:</span> vijayavanindra5793@gmail.com"#,
    r#"<span class="terminal-info">Phone:</span> +91 8881164451"#,
    r#"<span class="terminal-info">Location:</span> Delhi, India"#,
    " ",
    r#"<span class="terminal-info">Send me a message:</span>"#,
];

const EDUCATION: &[&str] = &[
    r#"<span class="terminal-success">Education:</span>"#,
    " ",
    r#"<span class="terminal-info">B.Tech in Computer Science Engineering</span>"#,
    "Kalinga Institute of Industrial Technology (KIIT)",
    "CGPA: 8.66/10.0 | 2020 - 2024",
    " ",
    r#"<span class="terminal-info">Learn more:</span>"#,
];

const WHOAMI: &[&str] = &["Avanindra Vijay - Software Engineer & Data Scientist"];

const LS: &[&str] = &[concat!(
    r#"<span class="terminal-info">about.md</span>  "#,
    r#"<span class="terminal-info">skills.json</span>  "#,
    r#"<span class="terminal-info">projects/</span>  "#,
    r#"<span class="terminal-info">experience.log</span>  "#,
    r#"<span class="terminal-info">contact.txt</span>"#,
)];

const PWD: &[&str] = &["/home/avanindra/portfolio"];

/// Definitions in the order the help text lists them
pub fn portfolio_commands() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::output("help", "List available commands", HELP),
        CommandDefinition::output("about", "Learn about me", ABOUT)
            .with_button("View Full Profile →", "/about"),
        CommandDefinition::output("skills", "View my technical skills", SKILLS)
            .with_button("All Skills →", "/about#skills"),
        CommandDefinition::output("experience", "See my work history", EXPERIENCE)
            .with_button("View All Experience →", "/experience"),
        CommandDefinition::output("projects", "Browse my projects", PROJECTS)
            .with_button("View Portfolio →", "/portfolio"),
        CommandDefinition::output("contact", "Get in touch", CONTACT)
            .with_button("Contact Me →", "/contact"),
        CommandDefinition::output("education", "View educational background", EDUCATION)
            .with_button("View Education Details →", "/about"),
        CommandDefinition::clear("clear", "Clear terminal"),
        CommandDefinition::output("whoami", "Display current user", WHOAMI),
        CommandDefinition::output("ls", "List files", LS),
        CommandDefinition::output("pwd", "Print working directory", PWD),
    ]
}

impl CommandRegistry {
    /// The portfolio site's console vocabulary
    pub fn portfolio() -> Self {
        // `test_portfolio_table_passes_validation` keeps this table valid
        Self::from_definitions(portfolio_commands())
    }
}
