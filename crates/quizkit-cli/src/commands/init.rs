//! The `quizkit init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizkit.toml
    if std::path::Path::new("quizkit.toml").exists() {
        println!("quizkit.toml already exists, skipping.");
    } else {
        std::fs::write("quizkit.toml", SAMPLE_CONFIG)?;
        println!("Created quizkit.toml");
    }

    // Create sample quiz
    std::fs::create_dir_all("quizzes")?;
    let sample_path = std::path::Path::new("quizzes/sample.json");
    if sample_path.exists() {
        println!("quizzes/sample.json already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_QUIZ)?;
        println!("Created quizzes/sample.json");
    }

    println!("\nNext steps:");
    println!("  1. Run: quizkit validate");
    println!("  2. Run: quizkit play --quiz sample");
    println!("  3. Run: quizkit results");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizkit configuration

quizzes_dir = "quizzes"
handoff_path = ".quizkit/handoff.json"
shuffle = true

# Seeds an empty quiz directory on first use.
[remote]
contents_url = "https://api.github.com/repos/RPDevJesco/Modular_Quiz_App/contents/Quiz/Quizzes"
raw_base_url = "https://raw.githubusercontent.com/RPDevJesco/Modular_Quiz_App/main/Quiz/Quizzes"
concurrency = 4
"#;

const SAMPLE_QUIZ: &str = r#"[
  {
    "questionText": "Which keyword declares an immutable binding in Rust?",
    "answers": ["var", "let", "const fn", "mut"],
    "correctAnswerIndex": [1]
  },
  {
    "questionText": "Which of these types implement Copy?",
    "answers": ["u32", "String", "bool", "Vec<u8>"],
    "correctAnswerIndex": [0, 2],
    "isMultipleChoice": true
  },
  {
    "questionText": "What does the ? operator do on an Err value?",
    "answers": ["Panics", "Returns it early from the function", "Ignores it"],
    "correctAnswerIndex": [1]
  }
]
"#;
