use mobirec_core::{AnswerKind, Config};

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let questionnaire = config.questionnaire()?;

    if json {
        println!("{}", serde_json::to_string_pretty(questionnaire.questions())?);
        return Ok(());
    }

    for (i, q) in questionnaire.questions().iter().enumerate() {
        println!("{:>2}. [{}] {}", i + 1, q.key, q.text);
        match &q.kind {
            AnswerKind::Enumerated { options, .. } => {
                println!("      options: {}", options.join(" | "));
            }
            AnswerKind::Scaled { default } => {
                println!("      scale 1-5 (default {default})");
            }
        }
    }
    Ok(())
}
