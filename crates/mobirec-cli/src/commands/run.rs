use std::io::{self, BufRead, Write};
use std::time::Duration;

use clap::Args;
use serde_json::json;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use mobirec_core::{
    AnswerKind, Config, Event, HttpPredictor, Predictor, QuestionnaireError, WizardController,
    WizardView,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

const HELP: &str = "\
commands:
  start          begin the questionnaire
  next, back     move between questions
  review         open the review screen from the last question
  jump N         show question N (from a question or the review screen)
  set VALUE      answer the shown question (option text, option number or 1-5)
  submit         ask for a recommendation from the review screen
  reset          start over from the result screen
  show           redraw the current screen
  steps          show which questions are answered
  help           this text
  quit           leave";

#[derive(Args)]
pub struct RunArgs {
    /// Prediction service URL, overriding prediction.endpoint
    #[arg(long)]
    endpoint: Option<String>,
    /// Show texts at once instead of revealing them character by character
    #[arg(long)]
    no_typewriter: bool,
    /// Print events as JSON lines instead of drawing screens
    #[arg(long)]
    json: bool,
}

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Start,
    Next,
    Back,
    Review,
    /// Zero-based question index.
    Jump(usize),
    Set(String),
    Submit,
    Reset,
    Show,
    Steps,
    Help,
    Quit,
}

fn parse_input(line: &str) -> Result<Option<Input>, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let input = match word.to_ascii_lowercase().as_str() {
        "" => return Ok(None),
        "start" => Input::Start,
        "next" | "n" => Input::Next,
        "back" | "b" => Input::Back,
        "review" => Input::Review,
        "jump" | "j" => match rest.parse::<usize>() {
            Ok(n) if n > 0 => Input::Jump(n - 1),
            _ => return Err(format!("jump needs a question number, got '{rest}'")),
        },
        "set" | "s" if !rest.is_empty() => Input::Set(rest.to_string()),
        "set" | "s" => return Err("set needs a value".to_string()),
        "submit" => Input::Submit,
        "reset" => Input::Reset,
        "show" => Input::Show,
        "steps" => Input::Steps,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => return Err(format!("unknown command '{other}', type 'help'")),
    };
    Ok(Some(input))
}

pub fn run(args: RunArgs) -> CliResult {
    let mut config = Config::load()?;
    if let Some(endpoint) = &args.endpoint {
        config.update("prediction.endpoint", endpoint)?;
    }
    if args.no_typewriter {
        config.reveal.enabled = false;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let mut session = Session {
        wizard: config.build_wizard()?,
        predictor: config.build_predictor()?,
        runtime,
        delay: config.reveal_delay(),
        json: args.json,
    };
    info!(endpoint = %session.predictor.endpoint(), "session started");

    session.reveal()?;
    session.render()?;

    for line in io::stdin().lock().lines() {
        match parse_input(&line?) {
            Ok(None) => continue,
            Ok(Some(Input::Quit)) => break,
            Ok(Some(input)) => session.handle(input)?,
            Err(message) => session.notice(&message)?,
        }
    }
    debug!("session ended");
    Ok(())
}

struct Session {
    wizard: WizardController,
    predictor: HttpPredictor,
    runtime: Runtime,
    delay: Duration,
    json: bool,
}

impl Session {
    fn handle(&mut self, input: Input) -> CliResult {
        let event = match input {
            Input::Start => self.wizard.start(),
            Input::Next => self.wizard.next(),
            Input::Back => self.wizard.back(),
            Input::Review => self.wizard.review(),
            Input::Jump(index) => match self.wizard.jump_to(index) {
                Ok(event) => event,
                Err(e) => return self.notice(&e.to_string()),
            },
            Input::Set(raw) => match self.set_answer(&raw) {
                Ok(event) => event,
                Err(e) => return self.notice(&e.to_string()),
            },
            Input::Submit => return self.submit(),
            Input::Reset if self.wizard.reset_enabled() => self.wizard.reset(),
            Input::Reset => {
                return self.notice("reset is only available on the result screen");
            }
            Input::Show => return self.render(),
            Input::Steps => {
                self.render_steps();
                return Ok(());
            }
            Input::Help => {
                println!("{HELP}");
                return Ok(());
            }
            Input::Quit => return Ok(()),
        };

        match event {
            Some(event) => self.apply(&event),
            None => self.notice("not available on this screen"),
        }
    }

    /// Store an answer for the shown question. Enumerated questions also
    /// take the option number, 0 being the placeholder.
    fn set_answer(&mut self, raw: &str) -> Result<Option<Event>, QuestionnaireError> {
        let Some(question) = self.wizard.current_question() else {
            return Ok(None);
        };
        let by_number = if question.is_scaled() {
            None
        } else {
            raw.trim()
                .parse::<usize>()
                .ok()
                .and_then(|n| question.domain().get(n).cloned())
        };
        let key = question.key.clone();
        match by_number {
            Some(value) => self.wizard.answer(&key, value),
            None => self.wizard.answer_current(raw),
        }
    }

    fn submit(&mut self) -> CliResult {
        let Some((ticket, started)) = self.wizard.begin_submit() else {
            return self.notice("submit is only available on the review screen");
        };
        self.apply(&started)?;
        let outcome = self
            .runtime
            .block_on(self.predictor.predict(ticket.record()));
        match self.wizard.finish_submit(&ticket, outcome) {
            Some(event) => self.apply(&event),
            None => Ok(()),
        }
    }

    fn apply(&mut self, event: &Event) -> CliResult {
        if matches!(
            event,
            Event::WizardReset { .. } | Event::PredictionSucceeded { .. }
        ) {
            if self.json {
                self.wizard.finish_reveal();
            } else {
                println!();
                self.reveal()?;
            }
        }

        if self.json {
            println!("{}", serde_json::to_string(event)?);
            return Ok(());
        }

        match event {
            Event::AnswerChanged { key, value, .. } => println!("{key} = {value}"),
            Event::SubmissionStarted { .. } => println!("Requesting a recommendation..."),
            Event::PredictionFailed { message, .. } => {
                println!("Could not get a recommendation: {message}");
                println!("Your answers are kept. Type 'submit' to try again.");
            }
            _ => self.render()?,
        }
        Ok(())
    }

    /// Show the pending reveal text, animated unless the delay is zero.
    fn reveal(&mut self) -> io::Result<()> {
        if self.json || self.delay.is_zero() {
            self.wizard.finish_reveal();
            if !self.json {
                println!("{}", self.wizard.reveal_text());
            }
            return Ok(());
        }
        let mut stdout = io::stdout();
        let mut written = Ok(());
        self.runtime
            .block_on(self.wizard.play_reveal(self.delay, |frame| {
                if written.is_ok() {
                    written = write!(stdout, "\r{frame}").and_then(|()| stdout.flush());
                }
            }));
        written?;
        writeln!(stdout)
    }

    fn notice(&self, message: &str) -> CliResult {
        if self.json {
            println!("{}", json!({ "type": "notice", "message": message }));
        } else {
            println!("! {message}");
        }
        Ok(())
    }

    fn render(&self) -> CliResult {
        if self.json {
            println!("{}", serde_json::to_string(&self.wizard.state_snapshot())?);
            return Ok(());
        }

        match self.wizard.view() {
            WizardView::Landing => println!("Type 'start' to begin, 'help' for commands."),
            WizardView::Question { index } => self.render_question(*index),
            WizardView::Review => self.render_review(),
            WizardView::Result { label } => {
                println!("Recommendation: {label}");
                if let Some(asset) = self.wizard.recommendation().and_then(|r| r.asset()) {
                    println!("App icon: {}", asset.file_name());
                }
                println!("Type 'reset' to start over.");
            }
        }
        Ok(())
    }

    fn render_steps(&self) {
        let line: String = self
            .wizard
            .step_indicator()
            .iter()
            .map(|step| match (step.current, step.answered) {
                (true, _) => '>',
                (false, true) => '#',
                (false, false) => '.',
            })
            .collect();
        println!(
            "[{line}] {}/{} answered",
            self.wizard.answers().answered_count(),
            self.wizard.question_count()
        );
    }

    fn render_question(&self, index: usize) {
        let Some(question) = self.wizard.current_question() else {
            return;
        };
        let current = self.wizard.answers().get(&question.key).ok();

        println!();
        self.render_steps();
        println!(
            "Question {} of {}: {}",
            index + 1,
            self.wizard.question_count(),
            question.text
        );
        match &question.kind {
            AnswerKind::Enumerated { .. } => {
                for (n, value) in question.domain().iter().enumerate() {
                    let mark = if current == Some(value) { '*' } else { ' ' };
                    println!("  {mark} {n}) {value}");
                }
            }
            AnswerKind::Scaled { .. } => {
                if let Some(value) = current {
                    println!("  scale 1-5, currently {value}");
                }
            }
        }
    }

    fn render_review(&self) {
        println!();
        println!("Review your answers:");
        for entry in self.wizard.review_entries() {
            let note = if entry.answered { "" } else { " (unanswered)" };
            println!("  {:>2}. {}  {}{note}", entry.index + 1, entry.text, entry.value);
        }
        println!("Type 'submit', 'back' or 'jump N'.");
    }
}
