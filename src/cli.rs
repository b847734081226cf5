//! Command line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use quiz_engine::config::Config;
use quiz_engine::engine::join_code;
use quiz_engine::papers::PaperLibrary;
use quiz_engine::storage::JsonFileStore;
use quiz_engine::{
    load_questions_from_json, Answer, EngineError, ProgrammingLanguage, Question, QuizEngine,
    QuizError, QuizSession,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a quiz session and print its join code
    Create {
        /// Display name of the quiz
        #[arg(short, long)]
        name: String,
        /// JSON file to load the questions from
        #[arg(short, long, conflicts_with_all = ["paper", "bank"])]
        questions: Option<PathBuf>,
        /// Saved question paper to use
        #[arg(short, long, conflicts_with = "bank")]
        paper: Option<Uuid>,
        /// Use the custom question bank
        #[arg(short, long)]
        bank: bool,
    },
    /// Start a waiting session
    Start { code: String },
    /// End a session
    End { code: String },
    /// Join a waiting session and print the participant id
    Join { code: String, name: String },
    /// Submit an answer; lists are comma separated (`a,b` or `A:1,B:2`)
    Answer {
        participant: Uuid,
        question: u32,
        answer: String,
    },
    /// Pick the programming language of a participant
    Language {
        participant: Uuid,
        #[arg(value_enum)]
        language: ProgrammingLanguage,
    },
    /// Mark a participant as finished
    Finish { participant: Uuid },
    /// List a session's participants, best score first
    Participants { code: String },
    /// Show one session
    Show { code: String },
    /// List every session
    Sessions,
    /// Remove every session and participant
    Clear,
    /// Manage saved question papers
    #[command(subcommand)]
    Papers(PaperCommand),
    /// Manage the custom question bank
    #[command(subcommand)]
    Questions(QuestionCommand),
    /// Open the live host dashboard for a session
    Host { code: String },
}

#[derive(Subcommand, Debug)]
pub enum PaperCommand {
    /// Save the questions of a JSON file as a paper
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        questions: PathBuf,
    },
    List,
    Delete { id: Uuid },
}

#[derive(Subcommand, Debug)]
pub enum QuestionCommand {
    /// Add every question of a JSON file to the bank
    Add { file: PathBuf },
    /// Replace a bank question with the one question in a JSON file
    Edit { id: u32, file: PathBuf },
    List,
    Delete { id: u32 },
}

/// Run one command against the configured stores.
pub async fn run(config: &Config, command: Command) -> Result<(), QuizError> {
    let mut engine = QuizEngine::open(config.quiz_store(), config.scoring)?;

    match command {
        Command::Create {
            name,
            questions,
            paper,
            bank,
        } => {
            let questions = match (questions, paper) {
                (Some(path), _) => load_questions_from_json(path)?,
                (None, Some(id)) => {
                    let library = PaperLibrary::open(config.paper_store())?;
                    library
                        .get_paper(id)
                        .ok_or(EngineError::PaperNotFound(id))?
                        .questions
                        .clone()
                }
                (None, None) if bank => engine.custom_questions().to_vec(),
                (None, None) => {
                    return Err(EngineError::InvalidInput(
                        "pass --questions, --paper or --bank",
                    )
                    .into());
                }
            };
            let session = engine.create_session(&name, questions)?;
            println!("Created '{}' with {} questions", session.name, session.questions.len());
            println!("Join code: {}", session.join_code);
        }
        Command::Start { code } => {
            let id = session_id(&engine, &code)?;
            if engine.start_session(id)? {
                println!("Quiz started");
            } else {
                println!("Quiz was not waiting; nothing changed");
            }
        }
        Command::End { code } => {
            let id = session_id(&engine, &code)?;
            engine.end_session(id)?;
            println!("Quiz ended");
        }
        Command::Join { code, name } => {
            let participant = engine.join_session(&join_code::normalize(&code), &name)?;
            println!("{}", participant.id);
        }
        Command::Answer {
            participant,
            question,
            answer,
        } => {
            let parsed = engine
                .get_participant(participant)
                .and_then(|p| engine.get_session_by_id(p.session_id))
                .and_then(|s| s.question(question))
                .map(|q| Answer::parse_for(&q.kind, &answer));
            let answer = parsed.unwrap_or(Answer::Choice(answer));
            let score = engine.submit_answer(participant, question, answer)?;
            println!("Score: {:.2}", score);
        }
        Command::Language {
            participant,
            language,
        } => {
            engine.set_participant_language(participant, language)?;
        }
        Command::Finish { participant } => {
            engine.finish_participant(participant)?;
        }
        Command::Participants { code } => {
            let id = session_id(&engine, &code)?;
            let ranked = engine.leaderboard(id)?;
            if ranked.is_empty() {
                println!("No participants yet.");
            }
            for (i, p) in ranked.iter().enumerate() {
                let done = if p.is_finished() { "  (done)" } else { "" };
                println!(
                    "{:>3}. {:<20} {:>8.2}  answered {}{}",
                    i + 1,
                    p.name,
                    p.score,
                    p.answered_count(),
                    done
                );
            }
        }
        Command::Show { code } => {
            let id = session_id(&engine, &code)?;
            if let Some(session) = engine.get_session_by_id(id) {
                print_session(session);
                for q in &session.questions {
                    println!("  Q{:<3} {:<16} {:>3} pts  {}", q.id, q.kind.label(), q.points, q.text);
                }
            }
        }
        Command::Sessions => {
            for session in engine.sessions() {
                print_session(session);
            }
        }
        Command::Clear => {
            engine.clear()?;
            println!("All sessions removed");
        }
        Command::Papers(cmd) => run_papers(config.paper_store(), cmd)?,
        Command::Questions(cmd) => match cmd {
            QuestionCommand::Add { file } => {
                for question in load_questions_from_json(file)? {
                    let added = engine.add_question(question)?;
                    println!("Added Q{} ({})", added.id, added.kind.label());
                }
            }
            QuestionCommand::Edit { id, file } => {
                let question = replacement(id, load_questions_from_json(file)?)?;
                engine.edit_question(question)?;
                println!("Updated Q{}", id);
            }
            QuestionCommand::List => {
                for q in engine.custom_questions() {
                    println!("Q{:<3} {:<16} {:>3} pts  {}", q.id, q.kind.label(), q.points, q.text);
                }
            }
            QuestionCommand::Delete { id } => {
                if !engine.delete_question(id)? {
                    return Err(EngineError::QuestionNotFound(id).into());
                }
            }
        },
        Command::Host { code } => {
            quiz_engine::host::run(engine, &code, config.refresh_interval()).await?;
        }
    }

    Ok(())
}

fn run_papers(store: JsonFileStore, cmd: PaperCommand) -> Result<(), QuizError> {
    let mut library = PaperLibrary::open(store)?;

    match cmd {
        PaperCommand::Add { title, questions } => {
            let id = library.add_paper(&title, load_questions_from_json(questions)?)?;
            println!("{}", id);
        }
        PaperCommand::List => {
            for paper in library.papers() {
                println!(
                    "{}  {:<24} {:>3} questions  {}",
                    paper.id,
                    paper.title,
                    paper.questions.len(),
                    paper.created_at.format("%Y-%m-%d")
                );
            }
        }
        PaperCommand::Delete { id } => {
            if !library.delete_paper(id)? {
                return Err(EngineError::PaperNotFound(id).into());
            }
        }
    }

    Ok(())
}

/// The single question of an edit file, renumbered to `id`.
fn replacement(id: u32, questions: Vec<Question>) -> Result<Question, EngineError> {
    let [mut question] = <[Question; 1]>::try_from(questions)
        .map_err(|_| EngineError::InvalidInput("an edit file must hold exactly one question"))?;
    question.id = id;
    Ok(question)
}

/// Resolve user-typed join code to a session id.
fn session_id(engine: &QuizEngine<JsonFileStore>, code: &str) -> Result<Uuid, QuizError> {
    let code = join_code::normalize(code);
    Ok(engine.find_session(&code)?.id)
}

fn print_session(session: &QuizSession) {
    println!(
        "{}  {:<24} {:<9} {} questions  created {}",
        session.join_code,
        session.name,
        session.status,
        session.questions.len(),
        session.created_at.format("%Y-%m-%d %H:%M")
    );
}
