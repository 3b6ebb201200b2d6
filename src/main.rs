use clap::Parser;
use colored::*;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use startwise::api::GeminiClient;
use startwise::auth::AuthContext;
use startwise::catalog::{
    filter_internships, filter_mentors, group_mentors, load_catalog, Internship,
    InternshipFilters, Mentor, MentorFilters,
};
use startwise::chat::{ChatManager, ChatSettings, FileUpload};
use startwise::cli::{Args, ChatArgs, Command, InternshipArgs, MentorArgs, PayArgs};
use startwise::config::Config;
use startwise::models::{UserRecord, UserRole};
use startwise::payment::{
    compose_phone_number, is_plausible_phone, CountryCode, Ledger, NkwaGateway, PaymentFlow,
};
use startwise::session::{default_cache_dir, FilesystemSessionStore, SessionStore};
use startwise::ui::{
    display_internships, display_mentors, display_payment_state, display_reply, display_sessions,
    display_stats, display_transactions,
};

const LEDGER_FILE: &str = "ledger.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    init_tracing(config.verbose);

    let result = match &args.command {
        Command::Chat(chat) => run_chat(&config, chat).await,
        Command::Sessions => run_sessions(),
        Command::Clear => run_clear(),
        Command::Pay(pay) => run_pay(&config, pay).await,
        Command::Ledger => run_ledger().await,
        Command::Mentors(mentors) => run_mentors(mentors).await,
        Command::Internships(internships) => run_internships(internships).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red(), e);
        process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "startwise=debug" } else { "startwise=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_chat(config: &Config, chat: &ChatArgs) -> startwise::Result<()> {
    let prompt = chat.prompt.join(" ");
    if prompt.trim().is_empty() && chat.attachments.is_empty() {
        eprintln!("{}", "Usage: startwise chat [OPTIONS] <prompt>".red());
        eprintln!("{}", "  -n, --new          Start a new conversation".dimmed());
        eprintln!(
            "{}",
            "  -c, --continue     Continue previous conversation even if expired".dimmed()
        );
        eprintln!("{}", "  -m, --model        Model to use".dimmed());
        eprintln!("{}", "  -a, --attach FILE  Attach a file".dimmed());
        process::exit(1);
    }

    let store = FilesystemSessionStore::new()?;
    let generator = Arc::new(GeminiClient::from_config(config)?);
    let manager = ChatManager::new(generator, ChatSettings::from_config(config));

    let existing = if chat.new_conversation {
        None
    } else if chat.force_continue {
        store
            .load_sessions()?
            .into_iter()
            .max_by_key(|s| s.updated_at.max(s.created_at))
    } else {
        store.find_recent_session()
    };

    let session_id = match existing {
        Some(session) => {
            let id = session.id.clone();
            manager.restore_session(session).await;
            if let Some(model) = &chat.model {
                manager.select_model(&id, model).await?;
            }
            id
        }
        None => manager.create_session(&config.model).await.id,
    };

    let mut uploads = Vec::with_capacity(chat.attachments.len());
    for path in &chat.attachments {
        uploads.push(FileUpload::from_path(path).await?);
    }

    if let Some(reply) = manager.send_message(&session_id, &prompt, uploads).await? {
        display_reply(&reply);
    }

    let session = manager.session(&session_id).await?;
    if let Err(e) = store.save_session(&session) {
        tracing::warn!(error = %e, "failed to save session");
    }

    Ok(())
}

fn run_sessions() -> startwise::Result<()> {
    let store = FilesystemSessionStore::new()?;
    let sessions = store.load_sessions()?;
    let recent = store.find_recent_session().map(|s| s.id);
    display_sessions(&sessions, recent.as_deref());
    Ok(())
}

fn run_clear() -> startwise::Result<()> {
    FilesystemSessionStore::new()?.clear_all_sessions()?;
    println!("{}", "All conversation history cleared.".green());
    Ok(())
}

async fn run_pay(config: &Config, pay: &PayArgs) -> startwise::Result<()> {
    let country = CountryCode::from_dial_code(&pay.country).ok_or_else(|| {
        startwise::Error::Config(format!("Unsupported country code: {}", pay.country))
    })?;
    let phone_number = compose_phone_number(country, &pay.phone);
    if !is_plausible_phone(&phone_number) {
        eprintln!(
            "{}",
            format!("Warning: {} does not look like a phone number", phone_number).yellow()
        );
    }

    let ledger_path = default_cache_dir()?.join(LEDGER_FILE);
    let ledger = Arc::new(Ledger::load(&ledger_path).await?);
    let auth = Arc::new(AuthContext::new());
    if let Some(uid) = &config.user_id {
        let now = chrono::Utc::now();
        auth.sign_in(UserRecord {
            uid: uid.clone(),
            role: UserRole::Mentee,
            name: uid.clone(),
            email: String::new(),
            profile_image: None,
            created_at: now,
            updated_at: now,
        })
        .await;
    }

    let gateway = Arc::new(NkwaGateway::from_config(config)?);
    let mut flow = PaymentFlow::new(gateway, Arc::clone(&ledger), auth);

    println!("{}", format!("Collecting from +{}...", phone_number).dimmed());
    let state = flow
        .submit_payment(pay.amount, &phone_number, pay.description.clone())
        .await;
    display_payment_state(state);

    ledger.save(&ledger_path).await?;
    Ok(())
}

async fn run_ledger() -> startwise::Result<()> {
    let ledger = Ledger::load(&default_cache_dir()?.join(LEDGER_FILE)).await?;
    display_stats(&ledger.stats().await);
    println!();
    display_transactions(&ledger.transactions().await);
    Ok(())
}

async fn run_mentors(args: &MentorArgs) -> startwise::Result<()> {
    let mentors: Vec<Mentor> = load_catalog(&args.catalog).await?;
    let filters = MentorFilters {
        search: args.search.clone(),
        skills: args.skills.clone(),
        min_rating: args.min_rating,
        max_price: args.max_price,
        availability: args
            .availability
            .clone()
            .filter(|a| !a.eq_ignore_ascii_case("all")),
    };

    let matched = filter_mentors(&mentors, &filters);
    display_mentors(&group_mentors(&matched), matched.len(), mentors.len());
    Ok(())
}

async fn run_internships(args: &InternshipArgs) -> startwise::Result<()> {
    let internships: Vec<Internship> = load_catalog(&args.catalog).await?;
    let filters = InternshipFilters {
        search: args.search.clone(),
        level: args.level,
        location: args.location,
        industry: args
            .industry
            .clone()
            .filter(|i| !i.eq_ignore_ascii_case("all")),
    };

    let matched = filter_internships(&internships, &filters);
    display_internships(&matched, internships.len());
    Ok(())
}
