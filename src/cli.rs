use crate::catalog::{ExperienceLevel, LocationFilter, DEFAULT_MAX_PRICE};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "startwise")]
#[command(about = "StartWise assistant and mobile-money tools", long_about = None)]
pub struct Args {
    #[arg(short = 'v', long = "verbose", global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        long = "api-endpoint",
        global = true,
        help = "Custom generative-content base URL (e.g., http://localhost:8080/v1beta)"
    )]
    pub api_endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask the AI tutor something
    Chat(ChatArgs),
    /// List saved conversations
    Sessions,
    /// Clear all conversation history
    Clear,
    /// Collect a mobile-money payment
    Pay(PayArgs),
    /// Show ledger balances and recorded transactions
    Ledger,
    /// Search a mentor listing
    Mentors(MentorArgs),
    /// Search an internship listing
    Internships(InternshipArgs),
}

#[derive(ClapArgs, Debug)]
pub struct ChatArgs {
    #[arg(short = 'n', long = "new", help = "Start a new conversation")]
    pub new_conversation: bool,

    #[arg(
        short = 'c',
        long = "continue",
        help = "Continue previous conversation even if expired"
    )]
    pub force_continue: bool,

    #[arg(short = 'm', long = "model", help = "Model to use for a new conversation")]
    pub model: Option<String>,

    #[arg(short = 'a', long = "attach", help = "Attach a file (image, PDF, ...)")]
    pub attachments: Vec<PathBuf>,

    #[arg(help = "Prompt to send to the assistant")]
    pub prompt: Vec<String>,
}

#[derive(ClapArgs, Debug)]
pub struct PayArgs {
    #[arg(long = "amount", help = "Amount in XAF")]
    pub amount: u64,

    #[arg(long = "phone", help = "Local number without country code (e.g., 650000000)")]
    pub phone: String,

    #[arg(long = "country", default_value = "237", help = "Country calling code (237, 234, 225)")]
    pub country: String,

    #[arg(long = "description", help = "Optional payment description")]
    pub description: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct MentorArgs {
    #[arg(long = "catalog", help = "JSON file with the mentor listing")]
    pub catalog: PathBuf,

    #[arg(short = 's', long = "search", default_value = "", help = "Match name, title or skill")]
    pub search: String,

    #[arg(long = "skill", help = "Required skill (repeatable)")]
    pub skills: Vec<String>,

    #[arg(long = "min-rating", default_value_t = 0.0)]
    pub min_rating: f32,

    #[arg(long = "max-price", default_value_t = DEFAULT_MAX_PRICE, help = "Maximum XAF per session")]
    pub max_price: u64,

    #[arg(long = "availability", help = "e.g. weekends, Mon")]
    pub availability: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct InternshipArgs {
    #[arg(long = "catalog", help = "JSON file with the internship listing")]
    pub catalog: PathBuf,

    #[arg(short = 's', long = "search", default_value = "", help = "Match company, role or industry")]
    pub search: String,

    #[arg(long = "level", value_enum)]
    pub level: Option<ExperienceLevel>,

    #[arg(long = "location", value_enum, default_value_t = LocationFilter::All)]
    pub location: LocationFilter,

    #[arg(long = "industry")]
    pub industry: Option<String>,
}

impl Args {
    pub fn model_override(&self) -> Option<&str> {
        match &self.command {
            Command::Chat(chat) => chat.model.as_deref(),
            _ => None,
        }
    }
}
