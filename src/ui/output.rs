use crate::catalog::{featured_internships, Internship, Mentor, MentorGroups};
use crate::models::{ChatSession, LedgerStats, Message, Transaction, TransactionKind};
use crate::payment::{format_xaf, PaymentState};
use colored::*;

/// Print an assistant turn; image parts are listed, not rendered.
pub fn display_reply(message: &Message) {
    if message.content.starts_with("Error:") {
        println!("{}", message.content.red());
    } else {
        println!("{}", message.content.trim_end());
    }

    for (index, image) in message.images.iter().enumerate() {
        let mime = image
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .unwrap_or("image");
        println!(
            "{}",
            format!("[image {}] {} ({} bytes encoded)", index + 1, mime, image.len()).dimmed()
        );
    }
}

pub fn display_sessions(sessions: &[ChatSession], active: Option<&str>) {
    if sessions.is_empty() {
        println!("{}", "No saved conversations.".dimmed());
        return;
    }

    for session in sessions {
        let marker = if Some(session.id.as_str()) == active { "*" } else { " " };
        println!(
            "{} {} {}",
            marker.green(),
            session.name.cyan(),
            format!(
                "({} messages, {}, {})",
                session.messages.len(),
                session.selected_model,
                session.last_updated().format("%Y-%m-%d %H:%M")
            )
            .dimmed()
        );
    }
}

pub fn display_payment_state(state: &PaymentState) {
    match state {
        PaymentState::Idle => println!("{}", "No payment submitted.".dimmed()),
        PaymentState::Submitting(request) => println!(
            "{}",
            format!("Processing {}...", format_xaf(request.amount as i64)).dimmed()
        ),
        PaymentState::Success(response) => {
            println!("{}", "Payment Successful!".green().bold());
            print_response_rows(response);
        }
        PaymentState::Pending(response) => {
            println!("{}", "Payment pending confirmation on the payer's phone.".yellow().bold());
            print_response_rows(response);
        }
        PaymentState::Cancelled { reason, response } => {
            println!("{}", "Payment Error".red().bold());
            println!("{}", reason.red());
            if let Some(response) = response {
                print_response_rows(response);
            }
        }
    }
}

fn print_response_rows(response: &crate::models::PaymentResponse) {
    let date = response
        .created_at_utc()
        .map(|dt| dt.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| response.created_at.clone());

    println!("{} {}", "Payment ID:".dimmed(), response.id);
    println!("{} {}", "Status:".dimmed(), response.status.as_str());
    println!("{} {}", "Amount:".dimmed(), format_xaf(response.amount as i64));
    if let Some(fee) = response.fee {
        println!("{} {}", "Fee:".dimmed(), format_xaf(fee as i64));
    }
    println!("{} +{}", "Phone:".dimmed(), response.phone_number);
    if !response.telecom_operator.is_empty() {
        println!("{} {}", "Operator:".dimmed(), response.telecom_operator.to_uppercase());
    }
    println!("{} {}", "Date:".dimmed(), date);
}

pub fn display_stats(stats: &LedgerStats) {
    println!("{} {}", "Available balance:".dimmed(), format_xaf(stats.available_balance).green());
    println!("{} {}", "Pending payouts:".dimmed(), format_xaf(stats.pending_payouts).yellow());
    println!("{} {}", "Total spent:".dimmed(), format_xaf(stats.total_spent));
}

pub fn display_transactions(transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("{}", "No transactions yet.".dimmed());
        return;
    }

    for tx in transactions {
        let sign = match tx.kind {
            TransactionKind::Collection => "+",
            TransactionKind::Payout => "-",
        };
        let amount = format!("{} {}", sign, format_xaf(tx.amount as i64));
        let amount = match tx.kind {
            TransactionKind::Collection => amount.green(),
            TransactionKind::Payout => amount.red(),
        };
        println!(
            "{} {} {} {}",
            tx.date.format("%Y-%m-%d"),
            tx.provider.cyan(),
            amount,
            tx.status.label().dimmed()
        );
        if let Some(fee) = tx.fee {
            println!("{}", format!("    Fee: {}", format_xaf(fee as i64)).dimmed());
        }
    }
}

pub fn display_mentors(groups: &MentorGroups, matched: usize, total: usize) {
    println!("{}", format!("Showing {} of {} mentors", matched, total).dimmed());
    if matched == 0 {
        println!("{}", "No mentors match your filters.".yellow());
        return;
    }

    for (title, mentors) in [
        ("Top Mentors", &groups.top),
        ("Mentors Near You", &groups.near_you),
        ("Other Mentors", &groups.others),
    ] {
        if mentors.is_empty() {
            continue;
        }
        println!();
        println!("{}", title.bold());
        for mentor in mentors.iter() {
            print_mentor(mentor);
        }
    }
}

fn print_mentor(mentor: &Mentor) {
    println!(
        "  {} {} {}",
        mentor.name.cyan(),
        format!("★ {:.1}", mentor.rating).yellow(),
        format!("{}/session", format_xaf(mentor.price as i64)).green()
    );
    println!("    {}", mentor.title);
    println!(
        "{}",
        format!(
            "    {} · {} · {}",
            mentor.skills.join(", "),
            mentor.location,
            mentor.availability
        )
        .dimmed()
    );
}

pub fn display_internships(internships: &[&Internship], total: usize) {
    println!(
        "{}",
        format!("Showing {} of {} opportunities", internships.len(), total).dimmed()
    );
    if internships.is_empty() {
        println!("{}", "No internships match your filters.".yellow());
        return;
    }

    let featured = featured_internships(internships);
    if !featured.is_empty() {
        println!();
        println!("{}", "Featured Opportunities".bold());
        for internship in &featured {
            println!("  {} {}", "★".yellow(), internship.company.cyan());
        }
    }

    println!();
    for internship in internships {
        println!(
            "{} {} {}",
            internship.company.cyan(),
            format!("[{:?}]", internship.level).to_lowercase().dimmed(),
            internship.industry
        );
        println!("    {}", internship.roles.join(", "));
        println!(
            "{}",
            format!(
                "    {} · {} · apply by {}",
                internship.location, internship.duration, internship.application_deadline
            )
            .dimmed()
        );
    }
}
