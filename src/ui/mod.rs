mod output;

pub use output::{
    display_internships, display_mentors, display_payment_state, display_reply, display_sessions,
    display_stats, display_transactions,
};
