mod conversation;
mod followups;

pub use conversation::{Answer, Conversation, Exchange, NO_CONTEXT_ANSWER};
pub use followups::{suggest_follow_ups, MAX_FOLLOW_UPS};
