//! Data model: agents, links and the network that owns them.

pub mod agent;
pub mod link;
pub mod network;

pub use agent::{Agent, AgentId, ComparisonOutcome};
pub use link::{Link, LinkId};
pub use network::SocialNetwork;
