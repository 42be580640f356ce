//! Forum post, reply and vote repositories.

pub mod post;
pub mod reply;
pub mod vote;

pub use post::PostRepository;
pub use reply::ReplyRepository;
pub use vote::{VoteRepository, VoteTally, VoteTarget};
