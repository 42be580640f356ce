pub use super::arena::Entity as Arena;
pub use super::arena_opening_hours::Entity as ArenaOpeningHours;
pub use super::booking::Entity as Booking;
pub use super::event::Entity as Event;
pub use super::event_registration::Entity as EventRegistration;
pub use super::forum_post::Entity as ForumPost;
pub use super::forum_reply::Entity as ForumReply;
pub use super::forum_vote::Entity as ForumVote;
pub use super::rink_user::Entity as RinkUser;
