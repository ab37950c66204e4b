pub use super::guild::Entity as Guild;
pub use super::result::Entity as MatchResult;
pub use super::sokuji::Entity as Sokuji;
