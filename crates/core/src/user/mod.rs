mod attributes;
mod cookie;
mod types;

pub use attributes::{attributes_to_user, session_value, user_to_attributes};
pub use cookie::{parse_cookie_header, session_from_cookie};
pub use types::{User, CREDITS_ATTR, SESSION_ATTR, USER_ID_ATTR};
