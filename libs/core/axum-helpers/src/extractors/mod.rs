pub mod user_id;
pub mod uuid_path;
pub mod validated_json;
pub mod validated_query;

pub use user_id::{UserId, USER_ID_HEADER};
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
