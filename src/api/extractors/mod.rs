//! Request extractors that turn bad input into `INVALID_PARAMETERS`.

mod id_path;
mod validated_json;
mod validated_query;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
