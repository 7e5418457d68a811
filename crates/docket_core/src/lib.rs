pub mod dates;
pub mod error;
pub mod projection;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use storage::RecordStorage;
pub use types::{Collection, ContentRecord, ContentType};

pub mod prelude {
    pub use crate::dates::{days_until, format_date, is_upcoming, priority_badge, PriorityBadge};
    pub use crate::projection::{archive, upcoming, ArchiveQuery, Projected, SortOrder, TypeFilter, UpcomingQuery};
    pub use crate::{Collection, ContentRecord, Error, RecordStorage, Result};
}
