//! Building blocks every page uses to hold and reconcile backend data locally.

mod calendar;
mod challenges;
mod collection;
mod enrollment;
mod search;
mod state;

pub use calendar::{AttendanceSet, CalendarCursor, DayCell, GridCell, MonthGrid, WEEKDAY_HEADER};
pub use challenges::ChallengeBoard;
pub use collection::{HasId, IdCollection};
pub use enrollment::Enrollment;
pub use search::{filter_members, MemberSearch};
pub use state::{BannerKind, Liveness, PageState, StatusBanner, StatusSlot};
