pub mod admin;
pub mod attendance;
pub mod challenge;
pub mod contact;
pub mod date;
pub mod member;
pub mod program;
pub mod trainer;

pub use admin::{AdminCredentials, AdminLogin, AdminStats};
pub use attendance::{AttendanceRecord, DATE_KEY_FORMAT};
pub use challenge::{Challenge, ChallengeInput};
pub use contact::{ContactReply, ContactRequest};
pub use member::{Member, MemberCredentials, MemberLogin, NewMember, PhotoUpload};
pub use program::{Program, ProgramInput};
pub use trainer::{Trainer, TrainerInput};
