pub mod course;
pub mod seed;
pub mod settings;

pub use course::{Course, CourseStatus, CreatedBy};
pub use settings::Settings;
