pub mod health;
pub mod students;

pub use self::students::model::Student;
