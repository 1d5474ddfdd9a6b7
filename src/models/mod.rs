pub mod task;
pub mod user;

pub use task::{Task, TaskCreate, TaskQuery, TaskSort, TaskUpdate};
pub use user::Principal;
