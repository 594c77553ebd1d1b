mod entity;
mod task;

pub use entity::EntityRef;
pub use task::{
    Classification, MissingField, NormalizedTask, RawTaskRecord, TaskStatus, STATE_BUSY,
    STATE_DONE, STATE_WAIT, TYPE_RECURRENT, TYPE_URGENT,
};
