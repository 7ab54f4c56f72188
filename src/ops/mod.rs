pub mod export;
pub mod search;
pub mod task_ops;
