pub mod dispatch;
pub mod options;
pub mod predict;
pub mod schema;
