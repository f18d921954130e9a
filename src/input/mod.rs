//! Operator input: the line reader thread and the channels it feeds.

pub mod channels;
pub mod reader;
