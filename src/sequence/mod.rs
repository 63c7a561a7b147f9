pub mod dispatch_log;
pub mod processor;
pub mod selector;
