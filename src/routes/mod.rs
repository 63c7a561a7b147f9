mod email_sequence;
mod health_check;
mod register;

pub use email_sequence::{handle_manual_send, handle_preview, handle_send_sequence};
pub use health_check::health_check;
pub use register::handle_register;
