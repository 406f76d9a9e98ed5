//! Session handlers.

mod generate_session_title;

pub use generate_session_title::{
    GenerateSessionTitleCommand, GenerateSessionTitleHandler, DEFAULT_SESSION_TITLE,
};
