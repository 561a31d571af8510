//! Teams domain layer: entities, chat formatting, validation

pub mod chat;
pub mod entities;
pub mod validation;
