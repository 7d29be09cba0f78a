#![allow(dead_code)]

pub mod completion;
pub mod http;
pub mod speech;
