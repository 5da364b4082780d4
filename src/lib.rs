// Library for tests to access modules

pub mod config;
pub mod models;
pub mod report;
pub mod timeutil;
