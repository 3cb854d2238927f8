//! # EduPlatform CLI
//!
//! Demo/fake data seeding and the interactive role-based console session.
//!
//! ## Usage
//!
//! ```ignore
//! use eduplatform_cli::seeder;
//! use eduplatform_cli::shell::{Shell, TerminalConsole};
//!
//! let mut store = DataStore::new();
//! seeder::seed(&mut store, &config.seed)?;
//! Shell::new(store, ExportManager::new(config.export), TerminalConsole).run()?;
//! ```

pub mod seeder;
pub mod shell;
